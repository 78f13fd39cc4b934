use crate::output::print_json;
use anyhow::{Context, Result};
use parcours_core::case::Case;
use parcours_core::timeline::{timeline, StepState, Timeline};
use std::path::Path;

pub fn run(root: &Path, slug: &str, json: bool) -> Result<()> {
    let case = Case::load(root, slug).with_context(|| format!("case '{slug}' not found"))?;
    let t = timeline(case.global_status());

    if json {
        return print_json(&t);
    }

    match t {
        Timeline::Rejected => {
            println!("Dossier refusé. Seul un administrateur peut le réouvrir.");
        }
        Timeline::InProgress { steps } => {
            for step in steps {
                let marker = match step.state {
                    StepState::Completed => "[x]",
                    StepState::Active => "[>]",
                    StepState::Upcoming => "[ ]",
                };
                println!("{marker} {}", step.label);
            }
        }
    }
    Ok(())
}
