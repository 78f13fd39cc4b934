use crate::output::print_json;
use anyhow::{Context, Result};
use parcours_core::engine::{apply_action, ActionPayload};
use parcours_core::types::{ActionId, Role};
use std::path::Path;

/// Free-text and selection inputs collected from the command line.
pub struct Inputs {
    pub message: Option<String>,
    pub justification: Option<String>,
    pub surgeons: Vec<String>,
    pub budget: Option<String>,
    pub dates: Option<String>,
}

pub fn run(
    root: &Path,
    slug: &str,
    action: ActionId,
    role: Role,
    actor: Option<&str>,
    inputs: Inputs,
    json: bool,
) -> Result<()> {
    let payload = ActionPayload {
        message: inputs.message,
        justification: inputs.justification,
        surgeons: inputs.surgeons,
        budget: inputs.budget,
        dates: inputs.dates,
    };

    let outcome = apply_action(root, slug, role, actor, action, &payload)
        .with_context(|| format!("failed to apply '{action}' to '{slug}'"))?;

    if json {
        return print_json(&outcome);
    }

    if outcome.from == outcome.to {
        println!("Applied {} to '{}' (status stays {})", outcome.action, outcome.case_slug, outcome.to);
    } else {
        println!(
            "Applied {} to '{}': {} -> {}",
            outcome.action, outcome.case_slug, outcome.from, outcome.to
        );
    }
    if outcome.notified > 0 {
        println!("Notified {} role(s)", outcome.notified);
    }
    Ok(())
}
