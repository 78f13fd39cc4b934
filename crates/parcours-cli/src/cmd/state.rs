use crate::output::print_json;
use anyhow::{Context, Result};
use parcours_core::state::State;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> Result<()> {
    let state = State::load(root).context("failed to load state")?;

    if json {
        return print_json(&state);
    }

    println!("Project:      {}", state.project);
    println!("Active cases: {}", state.active_cases.join(", "));
    println!("Last updated: {}", state.last_updated);
    if !state.history.is_empty() {
        println!("Recent transitions:");
        for t in state.history.iter().rev().take(5) {
            println!(
                "  {} {} by {}: {} -> {}",
                t.case_slug, t.action, t.role, t.from, t.to
            );
        }
    }
    Ok(())
}
