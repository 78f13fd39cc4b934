use crate::output::print_json;
use anyhow::{Context, Result};
use parcours_core::case::Case;
use parcours_core::types::Role;
use parcours_core::{guidance, resolve};
use std::path::Path;

pub fn run(root: &Path, slug: &str, role: Role, json: bool) -> Result<()> {
    let case = Case::load(root, slug).with_context(|| format!("case '{slug}' not found"))?;
    let status = case.global_status();
    let actions = resolve(status, role, case.quote_accepted, case.date_accepted);
    let hint = guidance(status, role);

    if json {
        return print_json(&serde_json::json!({
            "case": case.slug,
            "role": role,
            "status": status,
            "guidance": hint,
            "actions": actions,
        }));
    }

    println!("Case:     {}", case.slug);
    println!("Role:     {role}");
    println!("Status:   {status}");
    println!("Guidance: {hint}");

    match &actions.primary {
        Some(action) => println!("Action:   {} [{}]", action.label, action.id),
        None if actions.secondary.is_empty() => println!("Action:   (none)"),
        None => {}
    }
    for action in &actions.secondary {
        println!("          {} [{}]", action.label, action.id);
    }
    if !actions.future_steps.is_empty() {
        println!("Next steps:");
        for (i, step) in actions.future_steps.iter().enumerate() {
            println!("  {}. {} — {}", i + 1, step.label, step.reason);
        }
    }
    Ok(())
}
