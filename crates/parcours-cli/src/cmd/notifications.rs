use crate::output::{print_json, print_table};
use anyhow::{Context, Result};
use parcours_core::state::State;
use parcours_core::types::Role;
use std::path::Path;

pub fn run(root: &Path, role: Role, mark_read: bool, json: bool) -> Result<()> {
    let mut state = State::load(root).context("failed to load state")?;

    let feed: Vec<_> = state
        .notifications_for(role)
        .into_iter()
        .cloned()
        .collect();

    if json {
        print_json(&feed)?;
    } else if feed.is_empty() {
        println!("No notifications for {role}.");
    } else {
        let rows: Vec<Vec<String>> = feed
            .iter()
            .map(|n| {
                vec![
                    if n.read { " " } else { "*" }.to_string(),
                    n.case_slug.clone(),
                    n.message.clone(),
                ]
            })
            .collect();
        print_table(&["", "CASE", "MESSAGE"], rows);
    }

    if mark_read {
        let changed = state.mark_read(role);
        if changed > 0 {
            state.save(root)?;
        }
        if !json {
            println!("Marked {changed} notification(s) read.");
        }
    }
    Ok(())
}
