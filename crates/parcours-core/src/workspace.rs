use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::state::State;
use std::path::Path;

/// Scaffold `.parcours/` in `root`. Idempotent: existing config and state
/// files are left untouched. Returns `true` if anything was created.
pub fn init_project(root: &Path, project: &str) -> Result<bool> {
    io::ensure_dir(&paths::parcours_dir(root))?;
    io::ensure_dir(&paths::cases_dir(root))?;

    let mut created = false;

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        Config::new(project).save(root)?;
        created = true;
    }

    let state_path = paths::state_path(root);
    if !state_path.exists() {
        State::new(project).save(root)?;
        created = true;
    }

    Ok(created)
}
