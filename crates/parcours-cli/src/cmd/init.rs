use anyhow::Result;
use std::path::Path;

pub fn run(root: &Path, project: Option<&str>) -> Result<()> {
    let name = match project {
        Some(p) => p.to_string(),
        None => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "parcours".to_string()),
    };

    let created = parcours_core::workspace::init_project(root, &name)?;
    if created {
        println!("Initialized parcours project '{name}' in {}", root.display());
    } else {
        println!("parcours already initialized in {}", root.display());
    }
    Ok(())
}
