use anyhow::Result;
use std::path::Path;

pub fn run(root: &Path, port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(parcours_server::serve(root.to_path_buf(), port))
}
