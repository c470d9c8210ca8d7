use anyhow::{Result, anyhow};
use bvm_core::Config;
use bvm_core::installed::list_installed;

use crate::ui::Output;

/// List the archives and extracted releases in the source directory.
pub fn list() -> Result<()> {
    let config = Config::load()?;
    let source_dir = &config.source_dir;
    let entries = list_installed(source_dir)
        .map_err(|e| anyhow!("Failed to read {}: {e}", source_dir.display()))?;

    if entries.is_empty() {
        println!("No Blender versions installed in {}.", source_dir.display());
        println!("Run 'bvm install <version>' to get started.");
        return Ok(());
    }

    Output::new(false).print_list(
        &format!("Listing all available versions in {}...", source_dir.display()),
        &entries,
    );
    Ok(())
}
