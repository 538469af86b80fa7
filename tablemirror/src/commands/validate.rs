// tablemirror/src/commands/validate.rs
//
// USE CASE: Validate the external sources document only.

use std::path::Path;

use tablemirror_core::MirrorError;
use tablemirror_core::application::plan_mirror;
use tablemirror_core::domain::validate_document;
use tablemirror_core::infrastructure::config::load_document;

pub fn execute(config: &Path) -> anyhow::Result<()> {
    println!("⚙️  Loading {}...", config.display());
    let document = load_document(config).map_err(MirrorError::from)?;

    let summary = validate_document(&document).map_err(MirrorError::from)?;
    // Column types are only checked once mapped.
    plan_mirror(&document)?;

    println!("✅ Validation succeeded.");
    println!("   External sources: {}", summary.external_sources);
    println!("   Tables:           {}", summary.tables);
    println!("   File sources:     {}", summary.file_sources);
    println!("   Processes:        {}", summary.processes);
    Ok(())
}
