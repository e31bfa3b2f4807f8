//! The `examforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examforge_store::catalog::{self, FileQuestionCatalog};
use examforge_store::keys::FileAnswerKeyStore;

pub fn execute(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(config_path, data_dir)?;
    let catalog = FileQuestionCatalog::new(&config.data_dir);
    let keys = FileAnswerKeyStore::new(&config.data_dir);

    println!(
        "Validating {} section(s) in {} ({} sampled per attempt)",
        config.sections,
        config.data_dir.display(),
        config.questions_per_section
    );

    let warnings = catalog::validate_sections(
        &catalog,
        &keys,
        config.sections,
        config.questions_per_section,
    )?;

    for warning in &warnings {
        println!("  WARNING: {warning}");
    }

    if warnings.is_empty() {
        println!("All sections valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
