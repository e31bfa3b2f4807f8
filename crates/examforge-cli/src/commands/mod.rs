//! Subcommand implementations.

pub mod init;
pub mod register;
pub mod results;
pub mod stats;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use examforge_store::config::{load_config_from, QuizConfig};

/// Resolve the effective configuration for a command: explicit config file
/// if given, `examforge.toml` otherwise, `--data-dir` on top of both.
pub(crate) fn resolve_config(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<QuizConfig> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}
