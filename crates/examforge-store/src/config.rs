//! Configuration loading.
//!
//! Settings come from `examforge.toml` in the working directory (or an
//! explicit path), with environment-variable overrides on top and safe
//! defaults underneath. The pass threshold is intentionally absent: it is
//! a fixed constant of the grading policy, not a deployment knob.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use examforge_core::engine::EngineConfig;
use examforge_core::error::QuizError;

/// Deployment configuration for examforge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Wall-clock budget for one full attempt, in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Completed attempts allowed per student.
    #[serde(default = "default_attempt_limit")]
    pub attempt_limit: u32,
    /// Questions sampled per section.
    #[serde(default = "default_questions_per_section")]
    pub questions_per_section: usize,
    /// Number of sections.
    #[serde(default = "default_sections")]
    pub sections: u32,
    /// Directory holding question files, answer keys, participants, and
    /// the attempt log.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_time_limit() -> u64 {
    300
}
fn default_attempt_limit() -> u32 {
    3
}
fn default_questions_per_section() -> usize {
    5
}
fn default_sections() -> u32 {
    4
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./examforge-data")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            attempt_limit: default_attempt_limit(),
            questions_per_section: default_questions_per_section(),
            sections: default_sections(),
            data_dir: default_data_dir(),
        }
    }
}

impl QuizConfig {
    /// The engine-facing view of this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            time_limit: Duration::from_secs(self.time_limit_secs),
            attempt_limit: self.attempt_limit,
            questions_per_section: self.questions_per_section,
            sections: self.sections,
        }
    }
}

/// Load configuration from the default location (`examforge.toml` in the
/// current directory), falling back to defaults if absent.
pub fn load_config() -> Result<QuizConfig, QuizError> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default location.
/// Environment overrides (`EXAMFORGE_TIME_LIMIT`, `EXAMFORGE_ATTEMPT_LIMIT`,
/// `EXAMFORGE_QUESTIONS_PER_SECTION`, `EXAMFORGE_SECTIONS`,
/// `EXAMFORGE_DATA_DIR`) are applied on top of whatever was read.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig, QuizError> {
    let config_path = match path {
        Some(p) => {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(QuizError::Persistence(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
        }
        None => {
            let local = PathBuf::from("examforge.toml");
            local.exists().then_some(local)
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                QuizError::Persistence(format!("failed to read config {}: {e}", path.display()))
            })?;
            toml::from_str::<QuizConfig>(&content).map_err(|e| {
                QuizError::Persistence(format!("failed to parse config {}: {e}", path.display()))
            })?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizConfig) {
    if let Some(v) = env_parse("EXAMFORGE_TIME_LIMIT") {
        config.time_limit_secs = v;
    }
    if let Some(v) = env_parse("EXAMFORGE_ATTEMPT_LIMIT") {
        config.attempt_limit = v;
    }
    if let Some(v) = env_parse("EXAMFORGE_QUESTIONS_PER_SECTION") {
        config.questions_per_section = v;
    }
    if let Some(v) = env_parse("EXAMFORGE_SECTIONS") {
        config.sections = v;
    }
    if let Ok(dir) = std::env::var("EXAMFORGE_DATA_DIR") {
        if !dir.is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    match std::env::var(name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(var = name, value, "ignoring unparseable override");
                None
            }
        },
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.time_limit_secs, 300);
        assert_eq!(config.attempt_limit, 3);
        assert_eq!(config.questions_per_section, 5);
        assert_eq!(config.sections, 4);
    }

    #[test]
    fn engine_config_carries_the_time_limit() {
        let config = QuizConfig {
            time_limit_secs: 120,
            ..QuizConfig::default()
        };
        assert_eq!(config.engine_config().time_limit, Duration::from_secs(120));
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: QuizConfig = toml::from_str("attempt_limit = 2").unwrap();
        assert_eq!(config.attempt_limit, 2);
        assert_eq!(config.sections, 4);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/examforge.toml"))).unwrap_err();
        assert!(matches!(err, QuizError::Persistence(_)));
    }

    #[test]
    fn env_override_applies() {
        std::env::set_var("EXAMFORGE_ATTEMPT_LIMIT", "7");
        let mut config = QuizConfig::default();
        apply_env_overrides(&mut config);
        std::env::remove_var("EXAMFORGE_ATTEMPT_LIMIT");
        assert_eq!(config.attempt_limit, 7);
    }
}
