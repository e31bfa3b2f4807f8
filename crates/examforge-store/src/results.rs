//! Append-only attempt log.
//!
//! One JSON document per line in `attempts.jsonl`. Appending opens the file
//! in append mode and writes a single line, so previously committed records
//! are never rewritten; a failed append cannot corrupt them. A missing file
//! reads as an empty history.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use examforge_core::error::QuizError;
use examforge_core::model::Attempt;
use examforge_core::traits::ResultsStore;

#[derive(Debug, Clone)]
pub struct JsonlResultsStore {
    path: PathBuf,
}

impl JsonlResultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ResultsStore for JsonlResultsStore {
    fn append(&self, attempt: &Attempt) -> Result<(), QuizError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(QuizError::persistence)?;
        }
        let line = serde_json::to_string(attempt).map_err(QuizError::persistence)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                QuizError::Persistence(format!("failed to open {}: {e}", self.path.display()))
            })?;
        writeln!(file, "{line}").map_err(|e| {
            QuizError::Persistence(format!("failed to append to {}: {e}", self.path.display()))
        })?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Attempt>, QuizError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(QuizError::Persistence(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    QuizError::Persistence(format!(
                        "corrupt attempt record in {}: {e}",
                        self.path.display()
                    ))
                })
            })
            .collect()
    }
}
