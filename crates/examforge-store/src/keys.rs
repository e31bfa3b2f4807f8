//! File-backed answer-key store.
//!
//! Keys live apart from the question files, in
//! `answer_key_section{N}.json`: a map from question id to the list of
//! correct values. Editing a key never touches question text, and
//! statistics aggregation always reads the key of the day.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use examforge_core::error::QuizError;
use examforge_core::model::normalize;
use examforge_core::traits::AnswerKeyStore;

/// Reads correct-answer sets from per-section JSON key files.
#[derive(Debug, Clone)]
pub struct FileAnswerKeyStore {
    dir: PathBuf,
}

impl FileAnswerKeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn section_path(&self, section: u32) -> PathBuf {
        self.dir.join(format!("answer_key_section{section}.json"))
    }

    fn load_section(&self, section: u32) -> Result<BTreeMap<u32, Vec<String>>, QuizError> {
        let path = self.section_path(section);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            // No key file yet: every question in the section is unkeyed.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(QuizError::configuration(
                    section,
                    format!("cannot read {}: {e}", path.display()),
                ))
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            QuizError::configuration(
                section,
                format!("malformed answer key {}: {e}", path.display()),
            )
        })
    }
}

impl AnswerKeyStore for FileAnswerKeyStore {
    fn correct_answers(&self, section: u32, question: u32) -> Result<BTreeSet<String>, QuizError> {
        let keys = self.load_section(section)?;
        Ok(keys
            .get(&question)
            .map(|values| values.iter().map(|v| normalize(v)).collect())
            .unwrap_or_default())
    }
}

/// Write a section's answer key file, creating the directory if needed.
pub fn write_section_key(
    dir: &Path,
    section: u32,
    keys: &BTreeMap<u32, Vec<String>>,
) -> Result<(), QuizError> {
    std::fs::create_dir_all(dir).map_err(QuizError::persistence)?;
    let path = dir.join(format!("answer_key_section{section}.json"));
    let content = serde_json::to_string_pretty(keys).map_err(QuizError::persistence)?;
    std::fs::write(&path, content).map_err(|e| {
        QuizError::Persistence(format!("failed to write {}: {e}", path.display()))
    })?;
    Ok(())
}
