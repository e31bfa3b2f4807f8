//! File-backed participant store.
//!
//! All participants live in one JSON document keyed by participant key.
//! Saving is a read-modify-write of the whole document; a missing file is
//! an empty store, not an error.

use std::collections::BTreeMap;
use std::path::PathBuf;

use examforge_core::error::QuizError;
use examforge_core::model::Participant;
use examforge_core::traits::ParticipantStore;

#[derive(Debug, Clone)]
pub struct FileParticipantStore {
    path: PathBuf,
}

impl FileParticipantStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<BTreeMap<String, Participant>, QuizError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(QuizError::Persistence(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            QuizError::Persistence(format!(
                "malformed participant store {}: {e}",
                self.path.display()
            ))
        })
    }

    fn write_document(&self, doc: &BTreeMap<String, Participant>) -> Result<(), QuizError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(QuizError::persistence)?;
        }
        let content = serde_json::to_string_pretty(doc).map_err(QuizError::persistence)?;
        std::fs::write(&self.path, content).map_err(|e| {
            QuizError::Persistence(format!("failed to write {}: {e}", self.path.display()))
        })
    }

    /// Every stored participant, keyed.
    pub fn all(&self) -> Result<BTreeMap<String, Participant>, QuizError> {
        self.read_document()
    }
}

impl ParticipantStore for FileParticipantStore {
    fn load(&self, key: &str) -> Result<Option<Participant>, QuizError> {
        Ok(self.read_document()?.remove(key))
    }

    fn save(&self, participant: &Participant) -> Result<(), QuizError> {
        let mut doc = self.read_document()?;
        doc.insert(participant.key(), participant.clone());
        self.write_document(&doc)
    }
}
