//! File-backed question catalog.
//!
//! Each section lives in `questions_section{N}.json` under the data
//! directory, a document of the form `{ "questions": [...] }`. Question
//! files carry no correct answers; those are the answer-key store's
//! concern (see [`crate::keys`]).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use examforge_core::error::QuizError;
use examforge_core::model::{Question, QuestionKind};
use examforge_core::traits::{AnswerKeyStore, QuestionCatalog};

#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

/// Reads question pools from per-section JSON files.
#[derive(Debug, Clone)]
pub struct FileQuestionCatalog {
    dir: PathBuf,
}

impl FileQuestionCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a section's question file.
    pub fn section_path(&self, section: u32) -> PathBuf {
        self.dir.join(format!("questions_section{section}.json"))
    }
}

impl QuestionCatalog for FileQuestionCatalog {
    fn load(&self, section: u32) -> Result<Vec<Question>, QuizError> {
        let path = self.section_path(section);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            QuizError::configuration(
                section,
                format!("cannot read {}: {e}", path.display()),
            )
        })?;
        let file: QuestionFile = serde_json::from_str(&content).map_err(|e| {
            QuizError::configuration(
                section,
                format!("malformed question file {}: {e}", path.display()),
            )
        })?;
        Ok(file.questions)
    }
}

/// A warning from question/key validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub section: u32,
    /// The question id, where applicable.
    pub question_id: Option<u32>,
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.question_id {
            Some(id) => write!(f, "section {} question {}: {}", self.section, id, self.message),
            None => write!(f, "section {}: {}", self.section, self.message),
        }
    }
}

/// Validate every section's question pool and answer keys for common
/// issues. Hard load failures surface as errors; everything else comes
/// back as warnings.
pub fn validate_sections(
    catalog: &dyn QuestionCatalog,
    keys: &dyn AnswerKeyStore,
    sections: u32,
    questions_per_section: usize,
) -> Result<Vec<ValidationWarning>, QuizError> {
    let mut warnings = Vec::new();

    for section in 1..=sections {
        let pool = catalog.load(section)?;

        if pool.len() < questions_per_section {
            warnings.push(ValidationWarning {
                section,
                question_id: None,
                message: format!(
                    "pool has {} questions, {questions_per_section} are sampled per attempt",
                    pool.len()
                ),
            });
        }

        let mut seen = HashSet::new();
        for question in &pool {
            let warn = |message: String| ValidationWarning {
                section,
                question_id: Some(question.id),
                message,
            };

            if !seen.insert(question.id) {
                warnings.push(warn(format!("duplicate question id {}", question.id)));
            }
            if question.points == 0 {
                warnings.push(warn("question is worth zero points".into()));
            }
            if question.kind != QuestionKind::TrueFalse && question.options.len() < 2 {
                warnings.push(warn("choice question has fewer than two options".into()));
            }

            let key = keys.correct_answers(section, question.id)?;
            if key.is_empty() {
                warnings.push(warn("no answer key; every submission will score zero".into()));
            } else if !question.kind.is_multi() && key.len() > 1 {
                warnings.push(warn(format!(
                    "{} answers keyed for a single-answer question",
                    key.len()
                )));
            }

            // Numeric keys must stay inside the option range.
            let option_count = match question.kind {
                QuestionKind::TrueFalse => 2,
                _ => question.options.len(),
            };
            for value in &key {
                if let Ok(index) = value.parse::<usize>() {
                    if index < 1 || index > option_count {
                        warnings.push(warn(format!(
                            "keyed answer '{value}' is outside options 1..={option_count}"
                        )));
                    }
                }
            }
        }
    }

    Ok(warnings)
}

/// Write a section's question pool, creating the directory if needed.
/// Used by scaffolding; live editing of the catalog is out of the core's
/// scope.
pub fn write_section(
    dir: &Path,
    section: u32,
    questions: &[Question],
) -> Result<(), QuizError> {
    std::fs::create_dir_all(dir).map_err(QuizError::persistence)?;
    let path = dir.join(format!("questions_section{section}.json"));
    let doc = serde_json::json!({ "questions": questions });
    let content = serde_json::to_string_pretty(&doc).map_err(QuizError::persistence)?;
    std::fs::write(&path, content).map_err(|e| {
        QuizError::Persistence(format!("failed to write {}: {e}", path.display()))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::FileAnswerKeyStore;
    use crate::mock::MemoryAnswerKeys;

    fn question(id: u32, kind: QuestionKind, points: u32) -> Question {
        Question {
            id,
            text: format!("q{id}"),
            options: match kind {
                QuestionKind::TrueFalse => vec![],
                _ => vec!["a".into(), "b".into(), "c".into()],
            },
            points,
            kind,
        }
    }

    #[test]
    fn load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let pool = vec![
            question(1, QuestionKind::SingleChoice, 10),
            question(2, QuestionKind::TrueFalse, 5),
        ];
        write_section(dir.path(), 1, &pool).unwrap();

        let catalog = FileQuestionCatalog::new(dir.path());
        let loaded = catalog.load(1).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[1].kind, QuestionKind::TrueFalse);
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileQuestionCatalog::new(dir.path());
        let err = catalog.load(3).unwrap_err();
        assert!(matches!(err, QuizError::Configuration { section: 3, .. }));
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions_section1.json");
        std::fs::write(&path, "{ not json").unwrap();

        let catalog = FileQuestionCatalog::new(dir.path());
        let err = catalog.load(1).unwrap_err();
        assert!(matches!(err, QuizError::Configuration { section: 1, .. }));
    }

    #[test]
    fn validation_flags_common_issues() {
        let dir = tempfile::tempdir().unwrap();
        let pool = vec![
            question(1, QuestionKind::SingleChoice, 10),
            question(1, QuestionKind::SingleChoice, 0), // duplicate id, zero points
        ];
        write_section(dir.path(), 1, &pool).unwrap();

        let catalog = FileQuestionCatalog::new(dir.path());
        let keys = FileAnswerKeyStore::new(dir.path()); // no key files at all

        let warnings = validate_sections(&catalog, &keys, 1, 5).unwrap();
        let messages: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate question id")));
        assert!(messages.iter().any(|m| m.contains("zero points")));
        assert!(messages.iter().any(|m| m.contains("no answer key")));
        assert!(messages.iter().any(|m| m.contains("are sampled per attempt")));
    }

    #[test]
    fn validation_flags_out_of_range_key() {
        let dir = tempfile::tempdir().unwrap();
        write_section(
            dir.path(),
            1,
            &[question(1, QuestionKind::SingleChoice, 10)],
        )
        .unwrap();

        let catalog = FileQuestionCatalog::new(dir.path());
        let mut keys = MemoryAnswerKeys::new();
        keys.set(1, 1, &["9"]); // only 3 options

        let warnings = validate_sections(&catalog, &keys, 1, 1).unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("outside options")));
    }

    #[test]
    fn clean_section_produces_no_warnings() {
        let dir = tempfile::tempdir().unwrap();
        write_section(
            dir.path(),
            1,
            &[question(1, QuestionKind::SingleChoice, 10)],
        )
        .unwrap();

        let catalog = FileQuestionCatalog::new(dir.path());
        let mut keys = MemoryAnswerKeys::new();
        keys.set(1, 1, &["2"]);

        let warnings = validate_sections(&catalog, &keys, 1, 1).unwrap();
        assert!(warnings.is_empty(), "unexpected: {warnings:?}");
    }
}
