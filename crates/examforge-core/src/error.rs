//! Quiz engine error types.
//!
//! These cover the failure modes of the core: malformed section data,
//! attempt-cap refusals, and backing-store failures. A timed-out session is
//! a normal terminal state of the session machine, not an error, and an
//! out-of-range typed answer is recovered by re-prompting inside the
//! prompter, so neither appears here.

use thiserror::Error;

/// Errors that can occur while administering or aggregating quizzes.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Question or answer-key data for a section is missing or malformed.
    /// Fatal to starting that section; an empty pool is never substituted.
    #[error("section {section} configuration error: {message}")]
    Configuration { section: u32, message: String },

    /// The participant has used up all allowed attempts. A refusal, not a
    /// fault: no session is created and no state changes.
    #[error("attempt limit reached ({attempts}/{limit} attempts used)")]
    AttemptLimitExceeded { attempts: u32, limit: u32 },

    /// No participant record exists under the given key.
    #[error("participant not found: {0}")]
    UnknownParticipant(String),

    /// The participant exists but is not a student; only students sit quizzes.
    #[error("participant '{0}' is not a student")]
    NotAStudent(String),

    /// Reading or writing a backing store failed. Fatal to the operation in
    /// progress. A missing/empty store on read is "no data yet", not this.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// The prompter failed to obtain an answer (e.g. input stream closed).
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl QuizError {
    /// Returns `true` if this error is a user-visible refusal rather than a
    /// system fault, and should be reported without a stack of context.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            QuizError::AttemptLimitExceeded { .. }
                | QuizError::UnknownParticipant(_)
                | QuizError::NotAStudent(_)
        )
    }

    /// Shorthand for a section configuration error.
    pub fn configuration(section: u32, message: impl Into<String>) -> Self {
        QuizError::Configuration {
            section,
            message: message.into(),
        }
    }

    /// Shorthand for a persistence error with source context.
    pub fn persistence(message: impl std::fmt::Display) -> Self {
        QuizError::Persistence(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_classification() {
        assert!(QuizError::AttemptLimitExceeded {
            attempts: 3,
            limit: 3
        }
        .is_refusal());
        assert!(QuizError::UnknownParticipant("7".into()).is_refusal());
        assert!(!QuizError::Persistence("disk full".into()).is_refusal());
        assert!(!QuizError::configuration(1, "no questions").is_refusal());
    }

    #[test]
    fn display_messages() {
        let e = QuizError::AttemptLimitExceeded {
            attempts: 2,
            limit: 2,
        };
        assert_eq!(e.to_string(), "attempt limit reached (2/2 attempts used)");

        let e = QuizError::configuration(3, "question pool is empty");
        assert_eq!(
            e.to_string(),
            "section 3 configuration error: question pool is empty"
        );
    }
}
