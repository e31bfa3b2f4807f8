//! Capability traits the quiz engine consumes.
//!
//! The engine never touches files or terminals directly: question banks,
//! answer keys, participant records, the attempt log, the clock, and the
//! participant-facing prompt are all behind these seams. `examforge-store`
//! provides the file-backed implementations and in-memory test doubles;
//! the CLI provides the console prompter and observer.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::error::QuizError;
use crate::model::{Attempt, Participant, Question, SubmittedAnswer};

/// Supplies the ordered question pool for a section.
pub trait QuestionCatalog {
    fn load(&self, section: u32) -> Result<Vec<Question>, QuizError>;
}

/// Supplies the correct-answer set per question, independent of the
/// question text so keys can be edited without rewriting the catalog.
pub trait AnswerKeyStore {
    /// The correct answers for a question, in normalized string form.
    /// Returns the empty set if no key is configured for the question.
    fn correct_answers(&self, section: u32, question: u32) -> Result<BTreeSet<String>, QuizError>;
}

/// Blocks until the participant submits an answer to a question.
///
/// Implementations own input validation: an answer outside the option range
/// is re-prompted locally and never surfaces to the session. There is no
/// timeout on the call itself; the session enforces its deadline only at
/// the boundary before each question.
pub trait Prompter {
    fn ask(&mut self, question: &Question) -> Result<SubmittedAnswer, QuizError>;
}

/// Loads and saves participant records.
pub trait ParticipantStore {
    /// `Ok(None)` if no record exists under the key.
    fn load(&self, key: &str) -> Result<Option<Participant>, QuizError>;
    fn save(&self, participant: &Participant) -> Result<(), QuizError>;
}

/// Append-only log of completed attempts.
///
/// `append` must never lose previously persisted records, and `read_all`
/// must treat a missing or empty backing store as an empty history rather
/// than an error.
pub trait ResultsStore {
    fn append(&self, attempt: &Attempt) -> Result<(), QuizError>;

    /// Every persisted attempt across every participant, oldest first.
    fn read_all(&self) -> Result<Vec<Attempt>, QuizError>;

    /// One participant's attempts, oldest first. Empty if none exist.
    fn attempts_for(&self, key: &str) -> Result<Vec<Attempt>, QuizError> {
        let mut attempts = self.read_all()?;
        attempts.retain(|a| a.participant_key == key);
        Ok(attempts)
    }
}

/// Monotonic time source for the session deadline, injectable for tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Progress callbacks emitted while a session runs, so the caller can
/// render banners and running scores without the core printing anything.
pub trait SessionObserver {
    fn on_section_start(&self, section: u32);
    fn on_question(&self, question: &Question, remaining: Duration);
    fn on_section_complete(&self, section: u32, score: f64);
    /// The deadline passed; `sections_abandoned` counts the current and all
    /// later sections that will not be scored.
    fn on_timed_out(&self, sections_abandoned: u32);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_section_start(&self, _: u32) {}
    fn on_question(&self, _: &Question, _: Duration) {}
    fn on_section_complete(&self, _: u32, _: f64) {}
    fn on_timed_out(&self, _: u32) {}
}
