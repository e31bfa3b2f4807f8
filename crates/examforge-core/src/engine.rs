//! Attempt orchestration.
//!
//! `QuizEngine` wires the capability seams together for one attempt: the
//! ledger gates the start, the session runs to a terminal state, and the
//! finished attempt is appended to the results log before the student's
//! attempt count is bumped. Each engine call owns its borrowed stores; there
//! is no ambient shared state, so concurrent callers need only serialize
//! persistence per participant key.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::error::QuizError;
use crate::ledger::AttemptLedger;
use crate::model::{Attempt, Participant};
use crate::session::{QuizSession, SessionConfig};
use crate::traits::{
    AnswerKeyStore, Clock, ParticipantStore, Prompter, QuestionCatalog, ResultsStore,
    SessionObserver,
};

/// Deployment-level knobs for the engine. The pass threshold is fixed
/// (see [`crate::model::PASS_THRESHOLD`]) and deliberately not here.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock budget for one full attempt.
    pub time_limit: Duration,
    /// Completed attempts allowed per student.
    pub attempt_limit: u32,
    /// Questions sampled per section.
    pub questions_per_section: usize,
    /// Number of sections.
    pub sections: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(300),
            attempt_limit: 3,
            questions_per_section: 5,
            sections: 4,
        }
    }
}

/// The central quiz engine.
pub struct QuizEngine<'a> {
    catalog: &'a dyn QuestionCatalog,
    keys: &'a dyn AnswerKeyStore,
    participants: &'a dyn ParticipantStore,
    results: &'a dyn ResultsStore,
    clock: &'a dyn Clock,
    config: EngineConfig,
}

impl<'a> QuizEngine<'a> {
    pub fn new(
        catalog: &'a dyn QuestionCatalog,
        keys: &'a dyn AnswerKeyStore,
        participants: &'a dyn ParticipantStore,
        results: &'a dyn ResultsStore,
        clock: &'a dyn Clock,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            keys,
            participants,
            results,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one complete attempt for the student stored under
    /// `participant_key` and persist the result.
    ///
    /// Refusals (`UnknownParticipant`, `NotAStudent`,
    /// `AttemptLimitExceeded`) happen before any session exists and leave
    /// no side effects. A persistence failure aborts the operation without
    /// touching previously committed records.
    pub fn run_attempt<R: Rng + ?Sized>(
        &self,
        participant_key: &str,
        prompter: &mut dyn Prompter,
        rng: &mut R,
        observer: &dyn SessionObserver,
    ) -> Result<Attempt, QuizError> {
        let participant = self
            .participants
            .load(participant_key)?
            .ok_or_else(|| QuizError::UnknownParticipant(participant_key.to_string()))?;

        let mut student = match participant {
            Participant::Student(s) => s,
            Participant::Teacher(_) => {
                return Err(QuizError::NotAStudent(participant_key.to_string()))
            }
        };

        let ledger = AttemptLedger::new(self.config.attempt_limit);
        if !ledger.can_attempt(&student) {
            return Err(QuizError::AttemptLimitExceeded {
                attempts: student.attempt_count,
                limit: ledger.limit(),
            });
        }

        let sequence = self.results.attempts_for(participant_key)?.len() as u32 + 1;
        let started_at = Utc::now();

        let session = QuizSession::new(
            SessionConfig {
                time_limit: self.config.time_limit,
                questions_per_section: self.config.questions_per_section,
                sections: self.config.sections,
            },
            self.catalog,
            self.keys,
            self.clock,
        );
        let outcome = session.run(prompter, rng, observer)?;

        let (overall_score, passed) = Attempt::evaluate(&outcome.sections);
        let attempt = Attempt {
            id: Uuid::new_v4(),
            sequence,
            participant_key: participant_key.to_string(),
            class_label: Some(student.class_label.clone()),
            started_at,
            timed_out: outcome.timed_out(),
            sections: outcome.sections,
            overall_score,
            passed,
        };

        self.results.append(&attempt)?;

        ledger.record_attempt(&mut student, Utc::now());
        self.participants.save(&Participant::Student(student))?;

        tracing::info!(
            participant = participant_key,
            sequence,
            overall = attempt.overall_score,
            passed = attempt.passed,
            timed_out = attempt.timed_out,
            "attempt recorded"
        );

        Ok(attempt)
    }
}
