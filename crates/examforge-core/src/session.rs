//! The quiz session state machine.
//!
//! One session is one attempt at the full quiz: it walks the sections in
//! order, draws a fresh random sample of questions per section, blocks on
//! the prompter for each answer, and scores each section as it completes.
//! The wall-clock deadline is fixed when the session starts and checked
//! only at the boundary before each question; once it passes, the current
//! and all remaining sections are abandoned and only the scores already
//! computed count.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::model::{AnswerSheet, RecordedAnswer, SectionResult};
use crate::scoring::section_score;
use crate::traits::{AnswerKeyStore, Clock, Prompter, QuestionCatalog, SessionObserver};

/// Configuration for one quiz session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Total wall-clock budget for the whole quiz.
    pub time_limit: Duration,
    /// Questions drawn per section, without replacement.
    pub questions_per_section: usize,
    /// Number of sections, traversed as 1..=sections.
    pub sections: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(300),
            questions_per_section: 5,
            sections: 4,
        }
    }
}

/// Session lifecycle states. `Completed` and `TimedOut` are terminal; both
/// lead to persistence, differing only in the flag recorded on the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
    TimedOut,
}

/// What a finished session produced: the recorded section results in
/// section order, and the terminal state it ended in.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub sections: Vec<SectionResult>,
    pub state: SessionState,
}

impl SessionOutcome {
    pub fn timed_out(&self) -> bool {
        self.state == SessionState::TimedOut
    }
}

/// A single quiz attempt in progress.
pub struct QuizSession<'a> {
    config: SessionConfig,
    catalog: &'a dyn QuestionCatalog,
    keys: &'a dyn AnswerKeyStore,
    clock: &'a dyn Clock,
    state: SessionState,
    started_at: Option<Instant>,
    results: Vec<SectionResult>,
}

impl<'a> QuizSession<'a> {
    pub fn new(
        config: SessionConfig,
        catalog: &'a dyn QuestionCatalog,
        keys: &'a dyn AnswerKeyStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            config,
            catalog,
            keys,
            clock,
            state: SessionState::NotStarted,
            started_at: None,
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Time left before the deadline. Before `start` this is the full
    /// budget; afterwards it is `max(0, time_limit - elapsed)`.
    pub fn remaining(&self) -> Duration {
        match self.started_at {
            None => self.config.time_limit,
            Some(started) => {
                let elapsed = self.clock.now().saturating_duration_since(started);
                self.config.time_limit.saturating_sub(elapsed)
            }
        }
    }

    /// Record the start timestamp and move to `InProgress`. This is the
    /// only point where the deadline is established.
    fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.state = SessionState::InProgress;
    }

    /// Run the session to a terminal state.
    ///
    /// Consumes the session: a terminal session cannot be restarted, and
    /// the sample drawn for a section is never reused across attempts.
    pub fn run<R: Rng + ?Sized>(
        mut self,
        prompter: &mut dyn Prompter,
        rng: &mut R,
        observer: &dyn SessionObserver,
    ) -> Result<SessionOutcome, QuizError> {
        self.start();

        'sections: for section in 1..=self.config.sections {
            let sampled = self.draw_sample(section, rng)?;

            let mut keys = BTreeMap::new();
            for question in &sampled {
                keys.insert(question.id, self.keys.correct_answers(section, question.id)?);
            }

            observer.on_section_start(section);
            let mut sheet = AnswerSheet::new();

            for question in &sampled {
                let remaining = self.remaining();
                if remaining.is_zero() {
                    let abandoned = self.config.sections - section + 1;
                    tracing::info!(section, abandoned, "time limit reached");
                    observer.on_timed_out(abandoned);
                    self.state = SessionState::TimedOut;
                    break 'sections;
                }

                // The prompt itself is not clocked; the deadline only
                // applies at the next question boundary.
                observer.on_question(question, remaining);
                let answer = prompter.ask(question)?;
                sheet.record(question.id, answer);
            }

            let score = section_score(&sampled, &keys, &sheet);
            let answers = sampled
                .iter()
                .filter_map(|q| {
                    sheet.get(q.id).map(|submitted| RecordedAnswer {
                        question_id: q.id,
                        submitted: submitted.clone(),
                    })
                })
                .collect();
            self.results.push(SectionResult {
                section,
                score,
                answers,
            });
            observer.on_section_complete(section, score);
        }

        if self.state == SessionState::InProgress {
            self.state = SessionState::Completed;
        }

        Ok(SessionOutcome {
            sections: self.results,
            state: self.state,
        })
    }

    /// Draw this section's sample: an unweighted random subset of the
    /// configured size, without replacement, fresh for every attempt.
    fn draw_sample<R: Rng + ?Sized>(
        &self,
        section: u32,
        rng: &mut R,
    ) -> Result<Vec<crate::model::Question>, QuizError> {
        let pool = self.catalog.load(section)?;
        if pool.is_empty() {
            return Err(QuizError::configuration(section, "question pool is empty"));
        }
        if pool.len() < self.config.questions_per_section {
            return Err(QuizError::configuration(
                section,
                format!(
                    "question pool has {} questions, {} required per attempt",
                    pool.len(),
                    self.config.questions_per_section
                ),
            ));
        }
        Ok(pool
            .choose_multiple(rng, self.config.questions_per_section)
            .cloned()
            .collect())
    }
}
