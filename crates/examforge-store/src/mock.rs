//! In-memory test doubles for the core capability traits.
//!
//! These let the engine run without a data directory or a terminal:
//! scripted answers, a hand-advanced clock, and memory-backed stores that
//! count their calls.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use examforge_core::error::QuizError;
use examforge_core::model::{normalize, Attempt, Participant, Question, SubmittedAnswer};
use examforge_core::traits::{
    AnswerKeyStore, Clock, ParticipantStore, Prompter, QuestionCatalog, ResultsStore,
};

/// A question catalog held in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    sections: HashMap<u32, Vec<Question>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: u32, questions: Vec<Question>) -> Self {
        self.sections.insert(section, questions);
        self
    }
}

impl QuestionCatalog for MemoryCatalog {
    fn load(&self, section: u32) -> Result<Vec<Question>, QuizError> {
        self.sections
            .get(&section)
            .cloned()
            .ok_or_else(|| QuizError::configuration(section, "no questions configured"))
    }
}

/// An answer-key store held in memory; unset questions yield empty sets.
#[derive(Debug, Default)]
pub struct MemoryAnswerKeys {
    keys: HashMap<(u32, u32), BTreeSet<String>>,
}

impl MemoryAnswerKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, section: u32, question: u32, values: &[&str]) {
        self.keys.insert(
            (section, question),
            values.iter().map(|v| normalize(v)).collect(),
        );
    }

    pub fn clear(&mut self, section: u32, question: u32) {
        self.keys.remove(&(section, question));
    }
}

impl AnswerKeyStore for MemoryAnswerKeys {
    fn correct_answers(&self, section: u32, question: u32) -> Result<BTreeSet<String>, QuizError> {
        Ok(self
            .keys
            .get(&(section, question))
            .cloned()
            .unwrap_or_default())
    }
}

/// A participant store held in memory behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryParticipants {
    records: Mutex<HashMap<String, Participant>>,
    save_count: AtomicU32,
}

impl MemoryParticipants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, participant: Participant) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(participant.key(), participant);
        self
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }
}

impl ParticipantStore for MemoryParticipants {
    fn load(&self, key: &str) -> Result<Option<Participant>, QuizError> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn save(&self, participant: &Participant) -> Result<(), QuizError> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        self.records
            .lock()
            .unwrap()
            .insert(participant.key(), participant.clone());
        Ok(())
    }
}

/// An attempt log held in memory. Can be poisoned to fail on append, for
/// exercising the persistence-failure path.
#[derive(Debug, Default)]
pub struct MemoryResults {
    attempts: Mutex<Vec<Attempt>>,
    fail_appends: Mutex<bool>,
}

impl MemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `append` fail with a persistence error.
    pub fn fail_appends(&self) {
        *self.fail_appends.lock().unwrap() = true;
    }

    pub fn len(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultsStore for MemoryResults {
    fn append(&self, attempt: &Attempt) -> Result<(), QuizError> {
        if *self.fail_appends.lock().unwrap() {
            return Err(QuizError::Persistence("append disabled by test".into()));
        }
        self.attempts.lock().unwrap().push(attempt.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Attempt>, QuizError> {
        Ok(self.attempts.lock().unwrap().clone())
    }
}

/// A prompter that pops pre-scripted answers and counts how many
/// questions it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<SubmittedAnswer>>,
    ask_count: AtomicU32,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = SubmittedAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ask_count: AtomicU32::new(0),
        }
    }

    /// A prompter that answers every question with the same single value.
    pub fn always(value: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| SubmittedAnswer::Single(value.to_string())))
    }

    pub fn ask_count(&self) -> u32 {
        self.ask_count.load(Ordering::Relaxed)
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, _question: &Question) -> Result<SubmittedAnswer, QuizError> {
        self.ask_count.fetch_add(1, Ordering::Relaxed);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| QuizError::Prompt("scripted answers exhausted".into()))
    }
}

/// A clock that only moves when advanced by hand.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }
}
