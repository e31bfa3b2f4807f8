//! Core data model types for examforge.
//!
//! These are the fundamental types the entire examforge system uses to
//! represent questions, participants, submitted answers, and attempts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum score (overall and per section) required to pass, in percent.
pub const PASS_THRESHOLD: f64 = 75.0;

/// The kind of a question, which determines how answers are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Two fixed choices; full credit or nothing.
    TrueFalse,
    /// One correct option; full credit or nothing.
    SingleChoice,
    /// A set of correct options; partial credit by overlap.
    MultipleChoice,
}

impl QuestionKind {
    /// Whether this kind accepts more than one submitted value.
    pub fn is_multi(&self) -> bool {
        matches!(self, QuestionKind::MultipleChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::TrueFalse => write!(f, "true_false"),
            QuestionKind::SingleChoice => write!(f, "single_choice"),
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "true_false" => Ok(QuestionKind::TrueFalse),
            "single_choice" => Ok(QuestionKind::SingleChoice),
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// A single quiz question.
///
/// The correct answers are deliberately not part of this type; they live in
/// the answer-key store so keys can be edited without rewriting question
/// text (see [`crate::traits::AnswerKeyStore`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within a section.
    pub id: u32,
    /// The question text shown to the participant.
    pub text: String,
    /// Ordered option labels. Empty for true/false questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Point value of the question.
    pub points: u32,
    /// How this question is answered and scored.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

/// An answer a participant typed for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmittedAnswer {
    /// One value, for true/false and single-choice questions.
    Single(String),
    /// Several values, for multiple-choice questions.
    Multiple(Vec<String>),
}

impl SubmittedAnswer {
    /// The submitted values as a normalized set. Duplicates collapse and
    /// surrounding whitespace is ignored, so `"1"` and `" 1 "` compare equal.
    pub fn normalized(&self) -> BTreeSet<String> {
        match self {
            SubmittedAnswer::Single(v) => std::iter::once(normalize(v)).collect(),
            SubmittedAnswer::Multiple(vs) => vs.iter().map(|v| normalize(v)).collect(),
        }
    }
}

/// Normalized string form used for all answer comparisons, so numeric and
/// textual encodings of the same answer are interchangeable.
pub fn normalize(value: &str) -> String {
    value.trim().to_string()
}

/// The answers collected for one section, keyed by question id.
///
/// A question with no entry was skipped and scores zero.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: BTreeMap<u32, SubmittedAnswer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: u32, answer: SubmittedAnswer) {
        self.answers.insert(question_id, answer);
    }

    pub fn get(&self, question_id: u32) -> Option<&SubmittedAnswer> {
        self.answers.get(&question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &SubmittedAnswer)> {
        self.answers.iter().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Role of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Numeric student id; its decimal form is the store key.
    pub id: u32,
    pub name: String,
    pub surname: String,
    /// Class/cohort label, e.g. "7-A". Statistics bucket by it.
    pub class_label: String,
    /// How many attempts this student has completed.
    #[serde(default)]
    pub attempt_count: u32,
    /// When the last attempt was completed, if any.
    #[serde(default)]
    pub last_attempt: Option<DateTime<Utc>>,
}

/// A registered teacher, responsible for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
    pub surname: String,
    /// The section this teacher reviews statistics for.
    pub assigned_section: u32,
}

/// A participant record. Role-dependent fields are a tagged union rather
/// than one struct with nullable fields, so a student always has a class
/// label and a teacher always has an assigned section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Participant {
    Student(Student),
    Teacher(Teacher),
}

impl Participant {
    /// The key this participant is stored under: the numeric id for
    /// students, a `name_surname` composite for teachers.
    pub fn key(&self) -> String {
        match self {
            Participant::Student(s) => s.id.to_string(),
            Participant::Teacher(t) => {
                format!("{}_{}", t.name.to_lowercase(), t.surname.to_lowercase())
            }
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Participant::Student(_) => Role::Student,
            Participant::Teacher(_) => Role::Teacher,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Participant::Student(s) => Some(s),
            Participant::Teacher(_) => None,
        }
    }
}

/// One answered question as recorded on a persisted attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub question_id: u32,
    pub submitted: SubmittedAnswer,
}

/// The outcome of one section within an attempt: the score plus exactly
/// the sampled questions that were asked, so statistics can later re-derive
/// correctness against the answer key of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub section: u32,
    /// Section score as a percentage in [0, 100].
    pub score: f64,
    pub answers: Vec<RecordedAnswer>,
}

/// One full traversal of the quiz by one participant. Immutable once
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    /// Unique record identifier.
    pub id: Uuid,
    /// 1-based attempt number for this participant.
    pub sequence: u32,
    /// Store key of the participant who sat the attempt.
    pub participant_key: String,
    /// Class label at the time of the attempt, used for statistics buckets.
    #[serde(default)]
    pub class_label: Option<String>,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Per-section results, in section order. Sections never reached due to
    /// the time limit are absent.
    pub sections: Vec<SectionResult>,
    /// Arithmetic mean of the recorded section scores; 0.0 if none.
    pub overall_score: f64,
    pub passed: bool,
    /// Whether the session ended because the time limit expired.
    pub timed_out: bool,
}

impl Attempt {
    /// Derive the overall score and pass status from recorded sections.
    ///
    /// The overall score is the mean over *recorded* sections only; a
    /// section never reached does not count as zero and does not block a
    /// pass. An attempt with no recorded sections scores 0.0 and fails.
    pub fn evaluate(sections: &[SectionResult]) -> (f64, bool) {
        if sections.is_empty() {
            return (0.0, false);
        }
        let overall = sections.iter().map(|s| s.score).sum::<f64>() / sections.len() as f64;
        let passed =
            overall >= PASS_THRESHOLD && sections.iter().all(|s| s.score >= PASS_THRESHOLD);
        (overall, passed)
    }
}
