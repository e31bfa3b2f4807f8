//! Cumulative statistics over the persisted attempt history.
//!
//! Aggregation is always recomputed on demand from the full history; it is
//! never maintained incrementally, trading recomputation cost for the
//! guarantee that the view can never drift from the log. Correctness is
//! re-derived against the answer key as it exists at aggregation time:
//! editing a key rewrites history's aggregates, since no key snapshot is
//! persisted with an attempt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Attempt, PASS_THRESHOLD};
use crate::scoring::is_fully_correct;
use crate::traits::AnswerKeyStore;

/// Correct/incorrect counts for one question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTally {
    pub correct: u32,
    pub incorrect: u32,
}

impl QuestionTally {
    fn bump(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Fraction answered correctly; 0.0 when nothing was tallied.
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total())
        }
    }
}

/// Whether a score sits above or below its class average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    AboveAverage,
    BelowAverage,
}

/// Per-question correctness tallies for one section, overall and broken
/// down by class label. Derived, never stored as ground truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionStatistics {
    pub section: u32,
    /// Question id → tally across every class.
    pub overall: BTreeMap<u32, QuestionTally>,
    /// Class label → question id → tally.
    pub by_class: BTreeMap<String, BTreeMap<u32, QuestionTally>>,
}

impl SectionStatistics {
    /// A class's success rate across all its tallied answers for this
    /// section: correct / (correct + incorrect). `None` if the class has
    /// no tallied answers.
    pub fn class_success_rate(&self, class_label: &str) -> Option<f64> {
        let tallies = self.by_class.get(class_label)?;
        let (correct, total) = tallies
            .values()
            .fold((0u32, 0u32), |(c, t), tally| {
                (c + tally.correct, t + tally.total())
            });
        if total == 0 {
            None
        } else {
            Some(f64::from(correct) / f64::from(total))
        }
    }

    /// Flag a section score (0–100) against its class average. A score
    /// equal to the average counts as above, not below.
    pub fn standing(&self, section_score: f64, class_label: &str) -> Option<Standing> {
        let rate = self.class_success_rate(class_label)?;
        if section_score >= rate * 100.0 {
            Some(Standing::AboveAverage)
        } else {
            Some(Standing::BelowAverage)
        }
    }
}

/// Build the cumulative statistics for a section by scanning every
/// persisted attempt across every participant.
///
/// Only the questions a participant was actually asked (the stored sampled
/// subset) are tallied. Classification is boolean: a multi-select answer
/// that earned partial credit counts as incorrect here. Attempts without a
/// class label contribute to the overall bucket only.
pub fn aggregate(
    section: u32,
    attempts: &[Attempt],
    keys: &dyn AnswerKeyStore,
) -> Result<SectionStatistics, QuizError> {
    let mut stats = SectionStatistics {
        section,
        overall: BTreeMap::new(),
        by_class: BTreeMap::new(),
    };

    for attempt in attempts {
        let Some(result) = attempt.sections.iter().find(|s| s.section == section) else {
            continue;
        };
        for recorded in &result.answers {
            let correct_set = keys.correct_answers(section, recorded.question_id)?;
            let correct = is_fully_correct(&correct_set, &recorded.submitted);

            stats
                .overall
                .entry(recorded.question_id)
                .or_default()
                .bump(correct);

            if let Some(class) = &attempt.class_label {
                stats
                    .by_class
                    .entry(class.clone())
                    .or_default()
                    .entry(recorded.question_id)
                    .or_default()
                    .bump(correct);
            }
        }
    }

    Ok(stats)
}

/// Headline figures for a section across its attempt history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Attempts that recorded a score for this section.
    pub participants: usize,
    /// Mean of those section scores.
    pub average_score: f64,
    /// Percentage of those scores at or above the pass threshold.
    pub pass_rate: f64,
}

/// Summarize a section's recorded scores; `None` when no attempt reached
/// the section.
pub fn summarize(section: u32, attempts: &[Attempt]) -> Option<SectionSummary> {
    let scores: Vec<f64> = attempts
        .iter()
        .filter_map(|a| {
            a.sections
                .iter()
                .find(|s| s.section == section)
                .map(|s| s.score)
        })
        .collect();

    if scores.is_empty() {
        return None;
    }

    let average_score = scores.iter().sum::<f64>() / scores.len() as f64;
    let passed = scores.iter().filter(|s| **s >= PASS_THRESHOLD).count();
    Some(SectionSummary {
        participants: scores.len(),
        average_score,
        pass_rate: passed as f64 / scores.len() as f64 * 100.0,
    })
}
