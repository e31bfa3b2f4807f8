//! Pure answer scoring.
//!
//! Scoring is a function of the question, the correct-answer set, and the
//! submitted answer only, so a section score computed twice from the same
//! stored answers is always identical.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{AnswerSheet, Question, QuestionKind, SubmittedAnswer};

/// Points earned for one question, in `[0, question.points]`.
///
/// - A skipped question (`None`) earns zero.
/// - True/false and single-choice earn full points iff the single submitted
///   value is a member of the correct set, never a fraction. A multi-value
///   submission against these kinds earns zero.
/// - Multiple-choice earns `points × |submitted ∩ correct| / |correct|`,
///   both sides treated as normalized sets. An empty correct set earns
///   zero, guarding the undefined ratio.
pub fn score_question(
    question: &Question,
    correct: &BTreeSet<String>,
    submitted: Option<&SubmittedAnswer>,
) -> f64 {
    let Some(submitted) = submitted else {
        return 0.0;
    };

    match question.kind {
        QuestionKind::TrueFalse | QuestionKind::SingleChoice => match submitted {
            SubmittedAnswer::Single(value) => {
                if correct.contains(crate::model::normalize(value).as_str()) {
                    f64::from(question.points)
                } else {
                    0.0
                }
            }
            SubmittedAnswer::Multiple(_) => 0.0,
        },
        QuestionKind::MultipleChoice => {
            if correct.is_empty() {
                return 0.0;
            }
            let submitted_set = submitted.normalized();
            let overlap = submitted_set.intersection(correct).count();
            f64::from(question.points) * overlap as f64 / correct.len() as f64
        }
    }
}

/// Section score as a percentage in `[0, 100]`.
///
/// The denominator is the point total of exactly the sampled questions for
/// this attempt, not the full pool. A sample whose total points is zero
/// scores 0.0 rather than dividing by zero.
pub fn section_score(
    sampled: &[Question],
    keys: &BTreeMap<u32, BTreeSet<String>>,
    sheet: &AnswerSheet,
) -> f64 {
    static EMPTY: BTreeSet<String> = BTreeSet::new();

    let total_points: u32 = sampled.iter().map(|q| q.points).sum();
    if total_points == 0 {
        return 0.0;
    }

    let earned: f64 = sampled
        .iter()
        .map(|q| {
            let correct = keys.get(&q.id).unwrap_or(&EMPTY);
            score_question(q, correct, sheet.get(q.id))
        })
        .sum();

    earned / f64::from(total_points) * 100.0
}

/// Whether a recorded answer is fully correct against a key, as used by
/// statistics aggregation: membership for single values, set equality for
/// multi-select. Partial credit does not count as correct here, and an
/// empty key makes every submission incorrect.
pub fn is_fully_correct(correct: &BTreeSet<String>, submitted: &SubmittedAnswer) -> bool {
    if correct.is_empty() {
        return false;
    }
    match submitted {
        SubmittedAnswer::Single(value) => {
            correct.contains(crate::model::normalize(value).as_str())
        }
        SubmittedAnswer::Multiple(_) => submitted.normalized() == *correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, points: u32, kind: QuestionKind) -> Question {
        Question {
            id,
            text: format!("question {id}"),
            options: match kind {
                QuestionKind::TrueFalse => vec![],
                _ => vec!["a".into(), "b".into(), "c".into(), "d".into()],
            },
            points,
            kind,
        }
    }

    fn key(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn skipped_question_scores_zero() {
        let q = question(1, 10, QuestionKind::SingleChoice);
        assert_eq!(score_question(&q, &key(&["2"]), None), 0.0);
    }

    #[test]
    fn single_choice_is_all_or_nothing() {
        let q = question(1, 10, QuestionKind::SingleChoice);
        let correct = key(&["2"]);

        let right = SubmittedAnswer::Single("2".into());
        assert_eq!(score_question(&q, &correct, Some(&right)), 10.0);

        let wrong = SubmittedAnswer::Single("3".into());
        assert_eq!(score_question(&q, &correct, Some(&wrong)), 0.0);
    }

    #[test]
    fn single_choice_comparison_is_normalized() {
        let q = question(1, 5, QuestionKind::TrueFalse);
        let answer = SubmittedAnswer::Single(" 1 ".into());
        assert_eq!(score_question(&q, &key(&["1"]), Some(&answer)), 5.0);
    }

    #[test]
    fn multi_submission_against_single_kind_scores_zero() {
        let q = question(1, 10, QuestionKind::SingleChoice);
        let answer = SubmittedAnswer::Multiple(vec!["2".into()]);
        assert_eq!(score_question(&q, &key(&["2"]), Some(&answer)), 0.0);
    }

    #[test]
    fn multiple_choice_partial_credit() {
        // Correct set {1, 3}, 10 points, submitted {1}: 10 * 1/2 = 5.0.
        let q = question(1, 10, QuestionKind::MultipleChoice);
        let answer = SubmittedAnswer::Multiple(vec!["1".into()]);
        assert_eq!(score_question(&q, &key(&["1", "3"]), Some(&answer)), 5.0);
    }

    #[test]
    fn multiple_choice_full_credit_iff_set_equal() {
        let q = question(1, 12, QuestionKind::MultipleChoice);
        let correct = key(&["1", "3", "4"]);

        let exact = SubmittedAnswer::Multiple(vec!["3".into(), "1".into(), "4".into()]);
        assert_eq!(score_question(&q, &correct, Some(&exact)), 12.0);

        // Extra wrong picks do not add to the overlap; 2 of 3 correct.
        let with_noise = SubmittedAnswer::Multiple(vec!["1".into(), "3".into(), "2".into()]);
        assert!((score_question(&q, &correct, Some(&with_noise)) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn multiple_choice_duplicates_collapse() {
        let q = question(1, 10, QuestionKind::MultipleChoice);
        let answer = SubmittedAnswer::Multiple(vec!["1".into(), "1".into(), "1".into()]);
        assert_eq!(score_question(&q, &key(&["1", "3"]), Some(&answer)), 5.0);
    }

    #[test]
    fn empty_key_scores_zero_for_any_submission() {
        let q = question(1, 10, QuestionKind::MultipleChoice);
        let answer = SubmittedAnswer::Multiple(vec!["1".into(), "2".into()]);
        assert_eq!(score_question(&q, &BTreeSet::new(), Some(&answer)), 0.0);

        let q = question(2, 10, QuestionKind::SingleChoice);
        let answer = SubmittedAnswer::Single("1".into());
        assert_eq!(score_question(&q, &BTreeSet::new(), Some(&answer)), 0.0);
    }

    #[test]
    fn section_score_over_sampled_points_only() {
        let sampled = vec![
            question(1, 10, QuestionKind::SingleChoice),
            question(2, 10, QuestionKind::MultipleChoice),
        ];
        let mut keys = BTreeMap::new();
        keys.insert(1, key(&["2"]));
        keys.insert(2, key(&["1", "3"]));

        let mut sheet = AnswerSheet::new();
        sheet.record(1, SubmittedAnswer::Single("2".into()));
        sheet.record(2, SubmittedAnswer::Multiple(vec!["1".into()]));

        // 10 + 5 of 20 points = 75%.
        let score = section_score(&sampled, &keys, &sheet);
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn section_score_zero_total_points_guard() {
        let sampled = vec![question(1, 0, QuestionKind::SingleChoice)];
        let score = section_score(&sampled, &BTreeMap::new(), &AnswerSheet::new());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn section_score_is_idempotent() {
        let sampled = vec![question(1, 7, QuestionKind::TrueFalse)];
        let mut keys = BTreeMap::new();
        keys.insert(1, key(&["1"]));
        let mut sheet = AnswerSheet::new();
        sheet.record(1, SubmittedAnswer::Single("1".into()));

        let first = section_score(&sampled, &keys, &sheet);
        let second = section_score(&sampled, &keys, &sheet);
        assert_eq!(first, second);
        assert_eq!(first, 100.0);
    }

    #[test]
    fn fully_correct_classification() {
        let correct = key(&["1", "3"]);
        assert!(is_fully_correct(
            &correct,
            &SubmittedAnswer::Multiple(vec!["3".into(), "1".into()])
        ));
        // Partial overlap is not "correct" for aggregation.
        assert!(!is_fully_correct(
            &correct,
            &SubmittedAnswer::Multiple(vec!["1".into()])
        ));
        assert!(is_fully_correct(
            &key(&["2"]),
            &SubmittedAnswer::Single("2".into())
        ));
        assert!(!is_fully_correct(
            &BTreeSet::new(),
            &SubmittedAnswer::Single("2".into())
        ));
    }
}
