//! Terminal prompter and progress observer for the `take` command.

use std::io::{BufRead, Write};
use std::time::Duration;

use examforge_core::error::QuizError;
use examforge_core::model::{Question, QuestionKind, SubmittedAnswer};
use examforge_core::traits::{Prompter, SessionObserver};

/// Asks questions on the terminal and re-prompts until the input is a
/// valid option number (or a comma-separated list of them, for
/// multiple-choice). Invalid input never reaches the session.
pub struct ConsolePrompter<R> {
    input: R,
}

impl ConsolePrompter<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: std::io::stdin().lock(),
        }
    }
}

impl<R: BufRead> ConsolePrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self) -> Result<String, QuizError> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| QuizError::Prompt(format!("failed to read input: {e}")))?;
        if n == 0 {
            return Err(QuizError::Prompt("input closed".into()));
        }
        Ok(line.trim().to_string())
    }
}

fn option_labels(question: &Question) -> Vec<String> {
    match question.kind {
        QuestionKind::TrueFalse => vec!["True".to_string(), "False".to_string()],
        _ => question.options.clone(),
    }
}

/// Parse "2" or "1,3" against the option count. `None` means re-prompt.
fn parse_selection(line: &str, option_count: usize, multi: bool) -> Option<Vec<String>> {
    let parts: Vec<&str> = line
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    if !multi && parts.len() > 1 {
        return None;
    }
    let mut values = Vec::with_capacity(parts.len());
    for part in parts {
        let index: usize = part.parse().ok()?;
        if index < 1 || index > option_count {
            return None;
        }
        values.push(index.to_string());
    }
    Some(values)
}

impl<R: BufRead> Prompter for ConsolePrompter<R> {
    fn ask(&mut self, question: &Question) -> Result<SubmittedAnswer, QuizError> {
        let labels = option_labels(question);
        println!("\n{} ({} pts)", question.text, question.points);
        for (i, label) in labels.iter().enumerate() {
            println!("  {}) {label}", i + 1);
        }

        loop {
            if question.kind.is_multi() {
                print!("Your answers (comma-separated, e.g. 1,3): ");
            } else {
                print!("Your answer: ");
            }
            std::io::stdout().flush().ok();

            let line = self.read_line()?;
            match parse_selection(&line, labels.len(), question.kind.is_multi()) {
                Some(values) if question.kind.is_multi() => {
                    return Ok(SubmittedAnswer::Multiple(values));
                }
                Some(mut values) => {
                    return Ok(SubmittedAnswer::Single(values.remove(0)));
                }
                None => {
                    println!("Please enter a number between 1 and {}.", labels.len());
                }
            }
        }
    }
}

/// Prints section banners, the remaining time before each question, and
/// running section scores.
pub struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_section_start(&self, section: u32) {
        println!("\n=== Section {section} ===");
    }

    fn on_question(&self, _question: &Question, remaining: Duration) {
        println!("[{}s remaining]", remaining.as_secs());
    }

    fn on_section_complete(&self, section: u32, score: f64) {
        println!("Section {section} score: {score:.1}%");
    }

    fn on_timed_out(&self, sections_abandoned: u32) {
        println!("\nTime is up. {sections_abandoned} section(s) were not scored.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(kind: QuestionKind, options: usize) -> Question {
        Question {
            id: 1,
            text: "q".into(),
            options: (0..options).map(|i| format!("opt{i}")).collect(),
            points: 10,
            kind,
        }
    }

    #[test]
    fn single_answer_parses_and_reprompts() {
        // "9" is out of range, "x" is not a number, "2" finally lands.
        let input = b"9\nx\n2\n" as &[u8];
        let mut prompter = ConsolePrompter::new(input);
        let answer = prompter.ask(&question(QuestionKind::SingleChoice, 4)).unwrap();
        assert_eq!(answer, SubmittedAnswer::Single("2".into()));
    }

    #[test]
    fn multi_answer_accepts_comma_separated() {
        let input = b" 1 , 3 \n" as &[u8];
        let mut prompter = ConsolePrompter::new(input);
        let answer = prompter
            .ask(&question(QuestionKind::MultipleChoice, 4))
            .unwrap();
        assert_eq!(
            answer,
            SubmittedAnswer::Multiple(vec!["1".into(), "3".into()])
        );
    }

    #[test]
    fn comma_list_is_rejected_for_single_choice() {
        let input = b"1,2\n3\n" as &[u8];
        let mut prompter = ConsolePrompter::new(input);
        let answer = prompter.ask(&question(QuestionKind::SingleChoice, 4)).unwrap();
        assert_eq!(answer, SubmittedAnswer::Single("3".into()));
    }

    #[test]
    fn true_false_has_two_options() {
        let input = b"3\n2\n" as &[u8];
        let mut prompter = ConsolePrompter::new(input);
        let answer = prompter.ask(&question(QuestionKind::TrueFalse, 0)).unwrap();
        assert_eq!(answer, SubmittedAnswer::Single("2".into()));
    }

    #[test]
    fn closed_input_is_a_prompt_error() {
        let input = b"" as &[u8];
        let mut prompter = ConsolePrompter::new(input);
        let err = prompter
            .ask(&question(QuestionKind::SingleChoice, 4))
            .unwrap_err();
        assert!(matches!(err, QuizError::Prompt(_)));
    }
}
