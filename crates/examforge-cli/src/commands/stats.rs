//! The `examforge stats` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examforge_core::statistics::{self, QuestionTally, Standing};
use examforge_core::traits::ResultsStore;
use examforge_store::keys::FileAnswerKeyStore;
use examforge_store::results::JsonlResultsStore;

pub fn execute(
    section: u32,
    class: Option<String>,
    participant: Option<String>,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path, data_dir)?;
    let keys = FileAnswerKeyStore::new(&config.data_dir);
    let results = JsonlResultsStore::new(config.data_dir.join("attempts.jsonl"));

    let attempts = results.read_all()?;
    let stats = statistics::aggregate(section, &attempts, &keys)?;

    match statistics::summarize(section, &attempts) {
        Some(summary) => {
            println!(
                "Section {section}: {} attempt(s), average {:.1}%, pass rate {:.1}%",
                summary.participants, summary.average_score, summary.pass_rate
            );
        }
        None => {
            println!("Section {section}: no attempts recorded yet.");
            return Ok(());
        }
    }

    println!("\nPer-question tallies (all classes):");
    print_tallies(&stats.overall);

    if let Some(class) = &class {
        match stats.by_class.get(class) {
            Some(tallies) => {
                println!("\nClass {class}:");
                print_tallies(tallies);
                if let Some(rate) = stats.class_success_rate(class) {
                    println!("Class success rate: {:.1}%", rate * 100.0);
                }
            }
            None => println!("\nNo recorded answers for class {class} in this section."),
        }

        if let Some(participant) = &participant {
            report_standing(&stats, &attempts, section, class, participant);
        }
    }

    Ok(())
}

fn print_tallies(tallies: &BTreeMap<u32, QuestionTally>) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Correct", "Incorrect", "Success"]);
    for (question_id, tally) in tallies {
        table.add_row(vec![
            Cell::new(question_id),
            Cell::new(tally.correct),
            Cell::new(tally.incorrect),
            Cell::new(format!("{:.1}%", tally.success_rate() * 100.0)),
        ]);
    }
    println!("{table}");
}

/// The participant's most recent recorded score for the section, flagged
/// against the class average.
fn report_standing(
    stats: &statistics::SectionStatistics,
    attempts: &[examforge_core::model::Attempt],
    section: u32,
    class: &str,
    participant: &str,
) {
    let latest_score = attempts
        .iter()
        .rev()
        .filter(|a| a.participant_key == participant)
        .find_map(|a| {
            a.sections
                .iter()
                .find(|s| s.section == section)
                .map(|s| s.score)
        });

    match latest_score {
        Some(score) => match stats.standing(score, class) {
            Some(Standing::AboveAverage) => {
                println!(
                    "Participant {participant}: {score:.1}%, at or above the class average."
                );
            }
            Some(Standing::BelowAverage) => {
                println!("Participant {participant}: {score:.1}%, below the class average.");
            }
            None => println!("Participant {participant}: {score:.1}% (no class average to compare)."),
        },
        None => println!("Participant {participant} has no recorded score for section {section}."),
    }
}
