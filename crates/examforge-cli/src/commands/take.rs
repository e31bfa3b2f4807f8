//! The `examforge take` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examforge_core::engine::QuizEngine;
use examforge_core::model::{Attempt, PASS_THRESHOLD};
use examforge_core::traits::SystemClock;
use examforge_store::catalog::FileQuestionCatalog;
use examforge_store::keys::FileAnswerKeyStore;
use examforge_store::participants::FileParticipantStore;
use examforge_store::results::JsonlResultsStore;

use crate::console::{ConsoleObserver, ConsolePrompter};

pub fn execute(
    participant: String,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path, data_dir)?;
    let data = &config.data_dir;

    let catalog = FileQuestionCatalog::new(data);
    let keys = FileAnswerKeyStore::new(data);
    let participants = FileParticipantStore::new(data.join("users.json"));
    let results = JsonlResultsStore::new(data.join("attempts.jsonl"));
    let clock = SystemClock;

    let engine = QuizEngine::new(
        &catalog,
        &keys,
        &participants,
        &results,
        &clock,
        config.engine_config(),
    );

    println!("examforge — quiz attempt for participant {participant}");
    println!(
        "{} sections, {} questions each, {} seconds total. Pass mark: {:.0}% overall and per section.",
        config.sections, config.questions_per_section, config.time_limit_secs, PASS_THRESHOLD
    );
    println!("The clock is checked before each question; answering never gets cut off mid-question.");

    let mut prompter = ConsolePrompter::stdin();
    let attempt = engine.run_attempt(
        &participant,
        &mut prompter,
        &mut rand::rng(),
        &ConsoleObserver,
    )?;

    print_results(&attempt);
    Ok(())
}

fn print_results(attempt: &Attempt) {
    let mut table = Table::new();
    table.set_header(vec!["Section", "Score"]);
    for section in &attempt.sections {
        table.add_row(vec![
            Cell::new(section.section),
            Cell::new(format!("{:.1}%", section.score)),
        ]);
    }

    println!("\n=== Results (attempt #{}) ===", attempt.sequence);
    println!("{table}");
    println!("Overall: {:.1}%", attempt.overall_score);
    if attempt.timed_out {
        println!("The time limit expired before every section was completed.");
    }
    println!("{}", if attempt.passed { "PASSED" } else { "FAILED" });
}
