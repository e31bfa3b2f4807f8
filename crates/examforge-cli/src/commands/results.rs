//! The `examforge results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examforge_core::traits::ResultsStore;
use examforge_store::results::JsonlResultsStore;

pub fn execute(
    participant: String,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path, data_dir)?;
    let results = JsonlResultsStore::new(config.data_dir.join("attempts.jsonl"));

    let attempts = results.attempts_for(&participant)?;
    if attempts.is_empty() {
        println!("No recorded attempts for participant {participant}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Sections", "Overall", "Status", "Timed out"]);
    for attempt in &attempts {
        let sections = attempt
            .sections
            .iter()
            .map(|s| format!("{}: {:.1}%", s.section, s.score))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(attempt.sequence),
            Cell::new(attempt.started_at.format("%Y-%m-%d %H:%M")),
            Cell::new(if sections.is_empty() { "-".into() } else { sections }),
            Cell::new(format!("{:.1}%", attempt.overall_score)),
            Cell::new(if attempt.passed { "PASSED" } else { "FAILED" }),
            Cell::new(if attempt.timed_out { "yes" } else { "no" }),
        ]);
    }

    println!("Attempts for participant {participant}:");
    println!("{table}");
    Ok(())
}
