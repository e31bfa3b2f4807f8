//! The `examforge init` command.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use examforge_core::model::{Question, QuestionKind};
use examforge_store::{catalog, keys};

pub fn execute() -> Result<()> {
    if Path::new("examforge.toml").exists() {
        println!("examforge.toml already exists, skipping.");
    } else {
        std::fs::write("examforge.toml", SAMPLE_CONFIG)?;
        println!("Created examforge.toml");
    }

    let data_dir = Path::new("examforge-data");
    for section in 1..=4u32 {
        let question_path = data_dir.join(format!("questions_section{section}.json"));
        if question_path.exists() {
            println!("{} already exists, skipping.", question_path.display());
            continue;
        }
        let (pool, key) = sample_section(section);
        catalog::write_section(data_dir, section, &pool)?;
        keys::write_section_key(data_dir, section, &key)?;
        println!("Created question and answer-key files for section {section}");
    }

    println!("\nNext steps:");
    println!("  1. Edit the question files under examforge-data/");
    println!("  2. Run: examforge validate");
    println!("  3. Register a student: examforge register student --id 10 --name Ada --surname Aydin --class 7-A");
    println!("  4. Run: examforge take --participant 10");

    Ok(())
}

/// A five-question starter pool with one question of each scoring shape.
fn sample_section(section: u32) -> (Vec<Question>, BTreeMap<u32, Vec<String>>) {
    let mut pool = Vec::new();
    let mut key = BTreeMap::new();

    pool.push(Question {
        id: 1,
        text: format!("Section {section}, question 1: true or false?"),
        options: vec![],
        points: 10,
        kind: QuestionKind::TrueFalse,
    });
    key.insert(1, vec!["1".to_string()]);

    for id in 2..=4u32 {
        pool.push(Question {
            id,
            text: format!("Section {section}, question {id}: pick one."),
            options: vec![
                "First option".into(),
                "Second option".into(),
                "Third option".into(),
                "Fourth option".into(),
            ],
            points: 10,
            kind: QuestionKind::SingleChoice,
        });
        key.insert(id, vec!["2".to_string()]);
    }

    pool.push(Question {
        id: 5,
        text: format!("Section {section}, question 5: pick all that apply."),
        options: vec![
            "First option".into(),
            "Second option".into(),
            "Third option".into(),
            "Fourth option".into(),
        ],
        points: 10,
        kind: QuestionKind::MultipleChoice,
    });
    key.insert(5, vec!["1".to_string(), "3".to_string()]);

    (pool, key)
}

const SAMPLE_CONFIG: &str = r#"# examforge configuration

# Wall-clock budget for one full attempt, in seconds.
time_limit_secs = 300

# Completed attempts allowed per student.
attempt_limit = 3

# Questions sampled per section.
questions_per_section = 5

# Number of sections.
sections = 4

# Directory holding question files, answer keys, participants, and the
# attempt log.
data_dir = "./examforge-data"
"#;
