//! The `examforge register` command.
//!
//! Creates participant records. Credential handling lives outside the
//! engine; a record here only carries identity and grouping fields.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Subcommand;

use examforge_core::model::{Participant, Student, Teacher};
use examforge_core::traits::ParticipantStore;
use examforge_store::participants::FileParticipantStore;

#[derive(Subcommand)]
pub enum RegisterRole {
    /// Register a student
    Student {
        /// Numeric student id; its decimal form becomes the store key
        #[arg(long)]
        id: u32,

        #[arg(long)]
        name: String,

        #[arg(long)]
        surname: String,

        /// Class label, e.g. "7-A"
        #[arg(long)]
        class: String,
    },

    /// Register a teacher
    Teacher {
        #[arg(long)]
        name: String,

        #[arg(long)]
        surname: String,

        /// The section this teacher reviews statistics for
        #[arg(long)]
        section: u32,
    },
}

pub fn execute(
    role: RegisterRole,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path, data_dir)?;
    let store = FileParticipantStore::new(config.data_dir.join("users.json"));

    let participant = match role {
        RegisterRole::Student {
            id,
            name,
            surname,
            class,
        } => Participant::Student(Student {
            id,
            name,
            surname,
            class_label: class,
            attempt_count: 0,
            last_attempt: None,
        }),
        RegisterRole::Teacher {
            name,
            surname,
            section,
        } => Participant::Teacher(Teacher {
            name,
            surname,
            assigned_section: section,
        }),
    };

    let key = participant.key();
    if store.load(&key)?.is_some() {
        bail!("participant {key} is already registered");
    }

    store.save(&participant)?;
    println!("Registered {key}.");
    Ok(())
}
