//! examforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "examforge", version, about = "Multi-section timed quiz engine")]
struct Cli {
    /// Config file path (default: ./examforge.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory override (questions, keys, participants, attempts)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sit one quiz attempt
    Take {
        /// Participant key (student id)
        #[arg(long)]
        participant: String,
    },

    /// Show a participant's previous attempts
    Results {
        /// Participant key (student id)
        #[arg(long)]
        participant: String,
    },

    /// Show cumulative statistics for a section
    Stats {
        /// Section number
        #[arg(long)]
        section: u32,

        /// Restrict the breakdown to one class label
        #[arg(long)]
        class: Option<String>,

        /// Flag this participant's latest score against the class average
        #[arg(long)]
        participant: Option<String>,
    },

    /// Validate question pools and answer keys
    Validate,

    /// Register a participant
    Register {
        #[command(subcommand)]
        role: commands::register::RegisterRole,
    },

    /// Create starter config and sample question files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { participant } => {
            commands::take::execute(participant, cli.config, cli.data_dir)
        }
        Commands::Results { participant } => {
            commands::results::execute(participant, cli.config, cli.data_dir)
        }
        Commands::Stats {
            section,
            class,
            participant,
        } => commands::stats::execute(section, class, participant, cli.config, cli.data_dir),
        Commands::Validate => commands::validate::execute(cli.config, cli.data_dir),
        Commands::Register { role } => commands::register::execute(role, cli.config, cli.data_dir),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
