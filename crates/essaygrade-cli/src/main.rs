//! The essaygrade command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "essaygrade", version, about = "Keyword-based free-text grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single answer
    Grade {
        /// Path to a .json or .toml question file
        #[arg(long)]
        question: PathBuf,

        /// File containing the answer (reads stdin if neither this nor --text is given)
        #[arg(long, conflicts_with = "text")]
        answer: Option<PathBuf>,

        /// Answer text
        #[arg(long)]
        text: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Settings file path
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Append analytics records (JSON lines) to this file
        #[arg(long)]
        events: Option<PathBuf>,

        /// Exit code 1 if the answer does not pass
        #[arg(long)]
        require_pass: bool,
    },

    /// Answer a question interactively with retries
    Session {
        /// Path to a .json or .toml question file
        #[arg(long)]
        question: PathBuf,

        /// Snapshot file to resume from and save to
        #[arg(long)]
        state: Option<PathBuf>,

        /// Settings file path
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Append analytics records (JSON lines) to this file
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Validate question files
    Validate {
        /// Path to a question file or directory
        #[arg(long)]
        question: PathBuf,
    },

    /// Create starter settings and an example question
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("essaygrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            question,
            answer,
            text,
            format,
            settings,
            events,
            require_pass,
        } => commands::grade::execute(
            question,
            answer,
            text,
            format,
            settings,
            events,
            require_pass,
        ),
        Commands::Session {
            question,
            state,
            settings,
            events,
        } => commands::session::execute(question, state, settings, events),
        Commands::Validate { question } => commands::validate::execute(question),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
