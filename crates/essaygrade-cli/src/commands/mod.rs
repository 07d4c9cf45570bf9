//! Subcommands and the pieces they share.

pub mod grade;
pub mod init;
pub mod session;
pub mod validate;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;

use essaygrade_core::events::GradingEvent;
use essaygrade_core::settings::load_settings_from;
use essaygrade_core::{GradeOutcome, Grader};

/// Load a question and the settings that tune its grader.
pub(crate) fn load_grader(question: &Path, settings: Option<&Path>) -> Result<Grader> {
    let settings = load_settings_from(settings)?;
    let question = essaygrade_core::parser::parse_question(question)?;
    Ok(Grader::with_settings(question, &settings))
}

/// Appends analytics records to a JSON lines file.
pub(crate) struct EventSink {
    path: PathBuf,
    file: File,
}

impl EventSink {
    pub(crate) fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open events file: {}", path.display()))?;
        Ok(Self { path, file })
    }

    pub(crate) fn emit(&mut self, events: &[GradingEvent]) -> Result<()> {
        for event in events {
            let line = serde_json::to_string(event)?;
            writeln!(self.file, "{line}")
                .with_context(|| format!("failed to write events to {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Print a graded outcome for a human reader.
pub(crate) fn print_outcome(outcome: &GradeOutcome) {
    if !outcome.messages.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Keyword", "Feedback"]);
        for m in &outcome.messages {
            let status = if m.found { "found" } else { "missed" };
            table.add_row(vec![status, m.message.as_str()]);
        }
        println!("{table}");
    }

    println!(
        "Score: {}/{} (raw {})",
        outcome.display_score, outcome.max_score, outcome.raw_score
    );
    println!(
        "Passed: {}  Mastered: {}",
        yes_no(outcome.passed),
        yes_no(outcome.mastered)
    );
    if !outcome.feedback_text.is_empty() {
        println!("\n{}", outcome.feedback_text);
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
