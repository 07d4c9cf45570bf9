//! The `essaygrade grade` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use essaygrade_core::events::{events_for_evaluation, experienced};

use super::{load_grader, print_outcome, EventSink};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    question_path: PathBuf,
    answer_path: Option<PathBuf>,
    text: Option<String>,
    format: String,
    settings_path: Option<PathBuf>,
    events_path: Option<PathBuf>,
    require_pass: bool,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format: {format} (expected text or json)"
    );

    let grader = load_grader(&question_path, settings_path.as_deref())?;
    let answer = read_answer(answer_path, text)?;

    let evaluation = grader.evaluate(&answer);

    if let Some(path) = events_path {
        let mut sink = EventSink::open(path)?;
        sink.emit(&[experienced(grader.question())])?;
        sink.emit(&events_for_evaluation(grader.question(), &evaluation))?;
    }

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&evaluation.outcome)?),
        _ => print_outcome(&evaluation.outcome),
    }

    if require_pass && !evaluation.outcome.passed {
        std::process::exit(1);
    }

    Ok(())
}

fn read_answer(answer_path: Option<PathBuf>, text: Option<String>) -> Result<String> {
    match (answer_path, text) {
        (Some(path), _) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read answer: {}", path.display())),
        (None, Some(text)) => Ok(text),
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read answer from stdin")?;
            Ok(buf)
        }
    }
}
