//! The `essaygrade session` command.
//!
//! Reads answers from stdin. A line containing only `.` submits the text
//! typed so far; end of input submits whatever is pending.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;

use essaygrade_core::events::{events_for_evaluation, experienced};
use essaygrade_core::traits::InputProvider;
use essaygrade_core::{Session, SessionState};

use super::{load_grader, print_outcome, EventSink};

const SUBMIT_MARKER: &str = ".";

/// Typed text, falling back to the restored draft when nothing was typed.
struct DraftInput<'a> {
    draft: &'a str,
    typed: &'a str,
}

impl InputProvider for DraftInput<'_> {
    fn current_input(&self) -> String {
        if self.typed.trim().is_empty() {
            self.draft.to_string()
        } else {
            self.typed.to_string()
        }
    }
}

pub fn execute(
    question_path: PathBuf,
    state_path: Option<PathBuf>,
    settings_path: Option<PathBuf>,
    events_path: Option<PathBuf>,
) -> Result<()> {
    let grader = load_grader(&question_path, settings_path.as_deref())?;

    let previous = match &state_path {
        Some(path) if path.exists() => Some(SessionState::load_json(path)?),
        _ => None,
    };

    let mut sink = events_path.map(EventSink::open).transpose()?;
    if let Some(sink) = sink.as_mut() {
        sink.emit(&[experienced(grader.question())])?;
    }

    let mut session = Session::new(grader, previous);

    if let Some(description) = session.grader().question().task_description() {
        println!("{description}\n");
    }
    if !session.state().text.is_empty() {
        println!("Restored answer:\n{}\n", session.state().text);
    }
    println!("Type your answer; end it with a line containing only '{SUBMIT_MARKER}'.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut typed = String::new();

    loop {
        let line = lines.next().transpose()?;
        let submit = match &line {
            Some(l) if l.trim_end() == SUBMIT_MARKER => true,
            Some(l) => {
                if !typed.is_empty() {
                    typed.push('\n');
                }
                typed.push_str(l);
                false
            }
            None => true,
        };
        if !submit {
            continue;
        }

        let at_eof = line.is_none();
        if at_eof && typed.trim().is_empty() {
            break;
        }

        let draft = session.state().text.clone();
        let input = DraftInput {
            draft: &draft,
            typed: &typed,
        };
        let evaluation = session.submit(&input)?.clone();
        typed.clear();

        println!();
        print_outcome(&evaluation.outcome);

        if let Some(sink) = sink.as_mut() {
            sink.emit(&events_for_evaluation(
                session.grader().question(),
                &evaluation,
            ))?;
        }
        if let Some(path) = &state_path {
            session.state().save_json(path)?;
        }

        if session.can_retry() && !at_eof {
            session.retry()?;
            println!("\nTry again; end your answer with a line containing only '{SUBMIT_MARKER}'.");
        } else {
            break;
        }
    }

    println!("\nSession finished: {}", session.phase());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_text_wins_over_draft() {
        let input = DraftInput {
            draft: "old",
            typed: "new",
        };
        assert_eq!(input.current_input(), "new");
    }

    #[test]
    fn blank_submission_reuses_draft() {
        let input = DraftInput {
            draft: "old",
            typed: "  ",
        };
        assert_eq!(input.current_input(), "old");
    }
}
