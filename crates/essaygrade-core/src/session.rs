//! Session state machine.
//!
//! A session wraps one [`Grader`] and tracks where the learner is:
//!
//! ```text
//! AwaitingInput --submit--> Mastered                  (terminal)
//!                      \--> RetryOffered --retry--> AwaitingInput
//!                      \--> Evaluated                 (terminal, retry disabled)
//! ```
//!
//! The only data that outlives an evaluation is the [`SessionState`]
//! snapshot, which hosts persist to resume a session later.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{Evaluation, Grader};
use crate::error::SessionError;
use crate::traits::InputProvider;

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    /// The answer is editable and can be submitted.
    AwaitingInput,
    /// Graded without mastery and retry is disabled.
    Evaluated { passed: bool, mastered: bool },
    /// Graded without mastery; the learner may try again.
    RetryOffered { passed: bool },
    /// Graded with mastery.
    Mastered,
}

impl SessionPhase {
    /// Returns `true` if no further action is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Evaluated { .. } | SessionPhase::Mastered)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::AwaitingInput => write!(f, "awaiting input"),
            SessionPhase::Evaluated { .. } => write!(f, "evaluated"),
            SessionPhase::RetryOffered { .. } => write!(f, "retry offered"),
            SessionPhase::Mastered => write!(f, "mastered"),
        }
    }
}

/// Persisted snapshot used to resume a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The last submitted (or restored) answer, un-normalized.
    #[serde(default)]
    pub text: String,
}

impl SessionState {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Save the snapshot as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize state")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write state to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read state from {}", path.display()))?;
        let state: SessionState =
            serde_json::from_str(&content).context("failed to parse state JSON")?;
        Ok(state)
    }
}

/// One learner working on one question.
#[derive(Debug)]
pub struct Session {
    grader: Grader,
    state: SessionState,
    phase: SessionPhase,
    last: Option<Evaluation>,
}

impl Session {
    /// Start a session, optionally resuming from a snapshot.
    pub fn new(grader: Grader, previous: Option<SessionState>) -> Self {
        Self {
            grader,
            state: previous.unwrap_or_default(),
            phase: SessionPhase::AwaitingInput,
            last: None,
        }
    }

    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current snapshot, for persistence.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last.as_ref()
    }

    /// Whether the learner may try again right now.
    pub fn can_retry(&self) -> bool {
        matches!(self.phase, SessionPhase::RetryOffered { .. })
    }

    /// Grade the provider's current answer.
    pub fn submit<I: InputProvider + ?Sized>(
        &mut self,
        input: &I,
    ) -> Result<&Evaluation, SessionError> {
        if self.phase != SessionPhase::AwaitingInput {
            return Err(SessionError::InvalidTransition {
                action: "submit",
                phase: self.phase,
            });
        }

        let text = input.current_input();
        let evaluation = self.grader.evaluate(&text);
        let outcome = &evaluation.outcome;

        self.phase = if outcome.mastered {
            SessionPhase::Mastered
        } else if self.grader.question().behaviour().enable_retry {
            SessionPhase::RetryOffered {
                passed: outcome.passed,
            }
        } else {
            SessionPhase::Evaluated {
                passed: outcome.passed,
                mastered: false,
            }
        };
        tracing::debug!(phase = %self.phase, "session transitioned");

        self.state = SessionState { text };
        Ok(self.last.insert(evaluation))
    }

    /// Make the answer editable again after a non-mastered attempt.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        if !self.can_retry() {
            return Err(SessionError::InvalidTransition {
                action: "retry",
                phase: self.phase,
            });
        }
        self.phase = SessionPhase::AwaitingInput;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alternative, BehaviourOptions, KeywordGroup, Question};

    fn grader(enable_retry: bool) -> Grader {
        let question = Question::new(
            vec![
                KeywordGroup::new(vec![Alternative::new("dog")], 5.0),
                KeywordGroup::new(vec![Alternative::new("cat")], 5.0),
            ],
            BehaviourOptions {
                score_passing: Some(5.0),
                enable_retry,
                ..Default::default()
            },
            vec![],
        );
        Grader::new(question)
    }

    #[test]
    fn starts_awaiting_input_with_snapshot() {
        let session = Session::new(grader(true), Some(SessionState::new("draft")));
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
        assert_eq!(session.state().text, "draft");
        assert!(session.last_evaluation().is_none());
    }

    #[test]
    fn mastery_is_terminal_even_with_retry_enabled() {
        let mut session = Session::new(grader(true), None);
        let evaluation = session.submit("a dog and a cat").unwrap();
        assert!(evaluation.outcome.mastered);
        assert_eq!(session.phase(), SessionPhase::Mastered);
        assert!(!session.can_retry());

        let err = session.retry().unwrap_err();
        assert!(err.is_terminal());
        let err = session.submit("again").unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                action: "submit",
                phase: SessionPhase::Mastered
            }
        );
    }

    #[test]
    fn retry_returns_to_awaiting_input() {
        let mut session = Session::new(grader(true), None);
        session.submit("only a dog").unwrap();
        assert_eq!(session.phase(), SessionPhase::RetryOffered { passed: true });

        session.retry().unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);

        session.submit("a dog and a cat").unwrap();
        assert_eq!(session.phase(), SessionPhase::Mastered);
    }

    #[test]
    fn without_retry_evaluated_is_terminal() {
        let mut session = Session::new(grader(false), None);
        session.submit("nothing relevant").unwrap();
        assert_eq!(
            session.phase(),
            SessionPhase::Evaluated {
                passed: false,
                mastered: false
            }
        );
        assert!(session.phase().is_terminal());
        assert!(session.retry().is_err());
    }

    #[test]
    fn snapshot_holds_raw_submitted_text() {
        let mut session = Session::new(grader(true), Some(SessionState::new("old")));
        session.submit("a\n\ndog").unwrap();
        assert_eq!(session.state().text, "a\n\ndog");
        assert_eq!(
            session.last_evaluation().unwrap().normalized_input,
            "a dog"
        );
    }

    #[test]
    fn invalid_action_leaves_state_untouched() {
        let mut session = Session::new(grader(true), Some(SessionState::new("draft")));
        assert!(session.retry().is_err());
        assert_eq!(session.phase(), SessionPhase::AwaitingInput);
        assert_eq!(session.state().text, "draft");
    }

    #[test]
    fn state_json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        SessionState::new("my answer").save_json(&path).unwrap();
        let loaded = SessionState::load_json(&path).unwrap();
        assert_eq!(loaded.text, "my answer");
    }

    #[test]
    fn state_without_text_defaults_to_empty() {
        let state: SessionState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.text, "");
    }
}
