//! Error types.
//!
//! Grading itself never fails. These errors only surface while loading a
//! question or when a session is driven out of order.

use thiserror::Error;

use crate::session::SessionPhase;

/// Errors raised while turning a configuration file into a [`crate::Question`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file extension is not one of the supported formats.
    #[error("unsupported question format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    /// A keyword group awards negative or non-finite points.
    #[error("keyword group {group} has invalid points: {points}")]
    InvalidPoints { group: usize, points: f64 },

    /// A behaviour threshold is NaN or negative.
    #[error("invalid {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}

/// Errors raised when a session action is not allowed in the current phase.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
}

impl SessionError {
    /// Returns `true` if the session has reached a phase it cannot leave.
    pub fn is_terminal(&self) -> bool {
        match self {
            SessionError::InvalidTransition { phase, .. } => phase.is_terminal(),
        }
    }
}
