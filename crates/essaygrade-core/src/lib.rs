//! Keyword grading engine, matching primitives, and feedback composition.
//!
//! This crate defines the question model, the grading pipeline
//! (normalize, match, aggregate, compose), and the session state machine
//! that hosts build their question widgets on.

pub mod engine;
pub mod error;
pub mod events;
pub mod feedback;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod text;
pub mod traits;

pub use engine::{Evaluation, Grader};
pub use error::{ConfigError, SessionError};
pub use model::{
    Alternative, Behaviour, FeedbackRange, GradeOutcome, KeywordGroup, Message, Override,
    Question,
};
pub use session::{Session, SessionPhase, SessionState};
