//! Structured analytics records for grading activity.
//!
//! The core only builds these records; emitting them (to a learning record
//! store, a log, a file) is up to the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::engine::Evaluation;
use crate::model::Question;

/// Activity type reported for essay questions.
pub const ESSAY_ACTIVITY_TYPE: &str = "http://id.tincanapi.com/activitytype/essay";

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Experienced,
    Completed,
    Scored,
    Passed,
    Failed,
    Mastered,
}

impl Verb {
    /// The ADL vocabulary IRI for this verb.
    pub fn iri(&self) -> String {
        let name = match self {
            Verb::Experienced => "experienced",
            Verb::Completed => "completed",
            Verb::Scored => "scored",
            Verb::Passed => "passed",
            Verb::Failed => "failed",
            Verb::Mastered => "mastered",
        };
        format!("http://adlnet.gov/expapi/verbs/{name}")
    }
}

/// Describes the question the learner interacted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDefinition {
    #[builder(default = String::from("Essay"), setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default = String::from(ESSAY_ACTIVITY_TYPE), setter(into))]
    #[serde(rename = "type")]
    pub activity_type: String,
    #[builder(default = String::from("long-fill-in"), setter(into))]
    pub interaction_type: String,
}

/// Score block of a scored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub min: f64,
    pub max: f64,
    pub raw: f64,
    /// `raw / max`, rounded to four decimals.
    pub scaled: f64,
}

impl ScoreRecord {
    pub fn new(raw: f64, max: f64) -> Self {
        let scaled = if max > 0.0 {
            (raw / max * 10_000.0).round() / 10_000.0
        } else {
            1.0
        };
        Self {
            min: 0.0,
            max,
            raw,
            scaled,
        }
    }
}

/// Result block of a scored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct EventResult {
    pub score: ScoreRecord,
    #[builder(default = true)]
    pub completion: bool,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// The answer as the matcher saw it.
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// One analytics record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct GradingEvent {
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,
    #[builder(default = Utc::now())]
    pub timestamp: DateTime<Utc>,
    pub verb: Verb,
    pub activity: ActivityDefinition,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EventResult>,
}

/// Activity definition for a question.
pub fn activity_for(question: &Question) -> ActivityDefinition {
    match question.task_description() {
        Some(description) => ActivityDefinition::builder().description(description).build(),
        None => ActivityDefinition::builder().build(),
    }
}

/// Record emitted when a question is first shown.
pub fn experienced(question: &Question) -> GradingEvent {
    GradingEvent::builder()
        .verb(Verb::Experienced)
        .activity(activity_for(question))
        .build()
}

/// Records emitted after grading, in order: completed, scored, passed or
/// failed, and mastered when the answer reached the mastering score.
pub fn events_for_evaluation(question: &Question, evaluation: &Evaluation) -> Vec<GradingEvent> {
    let activity = activity_for(question);
    let outcome = &evaluation.outcome;

    let plain = |verb: Verb| {
        GradingEvent::builder()
            .verb(verb)
            .activity(activity.clone())
            .build()
    };

    let scored = GradingEvent::builder()
        .verb(Verb::Scored)
        .activity(activity.clone())
        .result(
            EventResult::builder()
                .score(ScoreRecord::new(outcome.display_score, outcome.max_score))
                .success(outcome.passed)
                .response(evaluation.normalized_input.clone())
                .build(),
        )
        .build();

    let mut events = vec![plain(Verb::Completed), scored];
    events.push(plain(if outcome.passed {
        Verb::Passed
    } else {
        Verb::Failed
    }));
    if outcome.mastered {
        events.push(plain(Verb::Mastered));
    }
    events
}
