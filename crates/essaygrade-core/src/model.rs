//! Core data model types for essaygrade.
//!
//! These are the fundamental types the grading pipeline uses to represent
//! keyword groups, behaviour thresholds, and evaluation outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One accepted phrasing inside a keyword group.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    /// The literal text to look for.
    pub text: String,
    /// Whether letter case must match.
    pub case_sensitive: bool,
    /// Whether approximate matches are accepted.
    pub forgive_mistakes: bool,
}

impl Alternative {
    /// A case-insensitive, exact-only alternative.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_sensitive: false,
            forgive_mistakes: false,
        }
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn forgive_mistakes(mut self, yes: bool) -> Self {
        self.forgive_mistakes = yes;
        self
    }
}

/// A scored unit of expected content. Matches on any one of its alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordGroup {
    /// Candidate phrasings, tried in order.
    pub alternatives: Vec<Alternative>,
    /// Points earned when any alternative matches.
    pub points: f64,
    /// Message shown when the group is found.
    pub feedback_found: Option<String>,
    /// Message shown when the group is missed.
    pub feedback_missed: Option<String>,
}

impl KeywordGroup {
    pub fn new(alternatives: Vec<Alternative>, points: f64) -> Self {
        Self {
            alternatives,
            points,
            feedback_found: None,
            feedback_missed: None,
        }
    }

    pub fn with_feedback_found(mut self, message: impl Into<String>) -> Self {
        self.feedback_found = Some(message.into());
        self
    }

    pub fn with_feedback_missed(mut self, message: impl Into<String>) -> Self {
        self.feedback_missed = Some(message.into());
        self
    }
}

/// Question-wide override of a per-alternative matching option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Override {
    On,
    Off,
    #[default]
    Default,
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Override::On => write!(f, "on"),
            Override::Off => write!(f, "off"),
            Override::Default => write!(f, "default"),
        }
    }
}

impl FromStr for Override {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(Override::On),
            "off" => Ok(Override::Off),
            "default" | "" => Ok(Override::Default),
            other => Err(format!("unknown override: {other}")),
        }
    }
}

/// Behaviour settings as configured, before thresholds are resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviourOptions {
    /// Score at which the answer counts as mastered (unset = unlimited).
    pub score_mastering: Option<f64>,
    /// Score at which the answer counts as passed (unset = 0).
    pub score_passing: Option<f64>,
    pub override_case_sensitive: Override,
    pub override_forgive_mistakes: Override,
    /// Whether the learner may try again after a non-mastered attempt.
    pub enable_retry: bool,
}

/// Resolved behaviour settings.
///
/// `score_mastering` never exceeds the total available points and
/// `score_passing` never exceeds `score_mastering`.
#[derive(Debug, Clone, PartialEq)]
pub struct Behaviour {
    pub score_mastering: f64,
    pub score_passing: f64,
    pub override_case_sensitive: Override,
    pub override_forgive_mistakes: Override,
    pub enable_retry: bool,
}

impl Behaviour {
    /// Resolve configured thresholds against the total available points.
    pub fn resolve(options: &BehaviourOptions, total_points: f64) -> Self {
        let score_mastering = options
            .score_mastering
            .unwrap_or(f64::INFINITY)
            .min(total_points);
        let score_passing = score_mastering.min(options.score_passing.unwrap_or(0.0));

        Self {
            score_mastering,
            score_passing,
            override_case_sensitive: options.override_case_sensitive,
            override_forgive_mistakes: options.override_forgive_mistakes,
            enable_retry: options.enable_retry,
        }
    }

    /// Effective case sensitivity for an alternative.
    pub fn case_sensitive(&self, alternative: &Alternative) -> bool {
        alternative.case_sensitive && self.override_case_sensitive != Override::Off
    }

    /// Effective fuzziness for an alternative.
    pub fn forgive_mistakes(&self, alternative: &Alternative) -> bool {
        alternative.forgive_mistakes || self.override_forgive_mistakes == Override::On
    }
}

/// Maps a range of score percentages to an overall feedback template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRange {
    /// Lower bound in percent, inclusive.
    #[serde(default)]
    pub from: u32,
    /// Upper bound in percent, inclusive.
    #[serde(default = "default_range_to")]
    pub to: u32,
    /// Template that may contain `@score` and `@total`.
    #[serde(default)]
    pub feedback: String,
}

fn default_range_to() -> u32 {
    100
}

impl FeedbackRange {
    pub fn new(from: u32, to: u32, feedback: impl Into<String>) -> Self {
        Self {
            from,
            to,
            feedback: feedback.into(),
        }
    }
}

/// A fully loaded question. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    keyword_groups: Vec<KeywordGroup>,
    options: BehaviourOptions,
    behaviour: Behaviour,
    overall_feedback: Vec<FeedbackRange>,
    task_description: Option<String>,
}

impl Question {
    /// Build a question, resolving behaviour thresholds against the total points.
    pub fn new(
        keyword_groups: Vec<KeywordGroup>,
        options: BehaviourOptions,
        overall_feedback: Vec<FeedbackRange>,
    ) -> Self {
        let total: f64 = keyword_groups.iter().map(|g| g.points).sum();
        let behaviour = Behaviour::resolve(&options, total);
        Self {
            keyword_groups,
            options,
            behaviour,
            overall_feedback,
            task_description: None,
        }
    }

    pub fn with_task_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = Some(description.into());
        self
    }

    pub fn keyword_groups(&self) -> &[KeywordGroup] {
        &self.keyword_groups
    }

    pub fn behaviour(&self) -> &Behaviour {
        &self.behaviour
    }

    /// Behaviour settings exactly as configured.
    pub fn options(&self) -> &BehaviourOptions {
        &self.options
    }

    pub fn overall_feedback(&self) -> &[FeedbackRange] {
        &self.overall_feedback
    }

    pub fn task_description(&self) -> Option<&str> {
        self.task_description.as_deref()
    }

    /// Sum of the points of every keyword group.
    pub fn total_points(&self) -> f64 {
        self.keyword_groups.iter().map(|g| g.points).sum()
    }
}

/// A feedback message recorded for one keyword group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
    /// `true` for a found-message, `false` for a missed-message.
    pub found: bool,
}

/// Raw result of matching every keyword group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub raw_score: f64,
    pub messages: Vec<Message>,
}

/// Final, composed outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    /// Sum of earned points, uncapped.
    pub raw_score: f64,
    /// Score capped at the mastering score.
    pub display_score: f64,
    /// The mastering score, shown as the total.
    pub max_score: f64,
    pub messages: Vec<Message>,
    pub feedback_text: String,
    pub passed: bool,
    pub mastered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(points: &[f64]) -> Vec<KeywordGroup> {
        points
            .iter()
            .map(|&p| KeywordGroup::new(vec![Alternative::new("x")], p))
            .collect()
    }

    #[test]
    fn override_display_and_parse() {
        assert_eq!(Override::On.to_string(), "on");
        assert_eq!("OFF".parse::<Override>().unwrap(), Override::Off);
        assert_eq!("".parse::<Override>().unwrap(), Override::Default);
        assert!("maybe".parse::<Override>().is_err());
    }

    #[test]
    fn mastering_defaults_to_total_points() {
        let q = Question::new(groups(&[3.0, 4.0]), BehaviourOptions::default(), vec![]);
        assert_eq!(q.behaviour().score_mastering, 7.0);
        assert_eq!(q.behaviour().score_passing, 0.0);
    }

    #[test]
    fn mastering_is_capped_by_total_points() {
        let options = BehaviourOptions {
            score_mastering: Some(20.0),
            score_passing: Some(15.0),
            ..Default::default()
        };
        let q = Question::new(groups(&[5.0, 5.0]), options, vec![]);
        assert_eq!(q.behaviour().score_mastering, 10.0);
        assert_eq!(q.behaviour().score_passing, 10.0);
    }

    #[test]
    fn configured_thresholds_below_total_are_kept() {
        let options = BehaviourOptions {
            score_mastering: Some(8.0),
            score_passing: Some(4.0),
            ..Default::default()
        };
        let q = Question::new(groups(&[5.0, 5.0]), options, vec![]);
        assert_eq!(q.behaviour().score_mastering, 8.0);
        assert_eq!(q.behaviour().score_passing, 4.0);
        assert_eq!(q.options().score_mastering, Some(8.0));
    }

    #[test]
    fn no_groups_means_zero_mastering() {
        let q = Question::new(vec![], BehaviourOptions::default(), vec![]);
        assert_eq!(q.total_points(), 0.0);
        assert_eq!(q.behaviour().score_mastering, 0.0);
    }

    #[test]
    fn overrides_only_widen_in_one_direction() {
        let strict = Alternative::new("Dog").case_sensitive(true);
        let mut behaviour = Behaviour::resolve(&BehaviourOptions::default(), 1.0);
        assert!(behaviour.case_sensitive(&strict));

        behaviour.override_case_sensitive = Override::On;
        assert!(!behaviour.case_sensitive(&Alternative::new("dog")));

        behaviour.override_case_sensitive = Override::Off;
        assert!(!behaviour.case_sensitive(&strict));

        behaviour.override_forgive_mistakes = Override::Off;
        assert!(behaviour.forgive_mistakes(&Alternative::new("dog").forgive_mistakes(true)));
        behaviour.override_forgive_mistakes = Override::On;
        assert!(behaviour.forgive_mistakes(&Alternative::new("dog")));
    }

    #[test]
    fn outcome_serializes_camel_case() {
        let outcome = GradeOutcome {
            raw_score: 5.0,
            display_score: 5.0,
            max_score: 10.0,
            messages: vec![Message {
                message: "Found dog".into(),
                found: true,
            }],
            feedback_text: "Found dog\n".into(),
            passed: true,
            mastered: false,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"rawScore\":5.0"));
        assert!(json.contains("\"displayScore\""));
        let back: GradeOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
