//! Grading engine.
//!
//! Ties the pipeline together: normalize the answer, match every keyword
//! group, aggregate the points, and compose the learner-facing outcome.

use serde::Serialize;

use crate::feedback::compose;
use crate::model::{EvaluationResult, GradeOutcome, Question};
use crate::normalize::normalize;
use crate::scoring::aggregate;
use crate::settings::Settings;
use crate::text::StandardTextUtilities;
use crate::traits::TextUtilities;

/// Everything produced by grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// The answer exactly as submitted.
    pub response: String,
    /// The answer the matcher saw.
    pub normalized_input: String,
    pub result: EvaluationResult,
    pub outcome: GradeOutcome,
}

/// Grades answers for one question. The question never changes after
/// construction.
pub struct Grader {
    question: Question,
    utilities: Box<dyn TextUtilities>,
    line_break: String,
}

impl Grader {
    /// Grader with default settings.
    pub fn new(question: Question) -> Self {
        Self::with_settings(question, &Settings::default())
    }

    pub fn with_settings(question: Question, settings: &Settings) -> Self {
        Self {
            question,
            utilities: Box::new(StandardTextUtilities::new(settings.fuzzy.clone())),
            line_break: settings.feedback.line_break.clone(),
        }
    }

    /// Replace the matching primitives.
    pub fn with_utilities(mut self, utilities: Box<dyn TextUtilities>) -> Self {
        self.utilities = utilities;
        self
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Grade a raw answer.
    pub fn evaluate(&self, response: &str) -> Evaluation {
        let normalized_input = normalize(response);
        let behaviour = self.question.behaviour();

        let result = aggregate(
            self.question.keyword_groups(),
            &normalized_input,
            behaviour,
            self.utilities.as_ref(),
        );
        let outcome = compose(
            &result,
            behaviour,
            self.question.overall_feedback(),
            &self.line_break,
        );

        tracing::info!(
            raw_score = outcome.raw_score,
            score = outcome.display_score,
            total = outcome.max_score,
            passed = outcome.passed,
            mastered = outcome.mastered,
            "graded answer"
        );

        Evaluation {
            response: response.to_string(),
            normalized_input,
            result,
            outcome,
        }
    }
}

impl std::fmt::Debug for Grader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grader")
            .field("question", &self.question)
            .field("line_break", &self.line_break)
            .finish_non_exhaustive()
    }
}
