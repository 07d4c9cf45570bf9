//! Feedback composition: capped score, pass/mastery flags, and feedback text.

use crate::model::{Behaviour, EvaluationResult, FeedbackRange, GradeOutcome};

/// Pick the overall feedback template for a score ratio in `[0, 1]`.
///
/// The ratio is floored to a whole percentage. The first range containing it
/// with a non-blank template wins; no match yields an empty string.
pub fn determine_overall_feedback(ranges: &[FeedbackRange], ratio: f64) -> &str {
    let percent = (ratio * 100.0).floor();
    ranges
        .iter()
        .find(|r| {
            f64::from(r.from) <= percent
                && f64::from(r.to) >= percent
                && !r.feedback.trim().is_empty()
        })
        .map(|r| r.feedback.as_str())
        .unwrap_or("")
}

/// Turn a raw evaluation into the outcome shown to the learner.
///
/// Pass status is judged on the uncapped raw score, while mastery and the
/// shown score use the score capped at `score_mastering`. Only the first
/// `@score` and the first `@total` in the template are filled in.
pub fn compose(
    result: &EvaluationResult,
    behaviour: &Behaviour,
    ranges: &[FeedbackRange],
    line_break: &str,
) -> GradeOutcome {
    let total = behaviour.score_mastering;
    let display_score = result.raw_score.min(total);
    let passed = result.raw_score >= behaviour.score_passing;
    let mastered = display_score >= total;

    let mut feedback_text = result
        .messages
        .iter()
        .map(|m| m.message.trim())
        .collect::<Vec<_>>()
        .join(" ");
    if !feedback_text.is_empty() {
        feedback_text.push_str(line_break);
    }

    let ratio = if total == 0.0 { 1.0 } else { display_score / total };
    let overall = determine_overall_feedback(ranges, ratio)
        .replacen("@score", &display_score.to_string(), 1)
        .replacen("@total", &total.to_string(), 1);
    feedback_text.push_str(&overall);

    GradeOutcome {
        raw_score: result.raw_score,
        display_score,
        max_score: total,
        messages: result.messages.clone(),
        feedback_text,
        passed,
        mastered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BehaviourOptions, Message};

    fn behaviour(mastering: f64, passing: f64, total: f64) -> Behaviour {
        Behaviour::resolve(
            &BehaviourOptions {
                score_mastering: Some(mastering),
                score_passing: Some(passing),
                ..Default::default()
            },
            total,
        )
    }

    fn result(raw_score: f64, messages: &[&str]) -> EvaluationResult {
        EvaluationResult {
            raw_score,
            messages: messages
                .iter()
                .map(|m| Message {
                    message: m.to_string(),
                    found: true,
                })
                .collect(),
        }
    }

    fn ranges() -> Vec<FeedbackRange> {
        vec![
            FeedbackRange::new(0, 49, "Keep trying: @score of @total."),
            FeedbackRange::new(50, 99, "Good: @score of @total."),
            FeedbackRange::new(100, 100, "Perfect!"),
        ]
    }

    #[test]
    fn select_range_by_floored_percent() {
        let ranges = ranges();
        assert_eq!(determine_overall_feedback(&ranges, 0.0), "Keep trying: @score of @total.");
        assert_eq!(determine_overall_feedback(&ranges, 0.499), "Keep trying: @score of @total.");
        assert_eq!(determine_overall_feedback(&ranges, 0.5), "Good: @score of @total.");
        assert_eq!(determine_overall_feedback(&ranges, 0.999), "Good: @score of @total.");
        assert_eq!(determine_overall_feedback(&ranges, 1.0), "Perfect!");
    }

    #[test]
    fn blank_templates_and_gaps_yield_empty() {
        let ranges = vec![
            FeedbackRange::new(0, 50, "   "),
            FeedbackRange::new(0, 50, "fallback"),
        ];
        assert_eq!(determine_overall_feedback(&ranges, 0.2), "fallback");
        assert_eq!(determine_overall_feedback(&ranges, 0.8), "");
        assert_eq!(determine_overall_feedback(&[], 0.8), "");
    }

    #[test]
    fn partial_score_not_mastered() {
        let outcome = compose(
            &result(5.0, &["Found dog"]),
            &behaviour(10.0, 5.0, 10.0),
            &ranges(),
            "\n",
        );
        assert_eq!(outcome.display_score, 5.0);
        assert_eq!(outcome.max_score, 10.0);
        assert!(outcome.passed);
        assert!(!outcome.mastered);
        assert_eq!(outcome.feedback_text, "Found dog\nGood: 5 of 10.");
    }

    #[test]
    fn cap_and_pass_use_different_scores() {
        let outcome = compose(&result(6.0, &[]), &behaviour(5.0, 6.0, 10.0), &[], "\n");
        assert_eq!(outcome.raw_score, 6.0);
        assert_eq!(outcome.display_score, 5.0);
        assert!(outcome.passed);
        assert!(outcome.mastered);
    }

    #[test]
    fn below_passing_fails() {
        let outcome = compose(&result(2.0, &[]), &behaviour(10.0, 5.0, 10.0), &ranges(), "\n");
        assert!(!outcome.passed);
        assert!(!outcome.mastered);
        assert_eq!(outcome.feedback_text, "Keep trying: 2 of 10.");
    }

    #[test]
    fn messages_are_trimmed_and_joined() {
        let outcome = compose(
            &result(0.0, &["  first ", "second  "]),
            &behaviour(10.0, 0.0, 10.0),
            &[],
            "<br />",
        );
        assert_eq!(outcome.feedback_text, "first second<br />");
    }

    #[test]
    fn zero_mastering_counts_as_full_ratio() {
        let outcome = compose(&result(0.0, &[]), &behaviour(10.0, 0.0, 0.0), &ranges(), "\n");
        assert_eq!(outcome.max_score, 0.0);
        assert!(outcome.mastered);
        assert!(outcome.passed);
        assert_eq!(outcome.feedback_text, "Perfect!");
    }

    #[test]
    fn fractional_scores_render_plainly() {
        let ranges = vec![FeedbackRange::new(0, 100, "@score/@total")];
        let outcome = compose(&result(2.5, &[]), &behaviour(7.5, 0.0, 7.5), &ranges, "\n");
        assert_eq!(outcome.feedback_text, "2.5/7.5");
    }

    #[test]
    fn only_first_placeholder_of_each_kind_is_filled() {
        let ranges = vec![FeedbackRange::new(
            0,
            100,
            "@score/@total, again @score of @total",
        )];
        let outcome = compose(&result(5.0, &[]), &behaviour(10.0, 0.0, 10.0), &ranges, "\n");
        assert_eq!(outcome.feedback_text, "5/10, again @score of @total");
    }
}
