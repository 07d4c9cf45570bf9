//! Minimal programmatic usage of essaygrade.
//!
//! Builds a question in code, grades two attempts in a session, and prints
//! the analytics records a host would emit.
//!
//! ```bash
//! cargo run -p essaygrade-core --example grade_answer
//! ```

use essaygrade_core::events::events_for_evaluation;
use essaygrade_core::model::{Alternative, BehaviourOptions, FeedbackRange, KeywordGroup};
use essaygrade_core::{Grader, Question, Session};

fn main() -> anyhow::Result<()> {
    let question = Question::new(
        vec![
            KeywordGroup::new(
                vec![Alternative::new("mitochondria"), Alternative::new("mitochondrion")],
                2.0,
            )
            .with_feedback_found("You named the organelle.")
            .with_feedback_missed("Which organelle produces ATP?"),
            KeywordGroup::new(vec![Alternative::new("ATP").case_sensitive(true)], 1.0)
                .with_feedback_missed("Mention the energy carrier."),
        ],
        BehaviourOptions {
            score_passing: Some(2.0),
            enable_retry: true,
            ..Default::default()
        },
        vec![
            FeedbackRange::new(0, 99, "You scored @score out of @total."),
            FeedbackRange::new(100, 100, "Full marks: @score/@total!"),
        ],
    )
    .with_task_description("Where does cellular respiration happen?");

    let mut session = Session::new(Grader::new(question), None);

    for attempt in ["It happens in the mitochondria.", "The mitochondria make ATP."] {
        let evaluation = session.submit(attempt)?.clone();
        println!("> {attempt}");
        println!("{}\n", evaluation.outcome.feedback_text);

        for event in events_for_evaluation(session.grader().question(), &evaluation) {
            println!("  event: {}", serde_json::to_string(&event)?);
        }

        if !session.can_retry() {
            break;
        }
        session.retry()?;
    }

    println!("\nfinal phase: {}", session.phase());
    Ok(())
}
