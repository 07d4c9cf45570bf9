//! Aggregation of per-group matches into a raw score and message list.

use crate::matcher::match_group;
use crate::model::{Behaviour, EvaluationResult, KeywordGroup};
use crate::traits::TextUtilities;

/// Match every group in configured order and sum the earned points.
///
/// Messages keep group order: one found- or missed-message per group at most.
pub fn aggregate(
    groups: &[KeywordGroup],
    input: &str,
    behaviour: &Behaviour,
    utilities: &dyn TextUtilities,
) -> EvaluationResult {
    let input_lower = input.to_lowercase();

    let mut result = EvaluationResult::default();
    let mut found = 0usize;
    for (index, group) in groups.iter().enumerate() {
        let m = match_group(group, input, &input_lower, behaviour, utilities);
        if m.found {
            found += 1;
        } else {
            tracing::debug!(group = index, "keyword group missed");
        }
        result.raw_score += m.points_earned;
        result.messages.extend(m.message);
    }

    tracing::debug!(
        found,
        total = groups.len(),
        raw_score = result.raw_score,
        "aggregated keyword groups"
    );
    result
}
