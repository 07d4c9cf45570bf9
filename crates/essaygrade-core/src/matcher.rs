//! Evaluates one keyword group against normalized learner input.

use crate::model::{Behaviour, KeywordGroup, Message};
use crate::traits::TextUtilities;

/// Outcome of matching a single keyword group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMatch {
    pub found: bool,
    pub points_earned: f64,
    /// Found- or missed-message, if the group configures one.
    pub message: Option<Message>,
}

/// Try every alternative of `group` in order, stopping at the first match.
///
/// `input_lower` must be the lower-cased form of `input`; it is computed once
/// per evaluation and shared across groups.
pub fn match_group(
    group: &KeywordGroup,
    input: &str,
    input_lower: &str,
    behaviour: &Behaviour,
    utilities: &dyn TextUtilities,
) -> GroupMatch {
    let found = group.alternatives.iter().any(|alternative| {
        let lowered;
        let (needle, haystack) = if behaviour.case_sensitive(alternative) {
            (alternative.text.as_str(), input)
        } else {
            lowered = alternative.text.to_lowercase();
            (lowered.as_str(), input_lower)
        };

        if haystack.contains(needle) && utilities.is_isolated_match(needle, haystack) {
            tracing::debug!(alternative = %alternative.text, "exact match");
            return true;
        }

        if behaviour.forgive_mistakes(alternative) && utilities.fuzzy_contains(needle, haystack) {
            tracing::debug!(alternative = %alternative.text, "fuzzy match");
            return true;
        }

        false
    });

    if found {
        GroupMatch {
            found: true,
            points_earned: group.points,
            message: non_empty(&group.feedback_found).map(|message| Message {
                message,
                found: true,
            }),
        }
    } else {
        GroupMatch {
            found: false,
            points_earned: 0.0,
            message: non_empty(&group.feedback_missed).map(|message| Message {
                message,
                found: false,
            }),
        }
    }
}

fn non_empty(text: &Option<String>) -> Option<String> {
    text.as_ref().filter(|t| !t.is_empty()).cloned()
}
