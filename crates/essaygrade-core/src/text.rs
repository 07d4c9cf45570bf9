//! Default text matching primitives.
//!
//! Isolation treats any alphanumeric character as part of a word. Fuzzy
//! containment compares the keyword against isolated character windows of the
//! answer using Damerau-Levenshtein distance.

use crate::settings::FuzzySettings;
use crate::traits::TextUtilities;

/// [`TextUtilities`] backed by `strsim`.
#[derive(Debug, Clone, Default)]
pub struct StandardTextUtilities {
    settings: FuzzySettings,
}

impl StandardTextUtilities {
    pub fn new(settings: FuzzySettings) -> Self {
        Self { settings }
    }

    /// Largest edit distance tolerated for a keyword of `len` characters.
    pub fn tolerance(&self, len: usize) -> usize {
        if len < self.settings.min_length {
            return 0;
        }
        (len as f64 * self.settings.max_error_ratio).floor() as usize
    }
}

impl TextUtilities for StandardTextUtilities {
    fn is_isolated_match(&self, needle: &str, haystack: &str) -> bool {
        if needle.is_empty() {
            return false;
        }

        // Scan overlapping occurrences; any isolated one counts.
        let mut from = 0;
        while let Some(pos) = haystack[from..].find(needle) {
            let start = from + pos;
            let end = start + needle.len();
            if is_bounded(haystack, start, end) {
                return true;
            }
            from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
        false
    }

    fn fuzzy_contains(&self, needle: &str, haystack: &str) -> bool {
        let needle_len = needle.chars().count();
        if needle_len == 0 || needle_len < self.settings.min_length {
            return false;
        }
        let tolerance = self.tolerance(needle_len);

        // Byte offset of every char boundary, including the end of the string.
        let bounds: Vec<usize> = haystack
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(haystack.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let min_window = needle_len.saturating_sub(tolerance).max(1);
        let max_window = needle_len + tolerance;

        for start in 0..char_count {
            let s = bounds[start];
            if starts_with_whitespace(&haystack[s..]) || !boundary_before(haystack, s) {
                continue;
            }
            for len in min_window..=max_window {
                let end = start + len;
                if end > char_count {
                    break;
                }
                let e = bounds[end];
                let window = &haystack[s..e];
                if ends_with_whitespace(window) || !boundary_after(haystack, e) {
                    continue;
                }
                if strsim::damerau_levenshtein(needle, window) <= tolerance {
                    tracing::trace!(needle, window, "fuzzy match");
                    return true;
                }
            }
        }
        false
    }
}

/// Whether `haystack[start..end]` is not embedded in a larger word.
fn is_bounded(haystack: &str, start: usize, end: usize) -> bool {
    boundary_before(haystack, start) && boundary_after(haystack, end)
}

/// No word character directly before byte offset `idx`.
fn boundary_before(haystack: &str, idx: usize) -> bool {
    !haystack[..idx].chars().next_back().is_some_and(char::is_alphanumeric)
}

/// No word character at byte offset `idx`.
fn boundary_after(haystack: &str, idx: usize) -> bool {
    !haystack[idx..].chars().next().is_some_and(char::is_alphanumeric)
}

fn starts_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_whitespace)
}

fn ends_with_whitespace(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_whitespace)
}
