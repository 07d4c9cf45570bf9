//! Trait seams between the grading engine and its collaborators.
//!
//! The engine never inspects how text matching is done or where the learner's
//! answer comes from; hosts plug in their own implementations here.

/// Text matching primitives the matcher delegates to.
pub trait TextUtilities: Send + Sync {
    /// Whether `needle` occurs in `haystack` without being embedded in a
    /// larger word.
    fn is_isolated_match(&self, needle: &str, haystack: &str) -> bool;

    /// Whether `needle` is approximately present in `haystack`, tolerating
    /// minor spelling deviations.
    fn fuzzy_contains(&self, needle: &str, haystack: &str) -> bool;
}

/// Source of the learner's current answer (a text field, a file, stdin).
pub trait InputProvider {
    /// The raw, un-normalized answer text.
    fn current_input(&self) -> String;
}

impl InputProvider for str {
    fn current_input(&self) -> String {
        self.to_string()
    }
}

impl InputProvider for String {
    fn current_input(&self) -> String {
        self.clone()
    }
}

impl<T: InputProvider + ?Sized> InputProvider for &T {
    fn current_input(&self) -> String {
        (**self).current_input()
    }
}
