//! Learner input normalization.

/// Map raw learner input to the string the matcher evaluates.
///
/// Every line break (`\r\n`, `\r` or `\n`) becomes a single space. Then one
/// left-to-right pass replaces each non-overlapping pair of adjacent
/// whitespace characters with a single space. The pass is not repeated, so a
/// run of three or more whitespace characters keeps some residual whitespace.
/// Leading and trailing whitespace is kept.
pub fn normalize(raw: &str) -> String {
    let single_line = raw.replace("\r\n", " ").replace(['\r', '\n'], " ");

    let mut out = String::with_capacity(single_line.len());
    let mut chars = single_line.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && chars.peek().is_some_and(|next| next.is_whitespace()) {
            chars.next();
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(normalize("a\nb"), "a b");
        assert_eq!(normalize("a\rb"), "a b");
        assert_eq!(normalize("a\r\nb"), "a b");
    }

    #[test]
    fn two_spaces_collapse() {
        assert_eq!(normalize("a  b"), "a b");
        assert_eq!(normalize("a \tb"), "a b");
    }

    #[test]
    fn long_runs_keep_residual_whitespace() {
        assert_eq!(normalize("a   b"), "a  b");
        assert_eq!(normalize("a    b"), "a  b");
        assert_eq!(normalize("a     b"), "a   b");
    }

    #[test]
    fn blank_line_between_paragraphs() {
        // "\n\n" becomes two spaces, which then collapse to one
        assert_eq!(normalize("first\n\nsecond"), "first second");
        // "\r\n\r\n" likewise
        assert_eq!(normalize("first\r\n\r\nsecond"), "first second");
    }

    #[test]
    fn no_trimming() {
        assert_eq!(normalize(" a "), " a ");
        assert_eq!(normalize(""), "");
    }
}
