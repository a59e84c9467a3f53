//! Small text helpers shared by the reader and the stages.

use regex::Regex;
use std::sync::OnceLock;

fn multi_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").unwrap())
}

/// Collapses every run of repeated spaces down to a single space.
#[must_use]
pub fn collapse_spaces(text: &str) -> String {
    multi_space().replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("a  b   c"), "a b c");
    }

    #[test]
    fn test_collapse_spaces_leaves_single_spaces() {
        assert_eq!(collapse_spaces("a b c"), "a b c");
    }

    #[test]
    fn test_collapse_spaces_keeps_line_breaks() {
        assert_eq!(collapse_spaces("a  b\nc  d"), "a b\nc d");
    }
}
