//! Removes list and numbering markers while keeping line structure.

const LINE_BREAK: char = '\n';

/// Highest list index the marker templates cover.
const MAX_INDEX: usize = 15;

/// Strips leading list markers from each line.
///
/// ```text
/// 1. item 1          item 1
/// 2. item 2    ->    item 2
/// 3. item 3          item 3
/// ```
///
/// Line breaks survive; that is what separates this stage from the
/// paragraph merge, which discards structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListIndicatorStage;

impl ListIndicatorStage {
    /// Applies the stage.
    #[must_use]
    pub fn apply(&self, _input_text: &str, output_text: &str) -> String {
        if !output_text.contains(LINE_BREAK) {
            return output_text.to_string();
        }

        let mut normalized = Vec::new();
        for line in output_text.split(LINE_BREAK).map(str::trim) {
            if let Some(rest) = line.strip_prefix('-') {
                normalized.push(rest.trim().to_string());
                continue;
            }

            if line.contains('.') {
                normalized.push(strip_numbered_marker(line));
                continue;
            }

            normalized.push(line.to_string());
        }

        normalized.retain(|line| !line.trim().is_empty());
        normalized.join("\n")
    }
}

/// Tries the numbered-marker templates in order; the first prefix match
/// wins and is removed.
fn strip_numbered_marker(line: &str) -> String {
    for index in 1..=MAX_INDEX {
        for marker in [
            format!("{index}:"),
            format!("{index}."),
            format!("{index})"),
            format!("variation {index}:"),
            format!("variation {index}."),
            format!("variation {index})"),
        ] {
            if let Some(rest) = line.strip_prefix(&marker) {
                return rest.trim().to_string();
            }
        }
    }
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STAGE: ListIndicatorStage = ListIndicatorStage;

    #[test]
    fn test_numbered_list() {
        assert_eq!(STAGE.apply("", "1. item 1\n2. item 2"), "item 1\nitem 2");
    }

    #[test]
    fn test_dashed_list() {
        assert_eq!(
            STAGE.apply("", "- item 1\n- item 2\n- item 3"),
            "item 1\nitem 2\nitem 3"
        );
    }

    #[test]
    fn test_colon_markers() {
        assert_eq!(
            STAGE.apply("", "1: item one.\n2: item two."),
            "item one.\nitem two."
        );
    }

    #[test]
    fn test_variation_markers() {
        assert_eq!(
            STAGE.apply("", "variation 1: first.\nvariation 2: second."),
            "first.\nsecond."
        );
    }

    #[test]
    fn test_double_digit_markers() {
        assert_eq!(STAGE.apply("", "12. item 12\n13. item 13"), "item 12\nitem 13");
    }

    // Numbered markers are only attempted on lines that contain a
    // period, so a bare "1)" marker without one is kept verbatim.
    #[test]
    fn test_parenthesis_marker_needs_a_period() {
        assert_eq!(
            STAGE.apply("", "1) item one\n2) item two."),
            "1) item one\nitem two."
        );
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        assert_eq!(STAGE.apply("", "1. item 1\n\n2. item 2"), "item 1\nitem 2");
    }

    #[test]
    fn test_single_line_is_untouched() {
        assert_eq!(STAGE.apply("", "2. not a list"), "2. not a list");
    }

    #[test]
    fn test_idempotent_on_clean_text() {
        let clean = "first line\nsecond line\nthird line";
        let once = STAGE.apply("", clean);
        let twice = STAGE.apply("", &once);
        assert_eq!(once, clean);
        assert_eq!(twice, once);
    }
}
