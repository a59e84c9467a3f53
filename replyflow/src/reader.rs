//! First-choice extraction from a completion envelope.
//!
//! The cleanup stages key on "last paragraph" semantics, so the reader
//! normalizes line-break encoding before anything else looks at the text.

use crate::envelope::CompletionEnvelope;
use crate::utils::collapse_spaces;

/// Marks line-break positions while paragraph runs are collapsed.
const SENTINEL: char = '\u{1E}';

/// Pulls the first choice's text out of a response envelope.
///
/// Returns `None` when the output region, the choice list, or the first
/// choice's text is absent, or when nothing survives normalization.
/// Models tend to put throwaway preamble ahead of the substantive final
/// paragraph, so only the last line-break-delimited segment is kept.
#[must_use]
pub fn read_first_choice(envelope: &CompletionEnvelope) -> Option<String> {
    let choices = envelope.output.as_ref()?.choices.as_ref()?;
    let text = choices.first()?.text.as_ref()?;

    let segment = last_segment(text.trim());
    let segment = collapse_spaces(segment.trim());
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// Keeps the last line-break-delimited segment of `text`.
///
/// Doubled breaks are collapsed iteratively first so that widely spaced
/// paragraphs cannot leave a partially collapsed run behind, then the
/// split lands on single-break boundaries.
fn last_segment(text: &str) -> String {
    let sentinel = SENTINEL.to_string();
    let doubled: String = [SENTINEL, SENTINEL].iter().collect();

    let mut marked = text.replace("\r\n", "\n").replace('\n', &sentinel);
    while marked.contains(&doubled) {
        marked = marked.replace(&doubled, &sentinel);
    }

    marked
        .rsplit(SENTINEL)
        .next()
        .unwrap_or_default()
        .replace(SENTINEL, "\n")
}
