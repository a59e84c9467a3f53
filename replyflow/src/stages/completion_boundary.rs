//! Collapses completions that talk past the real answer.

use crate::utils::collapse_spaces;

const PARAGRAPH_BREAK: &str = "\n\n";

/// Paragraphs at or below this length are continuation noise.
const NOISE_LEN: usize = 5;

/// Resolves the boundary of the substantive answer in a completion.
///
/// Two shapes show up in practice: the model finishes the user's sentence
/// before answering (the output starts with a space), or it emits a brief
/// throwaway paragraph like `"0"` ahead of the reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionBoundaryStage;

impl CompletionBoundaryStage {
    /// Applies the stage.
    #[must_use]
    pub fn apply(&self, _input_text: &str, output_text: &str) -> String {
        // A leading space means the model was completing the user's
        // sentence; the answer is the last non-empty paragraph. Blank-only
        // text passes through untouched rather than falling into the
        // paragraph merge below.
        if output_text.starts_with(' ') && output_text.contains(PARAGRAPH_BREAK) {
            return output_text
                .rsplit(PARAGRAPH_BREAK)
                .map(str::trim)
                .find(|segment| !segment.is_empty())
                .map_or_else(|| output_text.to_string(), ToString::to_string);
        }

        // Brief lead-in paragraphs ahead of the reply: keep the
        // substantive paragraphs and merge them into one.
        if output_text.contains(PARAGRAPH_BREAK) {
            let merged = output_text
                .split(PARAGRAPH_BREAK)
                .map(str::trim)
                .filter(|paragraph| paragraph.chars().count() > NOISE_LEN)
                .collect::<Vec<_>>()
                .join(" ");
            return collapse_spaces(&merged);
        }

        output_text.to_string()
    }
}
