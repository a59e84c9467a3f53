//! Removes canned filler phrases that add no information.

/// Boilerplate removed verbatim wherever it occurs.
///
/// Matching is case-sensitive and the phrases are disjoint by
/// construction, so removal order does not matter.
const CLICHES: [&str; 10] = [
    "I hope this helps!",
    "Hope this helps!",
    "Great question!",
    "Thanks for asking!",
    "Thank you for asking!",
    "I'm here to help!",
    "Happy to help!",
    "Let me know if you have any other questions.",
    "Let me know if there's anything else I can help with.",
    "Is there anything else I can help you with?",
];

/// Strips marketing and chatbot boilerplate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClicheStage;

impl ClicheStage {
    /// Applies the stage. Trimming is left to the pipeline.
    #[must_use]
    pub fn apply(&self, _input_text: &str, output_text: &str) -> String {
        let mut text = output_text.to_string();
        for phrase in CLICHES {
            if text.contains(phrase) {
                text = text.replace(phrase, "");
            }
        }
        text
    }
}
