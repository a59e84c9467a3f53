//! Removes conversational-turn labels that leak into completions.

/// Role prefixes handled by the split pass, in order.
const SPLIT_INDICATORS: [&str; 3] = ["User:", "Human:", "Assistant:"];

/// The fixed assistant persona whose name leaks into replies.
const PERSONA_LABEL: &str = "Marv:";
const PERSONA_POSSESSIVE: &str = "Marv's";

/// Prompt-template leftover that models occasionally parrot back.
const TEMPLATE_LEFTOVER: &str = "Two-Sentence Horror Story:";

/// Strips role labels, persona artifacts, and template leftovers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleIndicatorStage;

impl RoleIndicatorStage {
    /// Applies the stage.
    ///
    /// The first pass keeps only the text after the last occurrence of
    /// each role label; the second pass removes whatever labels survive
    /// verbatim.
    #[must_use]
    pub fn apply(&self, _input_text: &str, output_text: &str) -> String {
        let mut text = output_text.to_string();

        for indicator in SPLIT_INDICATORS {
            if let Some((_, tail)) = text.rsplit_once(indicator) {
                text = tail.trim().to_string();
            }
        }

        if text.contains("User:") {
            text = text.replace("User:", "").trim().to_string();
        }
        if text.contains("Human:") {
            text = text.replace("Human:", "").trim().to_string();
        }
        if text.contains("Assistant:") {
            return text.replace("Assistant:", "").trim().to_string();
        }
        if text.contains("AI:") {
            return text.replace("AI:", "").trim().to_string();
        }
        if text.contains(PERSONA_LABEL) {
            text = text.replace(PERSONA_LABEL, "").trim().to_string();
        }
        if text.contains(PERSONA_POSSESSIVE) {
            text = text.replace(PERSONA_POSSESSIVE, "its");
        }
        if text.contains(TEMPLATE_LEFTOVER) {
            text = text.replace(TEMPLATE_LEFTOVER, "").trim().to_string();
        }

        text
    }
}
