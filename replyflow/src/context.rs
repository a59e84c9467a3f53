//! Per-run pipeline state and stage selection flags.
//!
//! A [`PipelineContext`] is created at pipeline entry and discarded at
//! exit; nothing in the normalization core persists between runs.

/// Transient state threaded through the normalization stages.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    input_text: String,
    output_text: String,
}

impl PipelineContext {
    /// Creates a context for one pipeline run.
    #[must_use]
    pub fn new(input_text: impl Into<String>, output_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            output_text: output_text.into(),
        }
    }

    /// The original prompt. Never mutated.
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// The completion text in its current state of cleanup.
    #[must_use]
    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    /// Replaces the working text.
    pub fn set_output_text(&mut self, text: impl Into<String>) {
        self.output_text = text.into();
    }

    /// Trims the working text in place. The pipeline calls this at every
    /// stage boundary.
    pub fn trim_output(&mut self) {
        let trimmed = self.output_text.trim();
        if trimmed.len() != self.output_text.len() {
            self.output_text = trimmed.to_string();
        }
    }

    /// True once the working text has been emptied out.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.output_text.is_empty()
    }
}

/// Selects which stages participate in a pipeline run.
///
/// All stages are enabled by default. Disabling one removes it from the
/// chain without reordering the rest; the canonical order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    /// Strip a verbatim echo of the prompt.
    pub duplicate_input: bool,
    /// Collapse multi-paragraph completions into one answer region.
    pub completion_boundary: bool,
    /// Remove chat-style role prefixes.
    pub role_indicators: bool,
    /// Remove boilerplate filler phrases.
    pub cliches: bool,
    /// Remove list markers while keeping line structure.
    pub list_indicators: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            duplicate_input: true,
            completion_boundary: true,
            role_indicators: true,
            cliches: true,
            list_indicators: true,
        }
    }
}

impl StageConfig {
    /// Every stage enabled.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Every stage disabled; enable the ones under test with the
    /// `with_*` setters.
    #[must_use]
    pub fn none() -> Self {
        Self {
            duplicate_input: false,
            completion_boundary: false,
            role_indicators: false,
            cliches: false,
            list_indicators: false,
        }
    }

    /// Toggles the duplicate-input stage.
    #[must_use]
    pub fn with_duplicate_input(mut self, enabled: bool) -> Self {
        self.duplicate_input = enabled;
        self
    }

    /// Toggles the completion-boundary stage.
    #[must_use]
    pub fn with_completion_boundary(mut self, enabled: bool) -> Self {
        self.completion_boundary = enabled;
        self
    }

    /// Toggles the role-indicator stage.
    #[must_use]
    pub fn with_role_indicators(mut self, enabled: bool) -> Self {
        self.role_indicators = enabled;
        self
    }

    /// Toggles the cliche stage.
    #[must_use]
    pub fn with_cliches(mut self, enabled: bool) -> Self {
        self.cliches = enabled;
        self
    }

    /// Toggles the list-indicator stage.
    #[must_use]
    pub fn with_list_indicators(mut self, enabled: bool) -> Self {
        self.list_indicators = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_every_stage() {
        let config = StageConfig::default();
        assert!(config.duplicate_input);
        assert!(config.completion_boundary);
        assert!(config.role_indicators);
        assert!(config.cliches);
        assert!(config.list_indicators);
    }

    #[test]
    fn test_none_disables_every_stage() {
        assert_eq!(
            StageConfig::none(),
            StageConfig::all()
                .with_duplicate_input(false)
                .with_completion_boundary(false)
                .with_role_indicators(false)
                .with_cliches(false)
                .with_list_indicators(false)
        );
    }

    #[test]
    fn test_context_trim_output() {
        let mut ctx = PipelineContext::new("prompt", "  answer  ");
        ctx.trim_output();
        assert_eq!(ctx.output_text(), "answer");
        assert!(!ctx.is_exhausted());
    }

    #[test]
    fn test_context_exhaustion() {
        let mut ctx = PipelineContext::new("prompt", "   ");
        ctx.trim_output();
        assert!(ctx.is_exhausted());
    }
}
