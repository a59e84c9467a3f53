//! Completion request parameters with validated defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env var overriding the request timeout, in seconds.
const TIMEOUT_ENV: &str = "OPENAI_CREATE_TIMEOUT";

const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Error building completion parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// The prompt was missing or empty.
    #[error("prompt input required")]
    EmptyPrompt,
}

/// Validated parameters for a text-completion request.
///
/// Defaults favor an engaging general-purpose reply; callers override
/// individual knobs with the `with_*` setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionParams {
    /// The model (engine) to run against.
    pub engine: String,

    /// The prompt to execute.
    pub input_prompt: String,

    /// Randomness control, 0.0 - 1.0. Higher is more engaging and less
    /// predictable.
    pub temperature: f64,

    /// Maximum number of tokens to generate; the prompt length counts
    /// against the request budget.
    pub max_tokens: u32,

    /// Nucleus-sampling diversity control.
    pub top_p: f64,

    /// Server-side generations to sample from. Expensive; use with
    /// caution.
    pub best_of: u32,

    /// Penalty on tokens already frequent in the text so far, 0.0 - 2.0.
    pub frequency_penalty: f64,

    /// Penalty on tokens already present at all.
    pub presence_penalty: f64,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl CompletionParams {
    /// Builds parameters for `input_prompt` with the stock defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::EmptyPrompt`] when the prompt is empty.
    pub fn new(input_prompt: impl Into<String>) -> Result<Self, ParamsError> {
        let input_prompt = input_prompt.into();
        if input_prompt.is_empty() {
            return Err(ParamsError::EmptyPrompt);
        }

        Ok(Self {
            // The best all-around engine of its generation, and the most
            // expensive.
            engine: "text-davinci-002".to_string(),
            input_prompt,
            temperature: 0.7,
            max_tokens: 256,
            top_p: 1.0,
            best_of: 1,
            frequency_penalty: 0.0,
            presence_penalty: 2.0,
            timeout_seconds: timeout_from_env(),
        })
    }

    /// Sets the engine.
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the generation budget.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the nucleus-sampling control.
    #[must_use]
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    /// Sets the server-side generation count.
    #[must_use]
    pub fn with_best_of(mut self, best_of: u32) -> Self {
        self.best_of = best_of;
        self
    }

    /// Sets the frequency penalty.
    #[must_use]
    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = penalty;
        self
    }

    /// Sets the presence penalty.
    #[must_use]
    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = penalty;
        self
    }
}

fn timeout_from_env() -> u64 {
    std::env::var(TIMEOUT_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_defaults() {
        let params = CompletionParams::new("a prompt").unwrap();
        assert_eq!(params.engine, "text-davinci-002");
        assert!((params.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(params.max_tokens, 256);
        assert!((params.top_p - 1.0).abs() < f64::EPSILON);
        assert_eq!(params.best_of, 1);
        assert!((params.frequency_penalty).abs() < f64::EPSILON);
        assert!((params.presence_penalty - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_prompt_is_rejected() {
        assert_eq!(
            CompletionParams::new("").unwrap_err(),
            ParamsError::EmptyPrompt
        );
    }

    #[test]
    fn test_setters_override_defaults() {
        let params = CompletionParams::new("a prompt")
            .unwrap()
            .with_engine("text-curie-001")
            .with_temperature(0.2)
            .with_max_tokens(64)
            .with_best_of(3);
        assert_eq!(params.engine, "text-curie-001");
        assert!((params.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(params.max_tokens, 64);
        assert_eq!(params.best_of, 3);
    }

    #[test]
    fn test_serializes_request_shape() {
        let json = serde_json::to_value(CompletionParams::new("a prompt").unwrap()).unwrap();
        assert_eq!(json["input_prompt"], "a prompt");
        assert_eq!(json["best_of"], 1);
    }
}
