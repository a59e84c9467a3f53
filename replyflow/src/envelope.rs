//! Completion response envelope types.
//!
//! The envelope is owned by whatever layer performed the completion call;
//! the normalization pipeline only ever reads it. Every layer is optional
//! because the provider gives no guarantees about the response shape.

use serde::{Deserialize, Serialize};

/// A single candidate completion returned by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    /// Raw completion text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    /// Position of this choice in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl Choice {
    /// Creates a choice holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: None,
            index: None,
        }
    }
}

/// The output region of a completion response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionOutput {
    /// Candidate completions, best first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
}

/// The response envelope produced by a completion call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionEnvelope {
    /// The validated request parameters that produced this response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,

    /// The provider's output region, absent when the call was refused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<CompletionOutput>,
}

impl CompletionEnvelope {
    /// Wraps a single choice text; the shape fixtures need most.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: None,
            output: Some(CompletionOutput {
                choices: Some(vec![Choice::new(text)]),
            }),
        }
    }

    /// An envelope carrying request metadata but no output region.
    #[must_use]
    pub fn without_output(input: serde_json::Value) -> Self {
        Self {
            input: Some(input),
            output: None,
        }
    }

    /// True when an output region is present.
    #[must_use]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }
}
