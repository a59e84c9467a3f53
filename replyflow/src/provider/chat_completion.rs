//! Chat-completion runner.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use super::connector::{live_calls_enabled, Connector, TransportError};
use crate::chat::format_messages;
use crate::envelope::{Choice, CompletionEnvelope, CompletionOutput};
use crate::errors::ReplyflowError;
use crate::events::{EventSink, NoOpEventSink, ServiceEvent};
use crate::utils::Stopwatch;

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Request timeout for chat calls, in seconds.
const CHAT_TIMEOUT_SECONDS: u64 = 30;

/// Statuses recovered to an absent output region rather than an error.
const RECOVERABLE: [u16; 4] = [401, 403, 429, 503];

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Runs a chat completion over an alternating message history.
pub struct ChatCompletionRunner {
    conn: Connector,
    sink: Arc<dyn EventSink>,
}

impl ChatCompletionRunner {
    /// Creates a runner over the given connection.
    #[must_use]
    pub fn new(conn: Connector) -> Self {
        Self {
            conn,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Executes a chat completion for `input_prompt` over `messages`.
    ///
    /// The message list must come in odd-numbered multiples (user turns
    /// at even positions). Endpoint refusals the caller cannot act on
    /// degrade to an envelope with no output region.
    ///
    /// # Errors
    ///
    /// Returns a formatting error for an even message count, and
    /// propagates unrecovered transport failures.
    pub async fn run(
        &self,
        input_prompt: &str,
        messages: &[String],
        model: Option<&str>,
    ) -> Result<CompletionEnvelope, ReplyflowError> {
        let model = model.unwrap_or(DEFAULT_MODEL);
        let formatted = format_messages(input_prompt, messages)?;
        let request_input = json!({
            "input_prompt": input_prompt,
            "model": model,
            "messages": &formatted,
        });

        if !live_calls_enabled() {
            self.sink.try_emit(
                ServiceEvent::new("chat-completion", "no-openai")
                    .with_data(json!({ "input_prompt": input_prompt, "model": model })),
            );
            return Ok(CompletionEnvelope::without_output(request_input));
        }

        let sw = Stopwatch::new();
        let body = json!({
            "model": model,
            "messages": &formatted,
        });

        let response = self
            .conn
            .post(
                "/v1/chat/completions",
                &body,
                Duration::from_secs(CHAT_TIMEOUT_SECONDS),
            )
            .await
            .map_err(TransportError::from)?;

        let status = response.status().as_u16();
        if RECOVERABLE.contains(&status) {
            error!(status, "chat endpoint refused the request");
            return Ok(CompletionEnvelope::without_output(request_input));
        }
        if !response.status().is_success() {
            return Err(TransportError::Status(status).into());
        }

        let parsed: ChatResponse = response.json().await.map_err(TransportError::from)?;
        debug!(elapsed = %sw, model, "chat call finished");

        let choices = parsed
            .choices
            .into_iter()
            .map(|choice| Choice {
                text: Some(choice.message.content),
                finish_reason: choice.finish_reason,
                index: choice.index,
            })
            .collect();

        Ok(CompletionEnvelope {
            input: Some(request_input),
            output: Some(CompletionOutput {
                choices: Some(choices),
            }),
        })
    }
}
