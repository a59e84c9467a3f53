//! Text-completion runner.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, error};

use super::connector::{live_calls_enabled, Connector, TransportError};
use crate::envelope::{CompletionEnvelope, CompletionOutput};
use crate::events::{EventSink, NoOpEventSink, ServiceEvent};
use crate::params::CompletionParams;
use crate::utils::Stopwatch;

/// Statuses recovered to an absent output region rather than an error:
/// authentication, permission, rate limit, service unavailable.
const RECOVERABLE: [u16; 4] = [401, 403, 429, 503];

/// Runs a text completion and wraps the reply in an envelope.
pub struct TextCompletionRunner {
    conn: Connector,
    sink: Arc<dyn EventSink>,
}

impl TextCompletionRunner {
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

    /// Executes `params` against the endpoint.
    ///
    /// Rate-limit, permission, authentication, and availability refusals
    /// come back as an envelope with no output region; the caller treats
    /// that exactly like an empty completion.
    ///
    /// # Errors
    ///
    /// Propagates any other transport failure.
    pub async fn run(&self, params: &CompletionParams) -> Result<CompletionEnvelope, TransportError> {
        if !live_calls_enabled() {
            self.sink.try_emit(
                ServiceEvent::new("text-completion", "no-openai")
                    .with_data(json!({ "input_prompt": params.input_prompt })),
            );
            return Ok(CompletionEnvelope::without_output(json!(params)));
        }

        let sw = Stopwatch::new();
        let body = json!({
            "model": params.engine,
            "prompt": params.input_prompt,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
            "top_p": params.top_p,
            "best_of": params.best_of,
            "frequency_penalty": params.frequency_penalty,
            "presence_penalty": params.presence_penalty,
        });

        let response = self
            .conn
            .post(
                "/v1/completions",
                &body,
                Duration::from_secs(params.timeout_seconds),
            )
            .await?;

        let status = response.status().as_u16();
        if RECOVERABLE.contains(&status) {
            error!(status, "completion endpoint refused the request");
            return Ok(CompletionEnvelope::without_output(json!(params)));
        }
        if !response.status().is_success() {
            return Err(TransportError::Status(status));
        }

        let output: CompletionOutput = response.json().await?;
        debug!(elapsed = %sw, engine = %params.engine, "completion call finished");

        Ok(CompletionEnvelope {
            input: Some(json!(params)),
            output: Some(output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Live calls stay off unless the environment opts in, so the runner
    // must hand back a null envelope without touching the network.
    #[tokio::test]
    async fn test_disabled_runner_returns_null_envelope() {
        std::env::remove_var("USE_OPENAI");
        let runner = TextCompletionRunner::new(Connector::new("key", None));
        let params = CompletionParams::new("a prompt").unwrap();

        let envelope = runner.run(&params).await.unwrap();

        assert!(!envelope.has_output());
        assert_eq!(envelope.input.unwrap()["input_prompt"], "a prompt");
    }

    #[tokio::test]
    async fn test_disabled_runner_emits_event() {
        std::env::remove_var("USE_OPENAI");
        let sink = Arc::new(crate::events::CollectingEventSink::new());
        let runner = TextCompletionRunner::new(Connector::new("key", None))
            .with_event_sink(Arc::clone(&sink) as _);

        runner
            .run(&CompletionParams::new("a prompt").unwrap())
            .await
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "no-openai");
    }
}
