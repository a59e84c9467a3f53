//! Connection plumbing for the completion endpoint.

use std::time::Duration;

use thiserror::Error;

/// Env var holding the API key.
const KEY_ENV: &str = "OPENAI_KEY";

/// Env var holding the organization id.
const ORG_ENV: &str = "OPENAI_ORG";

/// Kill switch; the runners return a null envelope unless this is
/// truthy.
const USE_ENV: &str = "USE_OPENAI";

/// Transport-level failure talking to the completion endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No API key in the environment.
    #[error("missing OPENAI_KEY in the environment")]
    MissingKey,

    /// The HTTP request itself failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a status the runners do not recover.
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Credentials and client for the completion endpoint.
#[derive(Debug, Clone)]
pub struct Connector {
    client: reqwest::Client,
    api_key: String,
    organization: Option<String>,
    base_url: String,
}

impl Connector {
    /// Builds a connector from `OPENAI_KEY` and `OPENAI_ORG`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MissingKey`] when no key is set.
    pub fn from_env() -> Result<Self, TransportError> {
        let api_key = std::env::var(KEY_ENV).map_err(|_| TransportError::MissingKey)?;
        let organization = std::env::var(ORG_ENV).ok();
        Ok(Self::new(api_key, organization))
    }

    /// Builds a connector with explicit credentials.
    #[must_use]
    pub fn new(api_key: impl Into<String>, organization: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            organization,
            base_url: "https://api.openai.com".to_string(),
        }
    }

    /// Overrides the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(body);
        if let Some(ref org) = self.organization {
            request = request.header("OpenAI-Organization", org);
        }
        request.send().await
    }
}

/// True when the kill switch enables live calls.
pub(crate) fn live_calls_enabled() -> bool {
    std::env::var(USE_ENV)
        .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}
