//! Primary-topic extraction from a single input sentence.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use super::custom_model::ProviderError;

/// Instruction sent with every topic request.
const TOPIC_PROMPT: &str = "Extract the primary topic. Only respond with the topic and no other text.  If you can't find a topic, don't print anything.";

/// Replies that mean the model failed to find a topic.
const INVALID_RESPONSES: [&str; 8] = [
    "the input is incomplete",
    "topic extraction is not possible",
    "does not provide enough information",
    "not related to any specific topic",
    "not a valid question",
    "n/a",
    "no topic",
    "please provide a complete input",
];

/// Prefixes the model tacks onto the bare topic.
const TOPIC_PREFIXES: [&str; 3] = ["primary topic:", "the primary topic is", "the topic is"];

/// Chat collaborator used to ask for the topic.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the assistant reply for a system prompt plus one user
    /// message, or `None` when the model printed nothing.
    async fn chat(
        &self,
        input_prompt: &str,
        message: &str,
    ) -> Result<Option<String>, ProviderError>;
}

/// Finds and extracts a primary topic from an input sentence.
///
/// Raw replies are memoized per input for the lifetime of the instance.
pub struct TopicExtractor {
    provider: Arc<dyn ChatProvider>,
    cache: DashMap<String, Option<String>>,
}

impl TopicExtractor {
    /// Creates an extractor over the given chat collaborator.
    #[must_use]
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            cache: DashMap::new(),
        }
    }

    /// Drops the memoized replies.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Extracts the primary topic of `input_text`, if the model finds
    /// one.
    ///
    /// # Errors
    ///
    /// Propagates provider failures on cache misses.
    pub async fn process(&self, input_text: &str) -> Result<Option<String>, ProviderError> {
        let raw = match self.cache.get(input_text) {
            Some(hit) => hit.value().clone(),
            None => {
                let reply = self
                    .provider
                    .chat(TOPIC_PROMPT, input_text)
                    .await?
                    .filter(|text| !text.is_empty());
                self.cache.insert(input_text.to_string(), reply.clone());
                reply
            }
        };

        Ok(raw.as_deref().and_then(clean_topic))
    }
}

/// Normalizes a raw topic reply; `None` when it is a non-answer.
fn clean_topic(raw: &str) -> Option<String> {
    let mut result = raw.trim().to_string();
    let lowered = result.to_lowercase();

    for prefix in TOPIC_PREFIXES {
        if lowered.starts_with(prefix) {
            if let Some(rest) = result.get(prefix.len()..) {
                result = rest.trim().to_string();
            }
            break;
        }
    }

    for invalid in INVALID_RESPONSES {
        if lowered.contains(invalid) {
            return None;
        }
    }
    if lowered.starts_with("none ") {
        return None;
    }

    result = result.replace('\'', "").replace('"', "");
    if let Some(stripped) = result.strip_suffix('.') {
        result = stripped.trim().to_string();
    }

    (!result.is_empty()).then_some(result)
}
