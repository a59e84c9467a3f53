//! Custom-model answer resolution with memoization.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::cache::{AnswerCache, AnswerKey};
use crate::events::{EventSink, NoOpEventSink, ServiceEvent};
use crate::select::{ScoredCandidate, TopResponseSelector};
use crate::utils::Stopwatch;

/// Default model used to interpret the query and search.
pub const DEFAULT_SEARCH_MODEL: &str = "text-davinci-002";

/// Default accuracy threshold for filtering results.
pub const DEFAULT_THRESHOLD: f64 = 25.0;

/// Error from an answer provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider failed to process the request.
    #[error("provider request failed: {0}")]
    Request(String),
}

/// Scored documents returned by a custom-model search call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Candidate documents with relevance scores.
    pub selected_documents: Vec<ScoredCandidate>,
}

/// Remote collaborator that resolves a question to scored documents.
///
/// `Ok(None)` means the search found no similar documents; that is an
/// ordinary miss, not a failure.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Runs the search call for `input_text`.
    async fn answer(
        &self,
        input_text: &str,
        search_model: &str,
    ) -> Result<Option<AnswerResponse>, ProviderError>;
}

/// Queries a trained custom model and memoizes resolved answers.
///
/// A given `(input_text, search_model, threshold)` triple is resolved at
/// most once per instance; every later call is served from the cache and
/// bypasses both the provider and the selector.
pub struct CustomModel {
    model_name: String,
    provider: Arc<dyn AnswerProvider>,
    selector: TopResponseSelector,
    cache: Arc<AnswerCache>,
    sink: Arc<dyn EventSink>,
}

impl CustomModel {
    /// Creates a service for the named trained model.
    #[must_use]
    pub fn new(model_name: impl Into<String>, provider: Arc<dyn AnswerProvider>) -> Self {
        Self {
            model_name: model_name.into(),
            provider,
            selector: TopResponseSelector::new(),
            cache: Arc::new(AnswerCache::new()),
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Replaces the memo table.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<AnswerCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replaces the tie-break selector.
    #[must_use]
    pub fn with_selector(mut self, selector: TopResponseSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The memo table, for inspection and test resets.
    #[must_use]
    pub fn cache(&self) -> &AnswerCache {
        &self.cache
    }

    /// Resolves `input_text` through the provider and the tie-break
    /// selector.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; cache hits never fail.
    pub async fn process(
        &self,
        input_text: &str,
        search_model: &str,
        threshold: f64,
    ) -> Result<Option<String>, ProviderError> {
        let key = AnswerKey::new(input_text, search_model, threshold);
        if let Some(memoized) = self.cache.get(&key) {
            return Ok(memoized);
        }

        let sw = Stopwatch::new();
        let Some(response) = self.provider.answer(input_text, search_model).await? else {
            info!(
                input_text,
                model_name = %self.model_name,
                search_model,
                "no similar documents were found"
            );
            self.cache.insert(key, None);
            return Ok(None);
        };

        let output_text = self
            .selector
            .select(&response.selected_documents, threshold);

        if let Some(ref text) = output_text {
            self.sink
                .emit(
                    ServiceEvent::new("custom-model", "answer-resolved")
                        .with_elapsed_ms(sw.elapsed_ms())
                        .with_data(json!({
                            "input_text": input_text,
                            "output_text": text,
                            "search_model": search_model,
                        })),
                )
                .await;
            info!(
                elapsed = %sw,
                input_text = input_text.trim(),
                output_text = %text,
                "custom model query completed"
            );
        }

        self.cache.insert(key, output_text.clone());
        Ok(output_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingEventSink;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    struct MockAnswerProvider {
        response: Option<AnswerResponse>,
        calls: Mutex<usize>,
    }

    impl MockAnswerProvider {
        fn returning(response: Option<AnswerResponse>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(0),
            })
        }

        fn call_count(&self) -> usize {
            *self.calls.lock()
        }
    }

    #[async_trait]
    impl AnswerProvider for MockAnswerProvider {
        async fn answer(
            &self,
            _input_text: &str,
            _search_model: &str,
        ) -> Result<Option<AnswerResponse>, ProviderError> {
            *self.calls.lock() += 1;
            Ok(self.response.clone())
        }
    }

    fn documents(pairs: &[(&str, f64)]) -> AnswerResponse {
        AnswerResponse {
            selected_documents: pairs
                .iter()
                .map(|(text, score)| ScoredCandidate::new(*text, *score))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_resolves_through_selector() {
        let provider = MockAnswerProvider::returning(Some(documents(&[
            ("the answer", 30.0),
            ("a weak answer", 5.0),
        ])));
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _);

        let result = model
            .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
            .await
            .unwrap();

        assert_eq!(result.as_deref(), Some("the answer"));
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let provider = MockAnswerProvider::returning(Some(documents(&[("the answer", 30.0)])));
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _);

        for _ in 0..3 {
            let result = model
                .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
                .await
                .unwrap();
            assert_eq!(result.as_deref(), Some("the answer"));
        }

        assert_eq!(provider.call_count(), 1);
        assert_eq!(model.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_arguments_miss_the_cache() {
        let provider = MockAnswerProvider::returning(Some(documents(&[("the answer", 30.0)])));
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _);

        model
            .process("a question", DEFAULT_SEARCH_MODEL, 25.0)
            .await
            .unwrap();
        model
            .process("a question", DEFAULT_SEARCH_MODEL, 30.0)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_provider_miss_is_memoized() {
        let provider = MockAnswerProvider::returning(None);
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _);

        for _ in 0..2 {
            let result = model
                .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
                .await
                .unwrap();
            assert_eq!(result, None);
        }

        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clearing_the_cache_reaches_the_provider_again() {
        let provider = MockAnswerProvider::returning(Some(documents(&[("the answer", 30.0)])));
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _);

        model
            .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
            .await
            .unwrap();
        model.cache().clear();
        model
            .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_resolution_emits_an_event() {
        let sink = Arc::new(CollectingEventSink::new());
        let provider = MockAnswerProvider::returning(Some(documents(&[("the answer", 30.0)])));
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _)
            .with_event_sink(Arc::clone(&sink) as _);

        model
            .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
            .await
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "answer-resolved");
        assert_eq!(events[0].data["output_text"], "the answer");
    }

    #[tokio::test]
    async fn test_below_threshold_resolves_to_none() {
        let provider = MockAnswerProvider::returning(Some(documents(&[("weak", 10.0)])));
        let model = CustomModel::new("trained-model", Arc::clone(&provider) as _);

        let result = model
            .process("a question", DEFAULT_SEARCH_MODEL, DEFAULT_THRESHOLD)
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
