//! Answer services built on remote collaborators.
//!
//! Each service resolves a question through an injected provider and
//! memoizes the outcome for the lifetime of the service instance.

mod cache;
mod custom_model;
mod topic;

pub use cache::{AnswerCache, AnswerKey};
pub use custom_model::{
    AnswerProvider, AnswerResponse, CustomModel, ProviderError, DEFAULT_SEARCH_MODEL,
    DEFAULT_THRESHOLD,
};
pub use topic::{ChatProvider, TopicExtractor};
