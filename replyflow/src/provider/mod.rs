//! HTTP glue for an OpenAI-compatible completion endpoint.
//!
//! Everything here is thin transport plumbing around the core: it builds
//! the envelope the normalization pipeline consumes and otherwise stays
//! out of the way. Refusals the caller can do nothing about (rate limits,
//! credentials, availability) degrade to an envelope with no output
//! region instead of an error.

mod chat_completion;
mod connector;
mod text_completion;

pub use chat_completion::ChatCompletionRunner;
pub use connector::{Connector, TransportError};
pub use text_completion::TextCompletionRunner;
