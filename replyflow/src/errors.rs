//! Error types for replyflow services.
//!
//! The normalization core itself never fails: missing or emptied text is
//! recovered to an explicit "no result" (`None`). The enums here cover
//! the fallible glue around it.

use thiserror::Error;

/// The unified error type for replyflow operations.
#[derive(Debug, Error)]
pub enum ReplyflowError {
    /// Chat message formatting failed.
    #[error("{0}")]
    ChatFormat(#[from] crate::chat::ChatFormatError),

    /// Completion parameter validation failed.
    #[error("{0}")]
    Params(#[from] crate::params::ParamsError),

    /// An answer provider failed.
    #[error("{0}")]
    Provider(#[from] crate::answers::ProviderError),

    /// Transport-level completion failure.
    #[cfg(feature = "provider")]
    #[error("{0}")]
    Transport(#[from] crate::provider::TransportError),
}
