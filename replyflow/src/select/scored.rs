//! Scored candidate answers.

use serde::{Deserialize, Serialize};

/// One candidate answer with its relevance score.
///
/// Candidates are immutable once received; selection only filters and
/// samples, never merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Candidate answer text.
    pub text: String,

    /// Relevance score from the search call.
    pub score: f64,
}

impl ScoredCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}
