//! Tie-band selection over scored candidates.

use std::sync::Arc;

use serde_json::json;

use crate::events::{EventSink, NoOpEventSink, ServiceEvent};
use crate::sampling::{Sampler, ThreadRngSampler};
use crate::select::ScoredCandidate;
use crate::utils::Stopwatch;

/// Width of the score band treated as a statistical tie.
const TIE_BAND: f64 = 10.0;

/// Picks one displayable answer from a scored candidate set.
///
/// Candidates inside [`TIE_BAND`] of the top score are statistically
/// indistinguishable, so the winner among them is drawn at random rather
/// than always returning the single highest-scoring (often near-duplicate
/// or overfit) answer. The randomness stays inside the band; it is never
/// global.
#[derive(Clone)]
pub struct TopResponseSelector {
    sampler: Arc<dyn Sampler>,
    sink: Arc<dyn EventSink>,
}

impl Default for TopResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TopResponseSelector {
    /// Creates a selector with live randomness and no event sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sampler: Arc::new(ThreadRngSampler),
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Replaces the randomness source.
    #[must_use]
    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the chosen candidate text, or `None` when nothing clears
    /// `threshold`.
    #[must_use]
    pub fn select(&self, candidates: &[ScoredCandidate], threshold: f64) -> Option<String> {
        let sw = Stopwatch::new();
        let output_text = self.pick(candidates, threshold);

        self.sink.try_emit(
            ServiceEvent::new("top-response-selector", "extract-top-response")
                .with_elapsed_ms(sw.elapsed_ms())
                .with_data(json!({
                    "candidates": candidates.len(),
                    "threshold": threshold,
                    "output_text": output_text,
                })),
        );

        output_text
    }

    fn pick(&self, candidates: &[ScoredCandidate], threshold: f64) -> Option<String> {
        // Later duplicates at the same score overwrite earlier ones;
        // scores are effectively unique in practice.
        let mut by_score: Vec<(f64, &str)> = Vec::new();
        for candidate in candidates.iter().filter(|c| c.score >= threshold) {
            match by_score
                .iter_mut()
                .find(|(score, _)| *score == candidate.score)
            {
                Some(entry) => entry.1 = candidate.text.as_str(),
                None => by_score.push((candidate.score, candidate.text.as_str())),
            }
        }

        if by_score.is_empty() {
            return None;
        }
        if by_score.len() == 1 {
            return Some(by_score[0].1.to_string());
        }

        let top = by_score.iter().map(|(score, _)| *score).fold(f64::MIN, f64::max);
        let spread = top - TIE_BAND;
        by_score.retain(|(score, _)| *score >= spread);

        if by_score.len() == 1 {
            return Some(by_score[0].1.to_string());
        }

        let index = self.sampler.choose(by_score.len());
        by_score.get(index).map(|(_, text)| (*text).to_string())
    }
}
