//! The completion output-normalization pipeline.


use std::sync::Arc;

use tracing::debug;

use crate::context::{PipelineContext, StageConfig};
use crate::envelope::CompletionEnvelope;
use crate::reader;
use crate::sampling::{Sampler, ThreadRngSampler};
use crate::stages::build_chain;
use crate::utils::Stopwatch;

/// Orders the normalization stages and short-circuits on empty text.
///
/// The pipeline never returns an empty string: the moment any stage
/// empties the working text, the run aborts to `None`, so "no result"
/// stays distinguishable from a successful answer downstream.
#[derive(Debug, Clone)]
pub struct OutputPipeline {
    sampler: Arc<dyn Sampler>,
}

impl Default for OutputPipeline {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngSampler))
    }
}

impl OutputPipeline {
    /// Creates a pipeline with the given randomness source.
    #[must_use]
    pub fn new(sampler: Arc<dyn Sampler>) -> Self {
        Self { sampler }
    }

    /// Normalizes the first choice of `envelope` against `input_text`.
    ///
    /// Returns `None` when no displayable text survives: an empty prompt,
    /// an empty envelope, or any enabled stage emptying the working text.
    #[must_use]
    pub fn process(
        &self,
        input_text: &str,
        envelope: &CompletionEnvelope,
        config: StageConfig,
    ) -> Option<String> {
        if input_text.is_empty() {
            return None;
        }

        let sw = Stopwatch::new();
        let extracted = reader::read_first_choice(envelope)?;

        let mut ctx = PipelineContext::new(input_text, extracted);
        for stage in build_chain(config, Arc::clone(&self.sampler)) {
            stage.apply(&mut ctx);
            ctx.trim_output();
            if ctx.is_exhausted() {
                debug!(stage = stage.name(), "stage emptied the working text");
                return None;
            }
        }

        debug!(
            elapsed = %sw,
            input_text,
            output_text = ctx.output_text(),
            "output extraction completed"
        );
        Some(ctx.output_text().to_string())
    }
}
