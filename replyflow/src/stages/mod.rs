//! Text-normalization stages.
//!
//! Each stage is a pure function of the prompt and the working output
//! text. The pipeline composes them in a fixed canonical order; disabling
//! a stage removes it from the chain without reordering the rest, which
//! is what lets new artifacts be handled without destabilizing
//! previously solved cases.

mod cliches;
mod completion_boundary;
mod duplicate_input;
mod list_indicators;
mod role_indicators;

pub use cliches::ClicheStage;
pub use completion_boundary::CompletionBoundaryStage;
pub use duplicate_input::DuplicateInputStage;
pub use list_indicators::ListIndicatorStage;
pub use role_indicators::RoleIndicatorStage;

use crate::context::{PipelineContext, StageConfig};
use crate::sampling::Sampler;
use std::sync::Arc;

/// One step of the normalization chain.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Strips a verbatim echo of the prompt.
    DuplicateInput(DuplicateInputStage),
    /// Collapses multi-paragraph completions into one answer region.
    CompletionBoundary(CompletionBoundaryStage),
    /// Removes chat-style role prefixes.
    RoleIndicators(RoleIndicatorStage),
    /// Removes boilerplate filler phrases.
    Cliches(ClicheStage),
    /// Removes list markers while keeping line structure.
    ListIndicators(ListIndicatorStage),
}

impl Stage {
    /// Stage name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuplicateInput(_) => "duplicate-input",
            Self::CompletionBoundary(_) => "completion-boundary",
            Self::RoleIndicators(_) => "role-indicators",
            Self::Cliches(_) => "cliches",
            Self::ListIndicators(_) => "list-indicators",
        }
    }

    /// Applies the stage to the working text.
    pub fn apply(&self, ctx: &mut PipelineContext) {
        let next = match self {
            Self::DuplicateInput(stage) => stage.apply(ctx.input_text(), ctx.output_text()),
            Self::CompletionBoundary(stage) => stage.apply(ctx.input_text(), ctx.output_text()),
            Self::RoleIndicators(stage) => stage.apply(ctx.input_text(), ctx.output_text()),
            Self::Cliches(stage) => stage.apply(ctx.input_text(), ctx.output_text()),
            Self::ListIndicators(stage) => stage.apply(ctx.input_text(), ctx.output_text()),
        };
        ctx.set_output_text(next);
    }
}

/// Builds the active stage chain in canonical order.
#[must_use]
pub fn build_chain(config: StageConfig, sampler: Arc<dyn Sampler>) -> Vec<Stage> {
    let mut chain = Vec::with_capacity(5);
    if config.duplicate_input {
        chain.push(Stage::DuplicateInput(DuplicateInputStage::new(sampler)));
    }
    if config.completion_boundary {
        chain.push(Stage::CompletionBoundary(CompletionBoundaryStage));
    }
    if config.role_indicators {
        chain.push(Stage::RoleIndicators(RoleIndicatorStage));
    }
    if config.cliches {
        chain.push(Stage::Cliches(ClicheStage));
    }
    if config.list_indicators {
        chain.push(Stage::ListIndicators(ListIndicatorStage));
    }
    chain
}
