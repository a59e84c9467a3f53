//! Strips a verbatim echo of the prompt from the completion.

use crate::sampling::Sampler;
use std::sync::Arc;

/// Probability that an echoed prompt is stripped rather than kept.
const STRIP_ODDS: u8 = 90;

/// Removes the prompt when the model quotes it back before answering.
///
/// The strip is skipped one time in ten so that natural repetition
/// survives as a stylistic variation rather than being scrubbed on every
/// single reply.
#[derive(Debug, Clone)]
pub struct DuplicateInputStage {
    sampler: Arc<dyn Sampler>,
}

impl DuplicateInputStage {
    /// Creates the stage with the given randomness source.
    #[must_use]
    pub fn new(sampler: Arc<dyn Sampler>) -> Self {
        Self { sampler }
    }

    /// Applies the stage.
    #[must_use]
    pub fn apply(&self, input_text: &str, output_text: &str) -> String {
        if output_text.contains(input_text)
            && input_text != output_text
            && self.sampler.odds_of(STRIP_ODDS)
        {
            return output_text.replace(input_text, "");
        }
        output_text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{FixedSampler, ThreadRngSampler};
    use pretty_assertions::assert_eq;

    const INPUT: &str = "We are not put in this world for mere pleasure alone.";

    fn stage(flip: bool) -> DuplicateInputStage {
        DuplicateInputStage::new(Arc::new(FixedSampler { flip, index: 0 }))
    }

    #[test]
    fn test_strips_echoed_prompt() {
        let output = format!("{INPUT}  Sometimes, we must suffer to grow.");
        assert_eq!(
            stage(true).apply(INPUT, &output).trim(),
            "Sometimes, we must suffer to grow."
        );
    }

    #[test]
    fn test_skip_branch_keeps_echo() {
        let output = format!("{INPUT}  Sometimes, we must suffer to grow.");
        assert_eq!(stage(false).apply(INPUT, &output), output);
    }

    #[test]
    fn test_identical_texts_are_kept() {
        assert_eq!(stage(true).apply(INPUT, INPUT), INPUT);
    }

    #[test]
    fn test_unrelated_output_is_kept() {
        assert_eq!(stage(true).apply(INPUT, "something else"), "something else");
    }

    #[test]
    fn test_never_lengthens_output() {
        let outputs = [
            format!("{INPUT} and more"),
            "unrelated".to_string(),
            INPUT.to_string(),
        ];
        for output in &outputs {
            for flip in [true, false] {
                assert!(stage(flip).apply(INPUT, output).len() <= output.len());
            }
        }
    }

    // The skip is nondeterminism by design, so the live sampler is
    // asserted in aggregate rather than on a single call.
    #[test]
    fn test_strip_dominates_in_aggregate() {
        let stage = DuplicateInputStage::new(Arc::new(ThreadRngSampler));
        let output = format!("{INPUT} extra");
        let strips = (0..200)
            .filter(|_| stage.apply(INPUT, &output) != output)
            .count();
        assert!(strips > 150, "expected ~180 strips out of 200, got {strips}");
    }
}
