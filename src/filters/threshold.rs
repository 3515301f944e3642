use super::{Filter, FilterContext};
use crate::utils::token_count;
use crate::ProbabilityTable;

/// Drops targets whose probability is below the word threshold (one token)
/// or the phrase threshold (several tokens).
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdFilter;

impl Filter for ThresholdFilter {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        table.retain_targets(|_, target, probability| {
            let threshold = if token_count(target) > 1 {
                ctx.config.phrase_threshold
            } else {
                ctx.config.word_threshold
            };
            probability >= threshold
        })
    }
}
