use super::{Filter, FilterContext};
use crate::utils::token_count;
use crate::ProbabilityTable;

/// Drops single-word targets that are implausible as a connective
/// translation in the target language (bare prepositions, `que`, `dass`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleWordStoplistFilter;

impl Filter for SingleWordStoplistFilter {
    fn name(&self) -> &'static str {
        "single_word_stoplist"
    }

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        let stoplist = ctx.target_language.implausible_singles();
        table.retain_targets(|_, target, _| token_count(target) != 1 || !stoplist.contains(&target))
    }
}
