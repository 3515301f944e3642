use super::{Filter, FilterContext};
use crate::ProbabilityTable;

/// Drops any target containing a personal pronoun of the target language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PronounFilter;

impl Filter for PronounFilter {
    fn name(&self) -> &'static str {
        "pronoun"
    }

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        let pronouns = ctx.target_language.pronouns();
        table.retain_targets(|_, target, _| !target.split_whitespace().any(|token| pronouns.contains(&token)))
    }
}
