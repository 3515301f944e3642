use super::{completes, is_gapped, Filter, FilterContext};
use crate::ProbabilityTable;

/// Drops a gapped target when the same source also aligns to a complete
/// contiguous phrase with the same first and last token.
///
/// `"bien ... que"` next to `"bien plus que"`: the gapped one goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncompletePhraseFilter;

impl Filter for IncompletePhraseFilter {
    fn name(&self) -> &'static str {
        "incomplete_phrase"
    }

    fn apply(&self, table: ProbabilityTable, _ctx: &FilterContext<'_>) -> ProbabilityTable {
        table.map_distributions(|_, targets| {
            let incomplete: Vec<String> = targets
                .keys()
                .filter(|target| is_gapped(target))
                .filter(|target| targets.keys().any(|other| completes(target, other)))
                .cloned()
                .collect();
            for target in incomplete {
                targets.remove(&target);
            }
        })
    }
}
