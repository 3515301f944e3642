use super::{Filter, FilterContext};
use crate::utils::token_count;
use crate::ProbabilityTable;

/// Drops targets seen fewer times than the word or phrase minimum,
/// whatever their probability. An unknown pair counts as zero occurrences.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumCountFilter;

impl Filter for MinimumCountFilter {
    fn name(&self) -> &'static str {
        "minimum_count"
    }

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        table.retain_targets(|source, target, _| {
            let minimum = if token_count(target) > 1 {
                ctx.config.phrase_min_count
            } else {
                ctx.config.word_min_count
            };
            ctx.counts.count(source, target) >= minimum
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::filters::test_support::{table, targets};
    use crate::lexicon::Lexicon;
    use crate::{CandidateList, CountTable, Language};

    #[test]
    fn rare_targets_are_dropped_regardless_of_probability() {
        let mut candidates = CandidateList::new();
        for _ in 0..3 {
            candidates.push("doch", "pourtant");
        }
        candidates.push("doch", "mais bien");
        candidates.push("doch", "mais bien");
        let counts = CountTable::tally(&candidates, |_| true);

        let config = FilterConfig {
            word_min_count: 3,
            phrase_min_count: 3,
            ..FilterConfig::permissive()
        };
        let lexicon = Lexicon::new();
        let ctx = FilterContext {
            target_language: Language::French,
            config: &config,
            counts: &counts,
            reference_lexicon: &lexicon,
        };

        let filtered = MinimumCountFilter.apply(
            table(&[
                ("doch", &[("pourtant", 0.6), ("mais bien", 0.4)]),
                ("unbekannt", &[("inconnu", 1.0)]),
            ]),
            &ctx,
        );
        assert_eq!(targets(&filtered, "doch"), vec!["pourtant"]);
        assert!(!filtered.contains_source("unbekannt"));
    }
}
