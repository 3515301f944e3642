use super::{completes, is_gapped, Filter, FilterContext};
use crate::ProbabilityTable;

/// Replaces a gapped target with the first entry of the target-language
/// reference lexicon that completes it, keeping its probability.
///
/// The aligner often splits a known multi-word connective around an interior
/// token it did not align: `"à ... que"` becomes `"à moins que"`. A completed
/// entry already present for the source is overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseCompletionFilter;

impl Filter for PhraseCompletionFilter {
    fn name(&self) -> &'static str {
        "phrase_completion"
    }

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        let lexicon = ctx.reference_lexicon;
        table.map_distributions(|_, targets| {
            let completions: Vec<(String, String)> = targets
                .keys()
                .filter(|target| is_gapped(target))
                .filter_map(|target| {
                    lexicon
                        .iter()
                        .find(|entry| completes(target, entry))
                        .map(|entry| (target.clone(), entry.clone()))
                })
                .collect();

            for (gapped, complete) in completions {
                if let Some(probability) = targets.remove(&gapped) {
                    targets.insert(complete, probability);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::filters::test_support::table;
    use crate::lexicon::Lexicon;
    use crate::{CountTable, Language};

    #[test]
    fn gapped_target_takes_the_first_lexicon_match() {
        let config = FilterConfig::permissive();
        let counts = CountTable::new();
        let lexicon = Lexicon::from_entries(["à moins que", "à condition que", "à ... que", "bien que"]);
        let ctx = FilterContext {
            target_language: Language::French,
            config: &config,
            counts: &counts,
            reference_lexicon: &lexicon,
        };

        let filtered = PhraseCompletionFilter.apply(
            table(&[
                ("es sei denn", &[("à ... que", 0.3), ("sauf", 0.7)]),
                ("obwohl", &[("bien ... que", 1.0)]),
            ]),
            &ctx,
        );
        insta::assert_debug_snapshot!(filtered, @r###"
        ProbabilityTable(
            {
                "es sei denn": {
                    "sauf": 0.7,
                    "à moins que": 0.3,
                },
                "obwohl": {
                    "bien ... que": 1.0,
                },
            },
        )
        "###);
    }
}
