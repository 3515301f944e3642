//! Under-segmented and fragmentary alignments.
//!
//! Three passes over each source's distribution:
//! 1. a target whose last token is a stoplisted function word goes
//!    (for a single word, the word itself)
//! 2. a rare single word that is a token of a surviving phrase target goes
//! 3. a rare phrase contained in a longer surviving phrase goes, unless it is
//!    at least three times as probable as the longer one

use super::{Filter, FilterContext};
use crate::tables::Distribution;
use crate::utils::token_count;
use crate::{Language, ProbabilityTable};

/// Below this probability a target contained in a longer one is treated as its fragment.
pub const FRAGMENT_PROBABILITY: f64 = 0.18;

/// A contained phrase this many times as probable as its container is kept.
const CONTAINED_RATIO: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnlikelyAlignmentFilter;

impl Filter for UnlikelyAlignmentFilter {
    fn name(&self) -> &'static str {
        "unlikely_alignment"
    }

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        let language = ctx.target_language;
        table.map_distributions(|_, targets| {
            drop_stoplisted_endings(targets, language);
            drop_word_fragments(targets);
            drop_contained_phrases(targets);
        })
    }
}

fn drop_stoplisted_endings(targets: &mut Distribution, language: Language) {
    let endings = language.unlikely_endings();
    targets.retain(|target, _| {
        target
            .split_whitespace()
            .last()
            .map_or(true, |last| !endings.contains(&last))
    });
}

fn drop_word_fragments(targets: &mut Distribution) {
    let phrases: Vec<String> = targets
        .keys()
        .filter(|target| token_count(target) > 1)
        .cloned()
        .collect();

    targets.retain(|target, probability| {
        if token_count(target) != 1 || *probability >= FRAGMENT_PROBABILITY {
            return true;
        }
        !phrases
            .iter()
            .any(|phrase| phrase.split_whitespace().any(|token| token == target))
    });
}

/// Longest phrases are settled first, so a phrase only counts as a container
/// while it is itself still present.
fn drop_contained_phrases(targets: &mut Distribution) {
    let mut phrases: Vec<(String, f64)> = targets
        .iter()
        .filter(|(target, _)| token_count(target) > 1)
        .map(|(target, probability)| (target.clone(), *probability))
        .collect();
    phrases.sort_by(|(a, _), (b, _)| token_count(b).cmp(&token_count(a)).then_with(|| a.cmp(b)));

    for (phrase, probability) in &phrases {
        if *probability >= FRAGMENT_PROBABILITY {
            continue;
        }
        let length = token_count(phrase);
        let contained = targets.iter().any(|(longer, longer_probability)| {
            token_count(longer) > length
                && longer.contains(phrase.as_str())
                && probability / longer_probability < CONTAINED_RATIO
        });
        if contained {
            targets.remove(phrase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::filters::test_support::{table, targets};
    use crate::lexicon::Lexicon;
    use crate::CountTable;

    fn run(language: Language, input: ProbabilityTable) -> ProbabilityTable {
        let config = FilterConfig::permissive();
        let counts = CountTable::new();
        let lexicon = Lexicon::new();
        let ctx = FilterContext {
            target_language: language,
            config: &config,
            counts: &counts,
            reference_lexicon: &lexicon,
        };
        UnlikelyAlignmentFilter.apply(input, &ctx)
    }

    #[test]
    fn stoplisted_endings_are_dropped() {
        let filtered = run(
            Language::German,
            table(&[("parce que", &[("weil", 0.6), ("weil er", 0.2), ("das", 0.1), ("denn", 0.1)])]),
        );
        assert_eq!(targets(&filtered, "parce que"), vec!["denn", "weil"]);
    }

    #[test]
    fn rare_word_inside_a_phrase_is_a_fragment() {
        let filtered = run(
            Language::French,
            table(&[("obwohl", &[("bien que", 0.5), ("bien", 0.1), ("que", 0.2), ("quoique", 0.1)])]),
        );
        assert_eq!(targets(&filtered, "obwohl"), vec!["bien que", "que", "quoique"]);
    }

    #[test]
    fn contained_phrase_needs_probability_or_ratio() {
        let filtered = run(
            Language::French,
            table(&[
                ("sodass", &[("de sorte que", 0.5), ("sorte que", 0.1)]),
                ("außerdem", &[("en plus de", 0.05), ("en plus", 0.16)]),
                ("dennoch", &[("tout de même", 0.4), ("de même", 0.3)]),
            ]),
        );
        assert_eq!(targets(&filtered, "sodass"), vec!["de sorte que"]);
        // 0.16 / 0.05 is above the ratio
        assert_eq!(targets(&filtered, "außerdem"), vec!["en plus", "en plus de"]);
        assert_eq!(targets(&filtered, "dennoch"), vec!["de même", "tout de même"]);
    }

    #[test]
    fn container_must_still_be_present() {
        let filtered = run(
            Language::French,
            table(&[(
                "sogar",
                &[
                    ("et alors même que", 0.02),
                    ("alors même que", 0.05),
                    ("même que", 0.1),
                    ("autre", 0.83),
                ],
            )]),
        );
        // "alors même que" goes first, so "même que" is only compared with the longest phrase
        assert_eq!(targets(&filtered, "sogar"), vec!["autre", "et alors même que", "même que"]);
    }
}
