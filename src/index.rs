//! Alignment indexer: raw Pharaoh pairs to candidate alignments.
//!
//! For one sentence pair the indexer produces, in each direction, the
//! observations `source text → target text`:
//!
//! - every source token no pair touches is observed as aligned to `""`
//! - source positions are grouped by the target position they align to; all
//!   target positions sharing the same group form one phrase candidate
//!
//! ```text
//! pairs  0-0 0-1 1-2          left "weil er"   right "parce qu' il"
//! right→left groups: 0:[0] 1:[0] 2:[1]
//! left-keyed phrase candidates: "weil" → "parce qu'",  "er" → "il"
//! ```
//!
//! Target positions then go through [`crate::span`] with the gap rule of the
//! target language.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::span::{self, mark_discontinuities};
use crate::{CandidateList, Language, ParallelCorpus, SentencePair, Side};

/// Source positions that align to exactly the same target positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseGroup {
    /// Source positions, ascending.
    pub source: Vec<usize>,
    /// Target positions sharing that group, ascending.
    pub target: Vec<usize>,
}

/// Group the pairs of `pair` with `source` as the key side.
///
/// Groups are returned in the order their first target position appears on
/// the alignment line.
pub fn phrase_groups(pair: &SentencePair, source: Side) -> Vec<PhraseGroup> {
    let target = source.opposite();

    // target position → source positions aligned to it
    let mut by_target: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut target_slot: HashMap<usize, usize> = HashMap::new();
    for index in &pair.pairs {
        let t = index.position(target);
        let slot = *target_slot.entry(t).or_insert_with(|| {
            by_target.push((t, Vec::new()));
            by_target.len() - 1
        });
        let sources = &mut by_target[slot].1;
        let s = index.position(source);
        if !sources.contains(&s) {
            sources.push(s);
        }
    }

    // source group → target positions with exactly that group
    let mut groups: Vec<PhraseGroup> = Vec::new();
    let mut group_slot: HashMap<Vec<usize>, usize> = HashMap::new();
    for (t, mut sources) in by_target {
        sources.sort_unstable();
        let slot = *group_slot.entry(sources.clone()).or_insert_with(|| {
            groups.push(PhraseGroup {
                source: sources,
                target: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].target.push(t);
    }

    for group in &mut groups {
        group.target.sort_unstable();
    }
    groups
}

/// Observations `(source text, target text)` of one sentence pair in one direction.
pub fn index_direction(pair: &SentencePair, source: Side, target_language: Language) -> Vec<(String, String)> {
    let source_tokens = &pair.sentence(source).tokens;
    let target_tokens = &pair.sentence(source.opposite()).tokens;
    let rule = target_language.index_gap_rule();

    let mut observations: Vec<(String, String)> = pair
        .unaligned(source)
        .into_iter()
        .map(|position| (source_tokens[position].clone(), String::new()))
        .collect();

    for group in phrase_groups(pair, source) {
        let key_tokens = group
            .source
            .iter()
            .filter_map(|&position| source_tokens.get(position).cloned())
            .collect();
        let marked = mark_discontinuities(&group.target, target_tokens, rule);
        let target_text = span::target_text(span::resolve(&marked, target_tokens), target_language);
        observations.push((span::key_text(key_tokens), target_text));
    }

    observations
}

/// Direction-specific candidate lists over a whole corpus.
///
/// This is the precomputed lookup table the single-word extraction reads from;
/// it can be persisted and reloaded between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentIndex {
    /// French source keys with their German observations.
    pub french: CandidateList,
    /// German source keys with their French observations.
    pub german: CandidateList,
}

impl AlignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every sentence pair of `corpus` in both directions.
    pub fn build(corpus: &ParallelCorpus) -> Self {
        let mut index = AlignmentIndex::new();
        for pair in corpus.sentences() {
            index.add_sentence(pair, corpus.left_language());
        }
        debug!(
            french_keys = index.french.len(),
            german_keys = index.german.len(),
            "built alignment index"
        );
        index
    }

    pub fn add_sentence(&mut self, pair: &SentencePair, left_language: Language) {
        for source in [Side::Left, Side::Right] {
            let source_language = match source {
                Side::Left => left_language,
                Side::Right => left_language.other(),
            };
            let list = self.for_language_mut(source_language);
            for (key, target) in index_direction(pair, source, source_language.other()) {
                list.push(key, target);
            }
        }
    }

    /// Candidates keyed by text in `language`.
    pub fn for_language(&self, language: Language) -> &CandidateList {
        match language {
            Language::French => &self.french,
            Language::German => &self.german,
        }
    }

    fn for_language_mut(&mut self, language: Language) -> &mut CandidateList {
        match language {
            Language::French => &mut self.french,
            Language::German => &mut self.german,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(index: &str, left: &str, right: &str) -> SentencePair {
        SentencePair::new(1, index, left, right).unwrap()
    }

    fn strings(observations: &[(&str, &str)]) -> Vec<(String, String)> {
        observations
            .iter()
            .map(|(k, t)| (k.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn groups_collect_shared_alignments() {
        let p = pair("0-0 0-1 1-2 2-2", "weil er kommt", "parce qu' il");
        let left_keyed = phrase_groups(&p, Side::Left);
        assert_eq!(
            left_keyed,
            vec![
                PhraseGroup {
                    source: vec![0],
                    target: vec![0, 1]
                },
                PhraseGroup {
                    source: vec![1, 2],
                    target: vec![2]
                },
            ]
        );

        let right_keyed = phrase_groups(&p, Side::Right);
        assert_eq!(
            right_keyed,
            vec![
                PhraseGroup {
                    source: vec![0, 1],
                    target: vec![0]
                },
                PhraseGroup {
                    source: vec![2],
                    target: vec![1, 2]
                },
            ]
        );
    }

    #[test]
    fn unaligned_tokens_are_explicit() {
        let p = pair("1-0", "also gut", "bon");
        assert_eq!(
            index_direction(&p, Side::Left, Language::French),
            strings(&[("also", ""), ("gut", "bon")])
        );
    }

    #[test]
    fn french_targets_use_the_strict_gap_rule() {
        // German "zwar" aligned to French positions 0 and 2
        let p = pair("0-0 0-2", "zwar", "certes , mais");
        assert_eq!(
            index_direction(&p, Side::Left, Language::French),
            strings(&[("zwar", "certes ... mais")])
        );
    }

    #[test]
    fn german_targets_use_the_comma_rule() {
        // French "certes" aligned to German positions 0 and 2 around a comma
        let p = pair("0-0 2-0 3-1", "zwar , aber gut", "certes bien");
        assert_eq!(
            index_direction(&p, Side::Right, Language::German),
            strings(&[("certes", "zwar , aber"), ("bien", "gut")])
        );

        let p = pair("0-0 2-0", "zwar sehr aber", "certes");
        assert_eq!(
            index_direction(&p, Side::Right, Language::German),
            strings(&[("certes", "zwar ... aber")])
        );
    }

    #[test]
    fn keys_and_targets_are_normalized() {
        // edge comma dropped from the key, contraction rewritten on the target
        let p = pair("0-0 1-0 0-1 1-1 0-2 1-2", ", weil", "en raison des");
        assert_eq!(
            index_direction(&p, Side::Left, Language::French),
            strings(&[("weil", "en raison de")])
        );
    }

    #[test]
    fn index_builds_both_directions() {
        let corpus = ParallelCorpus::from_text(
            Language::French,
            "0-0 1-2 2-1 3-3 4-4",
            "il le fait cependant .",
            "er macht es trotzdem .",
        )
        .unwrap();
        let index = AlignmentIndex::build(&corpus);
        assert_eq!(
            index.for_language(Language::French).get("cependant").unwrap(),
            &["trotzdem".to_string()]
        );
        assert_eq!(
            index.for_language(Language::German).get("trotzdem").unwrap(),
            &["cependant".to_string()]
        );
        assert_eq!(
            index.for_language(Language::German).get("es").unwrap(),
            &["le".to_string()]
        );
    }

    #[test]
    fn indexing_is_deterministic() {
        let p = pair("0-0 0-2 0-5 1-1", "a b", "u v w x y z");
        let first = index_direction(&p, Side::Left, Language::German);
        let second = index_direction(&p, Side::Left, Language::German);
        assert_eq!(first, second);
    }
}
