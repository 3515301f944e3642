//! Candidate extraction for one round.
//!
//! Single-word lexicon entries are looked up in the precomputed
//! [`AlignmentIndex`](crate::AlignmentIndex) lists. Multi-token entries are not
//! keys there (the indexer only materializes groupings the aligner produced),
//! so the corpus is scanned for them and each occurrence is projected through
//! the raw index pairs onto the other side.
//!
//! The scan is independent per lexicon entry and is sharded with rayon.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::span::{self, mark_discontinuities, GapRule, GAP_SEPARATOR};
use crate::utils::find_token_run;
use crate::{CandidateList, CountTable, Language, ParallelCorpus, SentencePair, Side};

/// Candidates of one round, split by lexicon entry shape.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub singles: CandidateList,
    pub phrases: CandidateList,
    pub discontinuous: CandidateList,
    /// Occurrence counts restricted to keys of the seed lexicon.
    pub counts: CountTable,
}

impl Extraction {
    /// All candidates in one list. On a key collision phrase entries override
    /// single words and discontinuous entries override both.
    pub fn merged(&self) -> CandidateList {
        let mut merged = self.singles.clone();
        merged.merge(self.phrases.clone());
        merged.merge(self.discontinuous.clone());
        merged
    }

    pub fn key_count(&self) -> usize {
        self.singles.len() + self.phrases.len() + self.discontinuous.len()
    }
}

/// Extract candidates for every entry of `seed`, keyed in `language`.
///
/// Punctuation-only observations are already turned into unaligned (`""`)
/// observations in the returned lists.
pub fn extract(seed: &Lexicon, language: Language, cache: &CandidateList, corpus: &ParallelCorpus) -> Extraction {
    let singles = lookup_singles(&seed.singles(), cache).with_punctuation_unaligned();
    let phrases = scan_phrases(&seed.phrases(), language, corpus).with_punctuation_unaligned();
    let discontinuous = scan_discontinuous(&seed.discontinuous(), language, corpus).with_punctuation_unaligned();

    let mut extraction = Extraction {
        singles,
        phrases,
        discontinuous,
        counts: CountTable::new(),
    };
    extraction.counts = CountTable::tally(&extraction.merged(), |key| seed.contains(key));

    debug!(
        %language,
        singles = extraction.singles.len(),
        phrases = extraction.phrases.len(),
        discontinuous = extraction.discontinuous.len(),
        "extracted candidates"
    );
    extraction
}

/// Exact-key lookup of single-word entries; entries absent from `cache` are skipped.
pub fn lookup_singles(entries: &[String], cache: &CandidateList) -> CandidateList {
    let mut found = CandidateList::new();
    for entry in entries {
        if let Some(observations) = cache.get(entry) {
            found.insert(entry.clone(), observations.to_vec());
        }
    }
    found
}

/// Corpus scan for contiguous multi-token entries.
pub fn scan_phrases(entries: &[String], language: Language, corpus: &ParallelCorpus) -> CandidateList {
    scan(entries, language, corpus, phrase_positions)
}

/// Corpus scan for discontinuous entries (`"part ... part"`).
pub fn scan_discontinuous(entries: &[String], language: Language, corpus: &ParallelCorpus) -> CandidateList {
    scan(entries, language, corpus, discontinuous_positions)
}

fn scan<F>(entries: &[String], language: Language, corpus: &ParallelCorpus, locate: F) -> CandidateList
where
    F: Fn(&str, &str, &[String]) -> Option<Vec<usize>> + Sync,
{
    let source = corpus.side_of(language);
    let target_language = language.other();

    let scanned: Vec<(String, Vec<String>)> = entries
        .par_iter()
        .map(|entry| {
            let observations = corpus
                .sentences()
                .iter()
                .filter_map(|pair| {
                    let sentence = pair.sentence(source);
                    let positions = locate(entry, &sentence.text, &sentence.tokens)?;
                    Some(project(pair, source, &positions, target_language))
                })
                .collect();
            (entry.clone(), observations)
        })
        .collect();

    let mut candidates = CandidateList::new();
    for (entry, observations) in scanned {
        if !observations.is_empty() {
            candidates.insert(entry, observations);
        }
    }
    candidates
}

/// Token positions of the first occurrence of a contiguous phrase.
fn phrase_positions(entry: &str, text: &str, tokens: &[String]) -> Option<Vec<usize>> {
    if !text.contains(entry) {
        return None;
    }
    let needle: Vec<&str> = entry.split_whitespace().collect();
    let start = find_token_run(tokens, &needle)?;
    Some((start..start + needle.len()).collect())
}

/// Token positions of a discontinuous entry.
///
/// The sentence must contain every part in raw text, each part starting after
/// the previous one. At token level each part takes its first occurrence that
/// does not reuse a position already taken by an earlier part. A raw-text match
/// with no token-level part still counts, and projects to the unaligned `""`.
fn discontinuous_positions(entry: &str, text: &str, tokens: &[String]) -> Option<Vec<usize>> {
    let parts: Vec<&str> = entry.split(GAP_SEPARATOR).collect();

    let mut previous_start: Option<usize> = None;
    for part in &parts {
        let start = text.find(part)?;
        if previous_start.map_or(false, |previous| start <= previous) {
            return None;
        }
        previous_start = Some(start);
    }

    let mut used: HashSet<usize> = HashSet::new();
    let mut positions = Vec::new();
    for part in &parts {
        let needle: Vec<&str> = part.split_whitespace().collect();
        if let Some(start) = first_unused_run(tokens, &needle, &used) {
            for position in start..start + needle.len() {
                used.insert(position);
                positions.push(position);
            }
        }
    }

    Some(positions)
}

fn first_unused_run(tokens: &[String], needle: &[&str], used: &HashSet<usize>) -> Option<usize> {
    let mut offset = 0;
    while offset < tokens.len() {
        let start = offset + find_token_run(&tokens[offset..], needle)?;
        if (start..start + needle.len()).all(|position| !used.contains(&position)) {
            return Some(start);
        }
        offset = start + 1;
    }
    None
}

/// Project source positions onto the target side and normalize the span.
fn project(pair: &SentencePair, source: Side, positions: &[usize], target_language: Language) -> String {
    let mut aligned: Vec<usize> = Vec::new();
    for &position in positions {
        for target in pair.aligned_to(source, position) {
            if !aligned.contains(&target) {
                aligned.push(target);
            }
        }
    }
    if aligned.is_empty() {
        return String::new();
    }

    let target_tokens = &pair.sentence(source.opposite()).tokens;
    let marked = mark_discontinuities(&aligned, target_tokens, GapRule::CommaAware);
    span::target_text(span::resolve(&marked, target_tokens), target_language)
}
