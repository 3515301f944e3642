//! The three table shapes that flow through a round.
//!
//! - [`CandidateList`]: source key → raw target observations (append-only)
//! - [`CountTable`]: source key → target → occurrence count
//! - [`ProbabilityTable`]: source key → target → probability
//!
//! Lookups on a key that is absent answer "no evidence" (`0`, `None`) rather
//! than failing. Keys are kept sorted so serialized output is stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::is_punctuation;

/// Target text → probability for one source key.
pub type Distribution = BTreeMap<String, f64>;

/// Raw alignment observations per source key.
///
/// The empty string is an explicit observation: the source key occurred but
/// was aligned to nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateList(BTreeMap<String, Vec<String>>);

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, target: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(target.into());
    }

    /// Set every observation for `key` at once, replacing earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, observations: Vec<String>) {
        self.0.insert(key.into(), observations);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Merge `other` into `self`; a key present in both takes `other`'s list.
    pub fn merge(&mut self, other: CandidateList) {
        self.0.extend(other.0);
    }

    /// Concatenate observations of `other` onto `self`, key by key.
    pub fn append(&mut self, other: CandidateList) {
        for (key, observations) in other.0 {
            self.0.entry(key).or_default().extend(observations);
        }
    }

    /// Replace observations that are a bare punctuation token with the empty
    /// string: aligning to punctuation is aligning to nothing.
    pub fn with_punctuation_unaligned(mut self) -> Self {
        for observations in self.0.values_mut() {
            for target in observations.iter_mut() {
                if is_punctuation(target) {
                    target.clear();
                }
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for CandidateList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut list = CandidateList::new();
        for (key, target) in iter {
            list.push(key, target);
        }
        list
    }
}

/// Occurrence counts per source key and target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountTable(BTreeMap<String, BTreeMap<String, usize>>);

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the observations of every key of `candidates` that `keep` accepts.
    pub fn tally<F>(candidates: &CandidateList, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let mut table = CountTable::new();
        for (key, observations) in candidates.iter() {
            if !keep(key) {
                continue;
            }
            let counts = table.0.entry(key.clone()).or_default();
            for target in observations {
                *counts.entry(target.clone()).or_default() += 1;
            }
        }
        table
    }

    /// Count of `target` for `source`; 0 when either is unknown.
    pub fn count(&self, source: &str, target: &str) -> usize {
        self.0
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0)
    }

    pub fn targets(&self, source: &str) -> Option<&BTreeMap<String, usize>> {
        self.0.get(source)
    }

    /// Insert every key of `other`, overwriting keys already present.
    pub fn merge(&mut self, other: CountTable) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, usize>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Probability-weighted targets per source key.
///
/// A source key never maps to an empty distribution: filters that remove
/// the last target of a key remove the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityTable(BTreeMap<String, Distribution>);

impl ProbabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a distribution; an empty one is not stored.
    pub fn insert(&mut self, source: impl Into<String>, targets: Distribution) {
        let source = source.into();
        if targets.is_empty() {
            self.0.remove(&source);
        } else {
            self.0.insert(source, targets);
        }
    }

    pub fn targets(&self, source: &str) -> Option<&Distribution> {
        self.0.get(source)
    }

    /// Probability of `target` for `source`; 0.0 when either is unknown.
    pub fn probability(&self, source: &str, target: &str) -> f64 {
        self.0
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains_source(&self, source: &str) -> bool {
        self.0.contains_key(source)
    }

    /// Keep only the targets `keep` accepts, then drop emptied sources.
    pub fn retain_targets<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&str, &str, f64) -> bool,
    {
        for (source, targets) in self.0.iter_mut() {
            targets.retain(|target, probability| keep(source, target, *probability));
        }
        self.drop_empty_sources()
    }

    /// Rewrite each source's distribution with `rewrite`, then drop emptied sources.
    pub fn map_distributions<F>(mut self, mut rewrite: F) -> Self
    where
        F: FnMut(&str, &mut Distribution),
    {
        for (source, targets) in self.0.iter_mut() {
            rewrite(source, targets);
        }
        self.drop_empty_sources()
    }

    pub fn drop_empty_sources(mut self) -> Self {
        self.0.retain(|_, targets| !targets.is_empty());
        self
    }

    /// Merge `other` into `self`; for a source present in both, `other` wins.
    pub fn merge(&mut self, other: ProbabilityTable) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Distribution)> {
        self.0.iter()
    }

    pub fn sources(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Every target text across all sources (may repeat).
    pub fn targets_iter(&self) -> impl Iterator<Item = &String> {
        self.0.values().flat_map(|targets| targets.keys())
    }

    /// Total number of (source, target) entries.
    pub fn entry_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Distribution)> for ProbabilityTable {
    fn from_iter<I: IntoIterator<Item = (String, Distribution)>>(iter: I) -> Self {
        let mut table = ProbabilityTable::new();
        for (source, targets) in iter {
            table.insert(source, targets);
        }
        table
    }
}
