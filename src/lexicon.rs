//! Connective lexicons.
//!
//! A lexicon is a de-duplicated set of connective strings for one language.
//! Entries are kept in first-seen order so scans and phrase completion are
//! reproducible. The shape of an entry is read off its text:
//!
//! - `"cependant"`: single word
//! - `"bien que"`: contiguous phrase
//! - `"non seulement ... mais"`: discontinuous phrase (contains [`GAP_SEPARATOR`])

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::span::{GAP_MARKER, GAP_SEPARATOR};
use crate::utils::token_count;
use crate::{AlignError, AlignResult, Language};

/// French: elided forms (`d'`, `qu'`, `lorsqu'`) become their own token.
static FRENCH_TOKENIZER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w*qu'|\w'|\w+(?:['-]\w+)*|[.,!?;]").expect("valid French tokenizer regex")
});

/// German: dotted abbreviations (`z.b.`, `d.h.`) stay one token.
static GERMAN_TOKENIZER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:\.\w+)+\.|\w+(?:['-]\w+)*|[.,!?;:]").expect("valid German tokenizer regex")
});

/// Shape of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryShape {
    SingleWord,
    Phrase,
    Discontinuous,
}

impl EntryShape {
    pub fn of(entry: &str) -> Self {
        if token_count(entry) <= 1 {
            EntryShape::SingleWord
        } else if entry.split_whitespace().any(|token| token == GAP_MARKER) {
            EntryShape::Discontinuous
        } else {
            EntryShape::Phrase
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-normalized entries, dropping duplicates and blanks.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lexicon = Lexicon::new();
        lexicon.extend(entries);
        lexicon
    }

    /// Build from raw lexicon strings: lowercased and tokenized the way the
    /// corpus is, with discontinuous parts joined by the gap separator.
    ///
    /// `"D'abord"` → `"d' abord"`, `"wenn ... auch"` stays as is.
    pub fn from_raw_entries<I, S>(language: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_entries(
            entries
                .into_iter()
                .map(|entry| normalize_entry(language, entry.as_ref())),
        )
    }

    /// Load a lexicon file: a JSON array of strings (`.json`) or one entry
    /// per line, `#` starting a comment line.
    pub fn load(path: &Path, language: Language) -> AlignResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AlignError::load(path, e))?;

        if path.extension().map_or(false, |ext| ext == "json") {
            let entries: Vec<String> =
                serde_json::from_str(&content).map_err(|e| AlignError::load(path, e))?;
            return Ok(Self::from_raw_entries(language, entries));
        }

        Ok(Self::from_raw_entries(
            language,
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// Add an entry; returns `false` if it was already present or blank.
    pub fn insert(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if entry.trim().is_empty() || self.index.contains(&entry) {
            return false;
        }
        self.index.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    /// Add every entry; returns how many were new.
    pub fn extend<I, S>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        entries
            .into_iter()
            .map(|entry| self.insert(entry))
            .filter(|added| *added)
            .count()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.index.contains(entry)
    }

    /// A copy without the listed entries.
    pub fn without(&self, excluded: &[&str]) -> Self {
        Self::from_entries(
            self.entries
                .iter()
                .filter(|entry| !excluded.contains(&entry.as_str()))
                .cloned(),
        )
    }

    pub fn with_shape(&self, shape: EntryShape) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| EntryShape::of(entry) == shape)
            .cloned()
            .collect()
    }

    pub fn singles(&self) -> Vec<String> {
        self.with_shape(EntryShape::SingleWord)
    }

    pub fn phrases(&self) -> Vec<String> {
        self.with_shape(EntryShape::Phrase)
    }

    pub fn discontinuous(&self) -> Vec<String> {
        self.with_shape(EntryShape::Discontinuous)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase and tokenize one raw lexicon string.
pub fn normalize_entry(language: Language, raw: &str) -> String {
    let tokenizer = match language {
        Language::French => &*FRENCH_TOKENIZER,
        Language::German => &*GERMAN_TOKENIZER,
    };
    let lowered = raw.replace('’', "'").to_lowercase();

    lowered
        .split(GAP_MARKER)
        .map(|part| {
            tokenizer
                .find_iter(part)
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(GAP_SEPARATOR)
}
