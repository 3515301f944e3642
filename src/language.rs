//! The two languages of the bitext and their fixed word lists.
//!
//! Every list here is expressed in the language it belongs to: the pronoun
//! list of [`Language::German`] holds German pronouns, and is consulted when
//! German is the *target* side of an alignment. Adding a language means adding
//! a variant and its data, not touching the filters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::GapRule;

/// A language of the parallel corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    French,
    German,
}

/// Fused preposition+article forms and the preposition they reduce to.
const FRENCH_CONTRACTIONS: &[(&str, &str)] = &[
    ("d'", "de"),
    ("du", "de"),
    ("des", "de"),
    ("aux", "à"),
    ("au", "à"),
];

const GERMAN_CONTRACTIONS: &[(&str, &str)] = &[("zur", "zu"), ("zum", "zu"), ("vom", "von")];

/// Words that end an under-segmented phrase alignment (articles, pronouns,
/// auxiliaries) and are never a connective translation on their own.
const FRENCH_UNLIKELY_ENDINGS: &[&str] = &["l'", "ce"];

const GERMAN_UNLIKELY_ENDINGS: &[&str] = &[
    "ich", "du", "er", "sie", "es", "wir", "ihr", "das", "des", "die", "der", "einer", "eines",
    "eine", "ist", "dem", "sich", "unseres", "ein",
];

/// Prepositions and conjunctions that are implausible as a single-word
/// connective translation.
const FRENCH_IMPLAUSIBLE_SINGLES: &[&str] = &[
    "avec", "dans", "devant", "par", "bien", "de", "quoi", "même", "tout", "que", "qu'", "en",
    "est", "ce", "sous", "qui", "s'", "si", "lors", "pendant", "durant",
];

const GERMAN_IMPLAUSIBLE_SINGLES: &[&str] = &["dass", "wenn", "auf", "vor", "in", "mit"];

/// Personal pronouns
const FRENCH_PRONOUNS: &[&str] = &[
    "j'", "je", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles",
];

const GERMAN_PRONOUNS: &[&str] = &["ich", "du", "er", "sie", "es", "wir", "ihr"];

/// Seed connectives whose alignments are known to be too noisy to bootstrap from.
const FRENCH_NOISY_SEEDS: &[&str] = &[
    "dire que",
    "dire qu'",
    "et dire que",
    "et dire qu'",
    "encore que",
    "cependant que",
    "cependant qu'",
    "encore qu'",
    "si",
    "s'",
    "en même temps que",
    "en même temps qu'",
];

const GERMAN_NOISY_SEEDS: &[&str] = &[
    "bloß",
    "dabei",
    "mangels",
    "mithin",
    "obschon",
    "wenn ... auch",
    "wiederum",
    "wobei",
    "wohingegen",
    "als ob",
];

impl Language {
    pub const ALL: [Language; 2] = [Language::French, Language::German];

    /// The other language of the pair.
    pub fn other(self) -> Self {
        match self {
            Language::French => Language::German,
            Language::German => Language::French,
        }
    }

    /// Two-letter code used in output file names.
    pub fn code(self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::German => "de",
        }
    }

    /// Uncontracted form of `token` if it is a fused preposition+article.
    pub fn uncontract(self, token: &str) -> Option<&'static str> {
        let table = match self {
            Language::French => FRENCH_CONTRACTIONS,
            Language::German => GERMAN_CONTRACTIONS,
        };
        table
            .iter()
            .find(|(contracted, _)| *contracted == token)
            .map(|(_, preposition)| *preposition)
    }

    pub fn unlikely_endings(self) -> &'static [&'static str] {
        match self {
            Language::French => FRENCH_UNLIKELY_ENDINGS,
            Language::German => GERMAN_UNLIKELY_ENDINGS,
        }
    }

    pub fn implausible_singles(self) -> &'static [&'static str] {
        match self {
            Language::French => FRENCH_IMPLAUSIBLE_SINGLES,
            Language::German => GERMAN_IMPLAUSIBLE_SINGLES,
        }
    }

    pub fn pronouns(self) -> &'static [&'static str] {
        match self {
            Language::French => FRENCH_PRONOUNS,
            Language::German => GERMAN_PRONOUNS,
        }
    }

    /// Seed entries dropped before a round that starts from this language.
    pub fn noisy_seeds(self) -> &'static [&'static str] {
        match self {
            Language::French => FRENCH_NOISY_SEEDS,
            Language::German => GERMAN_NOISY_SEEDS,
        }
    }

    /// Gap rule the indexer applies when this language is the target side.
    ///
    /// The two directions differ on purpose: French targets get a gap marker
    /// for any distance above 1, German targets only above 2 with the comma
    /// rule at exactly 2. The corpus scan always uses [`GapRule::CommaAware`].
    pub fn index_gap_rule(self) -> GapRule {
        match self {
            Language::French => GapRule::Strict,
            Language::German => GapRule::CommaAware,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::French => f.write_str("french"),
            Language::German => f.write_str("german"),
        }
    }
}
