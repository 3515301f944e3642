//! Sense inventories and relation groups.

use std::collections::BTreeMap;
use std::path::Path;

use conn_align::persistence::load_json;
use conn_align::{normalize_entry, AlignResult, Language};
use serde::{Deserialize, Serialize};

/// Connective → relation senses, for one language.
///
/// Keys are normalized the way lexicon entries are, so a connective looks
/// up the same whether it came from the lexicon or from an alignment table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationInventory(BTreeMap<String, Vec<String>>);

impl RelationInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object of connective → list of senses.
    pub fn load(path: &Path, language: Language) -> AlignResult<Self> {
        let raw: BTreeMap<String, Vec<String>> = load_json(path)?;
        Ok(raw
            .into_iter()
            .map(|(connective, senses)| (normalize_entry(language, &connective), senses))
            .collect())
    }

    /// Add senses for a connective, keeping earlier ones.
    pub fn insert(&mut self, connective: impl Into<String>, senses: impl IntoIterator<Item = impl Into<String>>) {
        let entry = self.0.entry(connective.into()).or_default();
        for sense in senses {
            let sense = sense.into();
            if !entry.contains(&sense) {
                entry.push(sense);
            }
        }
    }

    pub fn senses(&self, connective: &str) -> Option<&[String]> {
        self.0.get(connective).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for RelationInventory {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut inventory = RelationInventory::new();
        for (connective, senses) in iter {
            inventory.insert(connective, senses);
        }
        inventory
    }
}

/// Relation name (e.g. `concession`) → the senses it groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationGroups(BTreeMap<String, Vec<String>>);

impl RelationGroups {
    pub fn load(path: &Path) -> AlignResult<Self> {
        load_json(path)
    }

    pub fn senses(&self, relation: &str) -> Option<&[String]> {
        self.0.get(relation).map(Vec::as_slice)
    }

    pub fn relations(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl FromIterator<(String, Vec<String>)> for RelationGroups {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The relation a sense names: its middle path component, capitalized.
///
/// `"COMPARISON:Concession:Arg1-as-denier"` → `"Concession"`,
/// `"TEMPORAL:asynchronous"` → `"Asynchronous"`, `"condition"` → `"Condition"`.
pub fn relation_name(sense: &str) -> String {
    let rest = sense.split_once(':').map_or(sense, |(_, rest)| rest);
    let middle = rest.split_once(':').map_or(rest, |(middle, _)| middle);

    let mut chars = middle.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
