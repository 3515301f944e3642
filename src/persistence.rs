//! JSON files in and out: the alignment cache and the final tables.
//!
//! Output is pretty-printed UTF-8 with sorted keys (all tables are ordered
//! maps), so two runs over the same input produce identical files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::{AlignError, AlignResult, AlignmentIndex, CandidateList, Language};

pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> AlignResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AlignError::save(path, e))?;
    fs::write(path, json).map_err(|e| AlignError::save(path, e))?;
    debug!(path = %path.display(), "saved json");
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> AlignResult<T> {
    let content = fs::read_to_string(path).map_err(|e| AlignError::load(path, e))?;
    serde_json::from_str(&content).map_err(|e| AlignError::load(path, e))
}

/// File name of the cache keyed in `language`, e.g. `de_word_alignment.json`.
pub fn cache_file_name(language: Language) -> String {
    format!("{}_word_alignment.json", language.code())
}

/// File name of the final table keyed in `language`, e.g.
/// `fr_de_connectives_alignment_concession.json`.
pub fn alignment_file_name(language: Language, label: &str) -> String {
    format!(
        "{}_{}_connectives_alignment_{}.json",
        language.code(),
        language.other().code(),
        label
    )
}

/// Write both direction-specific lists of `index` into `dir`.
pub fn save_index(index: &AlignmentIndex, dir: &Path) -> AlignResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| AlignError::save(dir, e))?;
    Language::ALL
        .iter()
        .map(|&language| {
            let path = dir.join(cache_file_name(language));
            save_json(index.for_language(language), &path)?;
            Ok(path)
        })
        .collect()
}

/// Read both cache files written by [`save_index`].
pub fn load_index(dir: &Path) -> AlignResult<AlignmentIndex> {
    let french: CandidateList = load_json(&dir.join(cache_file_name(Language::French)))?;
    let german: CandidateList = load_json(&dir.join(cache_file_name(Language::German)))?;
    Ok(AlignmentIndex { french, german })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParallelCorpus;

    #[test]
    fn file_names_follow_direction() {
        assert_eq!(cache_file_name(Language::German), "de_word_alignment.json");
        assert_eq!(
            alignment_file_name(Language::French, "all"),
            "fr_de_connectives_alignment_all.json"
        );
    }

    #[test]
    fn index_survives_a_save_and_load() {
        let corpus = ParallelCorpus::from_text(
            Language::German,
            "0-0 1-1 2-2",
            "aber , ja",
            "mais , oui",
        )
        .unwrap();
        let index = AlignmentIndex::build(&corpus);

        let dir = tempfile::tempdir().unwrap();
        let written = save_index(&index, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("fr_word_alignment.json").exists());

        let loaded = load_index(dir.path()).unwrap();
        assert_eq!(loaded, index);
        assert_eq!(loaded.german.get("aber").unwrap(), &["mais".to_string()]);
    }

    #[test]
    fn non_ascii_is_written_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let mut list = CandidateList::new();
        list.push("außerdem", "en outre");
        save_json(&list, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("außerdem"));
    }

    #[test]
    fn missing_cache_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_index(dir.path()), Err(AlignError::Load { .. })));
    }
}
