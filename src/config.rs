//! Run configuration, loadable from TOML.
//!
//! ```toml
//! start_language = "french"
//! rounds = 3
//!
//! [filters]
//! word_threshold = 0.021
//! phrase_threshold = 0.014
//! word_min_count = 20
//! phrase_min_count = 10
//! ```
//!
//! Every field is optional; missing ones take the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AlignError, AlignResult, Language};

/// Thresholds of the threshold and minimum-count filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Minimum probability of a single-token target.
    pub word_threshold: f64,
    /// Minimum probability of a multi-token target.
    pub phrase_threshold: f64,
    /// Minimum occurrence count of a single-token target.
    pub word_min_count: usize,
    /// Minimum occurrence count of a multi-token target.
    pub phrase_min_count: usize,
}

impl FilterConfig {
    /// No threshold and no minimum count: every observed target passes the first two filters.
    pub fn permissive() -> Self {
        Self {
            word_threshold: 0.0,
            phrase_threshold: 0.0,
            word_min_count: 0,
            phrase_min_count: 0,
        }
    }

    pub fn validate(&self) -> AlignResult<()> {
        for (name, value) in [
            ("word_threshold", self.word_threshold),
            ("phrase_threshold", self.phrase_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AlignError::config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            word_threshold: 0.021,
            phrase_threshold: 0.014,
            word_min_count: 20,
            phrase_min_count: 10,
        }
    }
}

/// Configuration of a whole bootstrap run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Language of the first round's seed.
    pub start_language: Language,
    /// Number of rounds; must be at least 1.
    pub rounds: usize,
    pub filters: FilterConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            start_language: Language::French,
            rounds: 3,
            filters: FilterConfig::default(),
        }
    }
}

impl BootstrapConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> AlignResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| AlignError::load(path, e))?;
        toml::from_str(&content).map_err(|e| AlignError::load(path, e))
    }

    pub fn validate(&self) -> AlignResult<()> {
        if self.rounds < 1 {
            return Err(AlignError::config(format!(
                "round limit must be at least 1, got {}",
                self.rounds
            )));
        }
        self.filters.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() {
        let config = BootstrapConfig::load(Path::new("/nonexistent/conn-align.toml")).unwrap();
        assert_eq!(config, BootstrapConfig::default());
        assert_eq!(config.filters.word_min_count, 20);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "start_language = \"german\"\n\n[filters]\nphrase_min_count = 4").unwrap();
        let config = BootstrapConfig::load(file.path()).unwrap();
        assert_eq!(config.start_language, Language::German);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.filters.phrase_min_count, 4);
        assert_eq!(config.filters.word_threshold, 0.021);
    }

    #[test]
    fn invalid_toml_is_a_load_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rounds = \"three\"").unwrap();
        assert!(matches!(
            BootstrapConfig::load(file.path()),
            Err(AlignError::Load { .. })
        ));
    }

    #[test]
    fn validation_rejects_zero_rounds_and_bad_thresholds() {
        let mut config = BootstrapConfig::default();
        assert!(config.validate().is_ok());

        config.rounds = 0;
        assert!(matches!(config.validate(), Err(AlignError::Config { .. })));

        config.rounds = 1;
        config.filters.phrase_threshold = 1.5;
        assert!(matches!(config.validate(), Err(AlignError::Config { .. })));
    }
}
