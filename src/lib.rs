#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Bootstrapped discovery of discourse connectives across a word-aligned bitext.
//!
//! Starting from a seed lexicon of connectives in one language, the pipeline
//! mines their aligned spans in the other language from a Pharaoh word
//! alignment, filters the noisy signal down to plausible connectives, and
//! feeds the new ones back as the seed of the opposite direction.
//!
//! ## Pipeline
//!
//! 1. [`AlignmentIndex`] - per-sentence phrase groups from the raw index pairs
//! 2. [`extract`](extract::extract) - single-word lookups and corpus scans for a seed lexicon
//! 3. [`estimate`](probability::estimate) - relative frequencies per source key
//! 4. [`FilterChain`] - seven ordered heuristic filters
//! 5. [`Bootstrap`] - alternating rounds with monotonic lexicon growth
//!
//! ## Usage
//!
//! ```ignore
//! use conn_align::{AlignmentIndex, Bootstrap, BootstrapConfig, Language, LanguageState, Lexicon, ParallelCorpus};
//!
//! let corpus = ParallelCorpus::from_text(
//!     Language::French,
//!     "0-0 1-2 2-1 3-3 4-4",
//!     "il le fait cependant .",
//!     "er macht es trotzdem .",
//! )?;
//! let index = AlignmentIndex::build(&corpus);
//! let french = Lexicon::from_entries(["cependant"]);
//! let result = Bootstrap::new(
//!     &corpus,
//!     BootstrapConfig::default(),
//!     LanguageState::new(french.clone(), french, index.french),
//!     LanguageState::new(Lexicon::new(), Lexicon::new(), index.german),
//! )?
//! .run();
//! println!("{:?}", result.alignments(Language::French));
//! ```

mod bootstrap;
mod config;
mod corpus;
mod errors;
pub mod extract;
pub mod filters;
mod index;
mod language;
mod lexicon;
pub mod persistence;
pub mod probability;
pub mod span;
mod tables;
mod utils;

pub use bootstrap::{Bootstrap, BootstrapResult, LanguageState, RoundReport, RoundState};
pub use config::{BootstrapConfig, FilterConfig};
pub use corpus::{parse_index_line, IndexPair, ParallelCorpus, Sentence, SentencePair, Side};
pub use errors::{AlignError, AlignResult};
pub use filters::{Filter, FilterChain, FilterContext, FilterStage};
pub use index::{index_direction, phrase_groups, AlignmentIndex, PhraseGroup};
pub use language::Language;
pub use lexicon::{normalize_entry, EntryShape, Lexicon};
pub use tables::{CandidateList, CountTable, Distribution, ProbabilityTable};
