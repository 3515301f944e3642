#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Discourse relations for conn-align lexicons and alignment tables.
//!
//! Connective inventories such as LexConn and DiMLex attach one or more
//! relation senses to every connective, written as a colon path:
//! `COMPARISON:Concession:Arg1-as-denier`. This crate uses those senses to
//!
//! - restrict a seed lexicon to one relation group before a bootstrap run
//! - label alignment keys with their senses for human review
//! - aggregate an alignment table into relation-to-relation flows
//!
//! ## Usage
//!
//! ```ignore
//! use conn_align::Language;
//! use conn_align_relations::{filter_for_relation, relation_mapping, RelationGroups, RelationInventory};
//!
//! let french_senses = RelationInventory::load(Path::new("fr_relations.json"), Language::French)?;
//! let groups = RelationGroups::load(Path::new("relations.json"))?;
//! let seed = filter_for_relation(&lexicon, &french_senses, &groups, "concession");
//! // ... run the bootstrap ...
//! let flows = relation_mapping(result.alignments(Language::French), &french_senses, &german_senses);
//! ```

mod filter;
mod label;
mod mapping;
mod types;

pub use filter::filter_for_relation;
pub use label::label_alignment;
pub use mapping::{relation_mapping, RelationFlow, RelationMapping};
pub use types::{relation_name, RelationGroups, RelationInventory};
