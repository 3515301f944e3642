//! Ordered heuristic filters over a probability table.
//!
//! Each filter takes the table by value and returns the pruned table; no
//! filter sees another's intermediate state. Sources left without targets are
//! dropped by every filter.
//!
//! The standard chain runs, in order:
//! 1. [`ThresholdFilter`] - probability below the word/phrase threshold
//! 2. [`MinimumCountFilter`] - occurrence count below the word/phrase minimum
//! 3. [`UnlikelyAlignmentFilter`] - stoplisted endings, fragments of longer targets
//! 4. [`IncompletePhraseFilter`] - gapped targets superseded by a complete one
//! 5. [`SingleWordStoplistFilter`] - implausible single-word translations
//! 6. [`PronounFilter`] - targets containing a pronoun
//! 7. [`PhraseCompletionFilter`] - gapped targets replaced by a known lexicon entry
//!
//! Filter 3 compares targets against each other, so its result depends on what
//! filters 1 and 2 already removed: the order is part of the behavior.

mod completion;
mod incomplete;
mod min_count;
mod pronoun;
mod single_word;
mod threshold;
mod unlikely;

pub use completion::PhraseCompletionFilter;
pub use incomplete::IncompletePhraseFilter;
pub use min_count::MinimumCountFilter;
pub use pronoun::PronounFilter;
pub use single_word::SingleWordStoplistFilter;
pub use threshold::ThresholdFilter;
pub use unlikely::{UnlikelyAlignmentFilter, FRAGMENT_PROBABILITY};

use tracing::debug;

use crate::config::FilterConfig;
use crate::lexicon::Lexicon;
use crate::span::GAP_MARKER;
use crate::utils::{is_alphabetic, token_count};
use crate::{CountTable, Language, ProbabilityTable};

/// What a filter may consult besides the table itself.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Language of the target texts being filtered.
    pub target_language: Language,
    pub config: &'a FilterConfig,
    /// Counts of the same round, keyed like the table.
    pub counts: &'a CountTable,
    /// Complete target-language lexicon, for phrase completion.
    pub reference_lexicon: &'a Lexicon,
}

pub trait Filter {
    fn name(&self) -> &'static str;

    fn apply(&self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    Threshold,
    MinimumCount,
    UnlikelyAlignment,
    IncompletePhrase,
    SingleWordStoplist,
    Pronoun,
    PhraseCompletion,
}

impl FilterStage {
    pub const STANDARD: [FilterStage; 7] = [
        FilterStage::Threshold,
        FilterStage::MinimumCount,
        FilterStage::UnlikelyAlignment,
        FilterStage::IncompletePhrase,
        FilterStage::SingleWordStoplist,
        FilterStage::Pronoun,
        FilterStage::PhraseCompletion,
    ];

    fn apply(self, table: ProbabilityTable, ctx: &FilterContext<'_>) -> (ProbabilityTable, &'static str) {
        match self {
            FilterStage::Threshold => run(&ThresholdFilter, table, ctx),
            FilterStage::MinimumCount => run(&MinimumCountFilter, table, ctx),
            FilterStage::UnlikelyAlignment => run(&UnlikelyAlignmentFilter, table, ctx),
            FilterStage::IncompletePhrase => run(&IncompletePhraseFilter, table, ctx),
            FilterStage::SingleWordStoplist => run(&SingleWordStoplistFilter, table, ctx),
            FilterStage::Pronoun => run(&PronounFilter, table, ctx),
            FilterStage::PhraseCompletion => run(&PhraseCompletionFilter, table, ctx),
        }
    }
}

fn run<F: Filter>(filter: &F, table: ProbabilityTable, ctx: &FilterContext<'_>) -> (ProbabilityTable, &'static str) {
    (filter.apply(table, ctx), filter.name())
}

/// A sequence of filter stages applied in order.
#[derive(Debug, Clone)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// The seven filters in their fixed order.
    pub fn standard() -> Self {
        Self {
            stages: FilterStage::STANDARD.to_vec(),
        }
    }

    /// A custom chain, mainly for comparing orders in tests.
    pub fn with_stages(stages: Vec<FilterStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn run(&self, mut table: ProbabilityTable, ctx: &FilterContext<'_>) -> ProbabilityTable {
        for stage in &self.stages {
            let (filtered, name) = stage.apply(table, ctx);
            table = filtered;
            debug!(
                filter = name,
                sources = table.len(),
                targets = table.entry_count(),
                "applied filter"
            );
        }
        table
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::standard()
    }
}

/// A gapped target of at least three tokens, e.g. `"bien ... que"`.
pub(crate) fn is_gapped(target: &str) -> bool {
    token_count(target) >= 3 && target.split_whitespace().any(|token| token == GAP_MARKER)
}

/// Whether `candidate` is a complete contiguous version of the gapped `target`.
///
/// The candidate has at least three tokens, all alphabetic, no gap marker,
/// the same first and last token as `target`, and is not simply `target`
/// with its gap marker removed.
pub(crate) fn completes(target: &str, candidate: &str) -> bool {
    let target_tokens: Vec<&str> = target.split_whitespace().collect();
    let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();

    if candidate_tokens.len() < 3 || !candidate_tokens.iter().all(|token| is_alphabetic(token)) {
        return false;
    }
    if target_tokens.first() != candidate_tokens.first() || target_tokens.last() != candidate_tokens.last() {
        return false;
    }

    let degapped: Vec<&str> = target_tokens
        .into_iter()
        .filter(|token| *token != GAP_MARKER)
        .collect();
    degapped != candidate_tokens
}
