//! The bidirectional bootstrap.
//!
//! Rounds alternate between the two languages. Each round extracts candidates
//! for a seed lexicon in the active language, estimates and filters target
//! distributions, and appends the targets the other language's working
//! lexicon did not know yet to that lexicon. Those discoveries seed the next
//! round, which runs in the other direction.
//!
//! Seeds per round:
//! - round 1: the full working lexicon of the start language
//! - round 2: the full working lexicon of the other language, so the original
//!   seed is not starved by the few round-1 discoveries
//! - round 3 and later: exactly the previous round's discoveries, or the full
//!   working lexicon again when the previous round discovered nothing
//!
//! Known-noisy seed entries of the active language are removed every round.

use tracing::{info, info_span};

use crate::config::BootstrapConfig;
use crate::extract::extract;
use crate::filters::{FilterChain, FilterContext};
use crate::lexicon::Lexicon;
use crate::probability::estimate;
use crate::{AlignResult, CandidateList, CountTable, Language, ParallelCorpus, ProbabilityTable};

/// Everything the bootstrap keeps for one language.
#[derive(Debug, Clone, Default)]
pub struct LanguageState {
    /// Seed lexicon; grows by the other direction's discoveries.
    pub working: Lexicon,
    /// Complete lexicon used for phrase completion; never modified.
    pub reference: Lexicon,
    /// Precomputed single-word candidates keyed in this language.
    pub cache: CandidateList,
    /// Counts accumulated over the rounds run from this language.
    pub counts: CountTable,
    /// Filtered alignments accumulated over the rounds run from this language.
    pub alignments: ProbabilityTable,
}

impl LanguageState {
    pub fn new(working: Lexicon, reference: Lexicon, cache: CandidateList) -> Self {
        Self {
            working,
            reference,
            cache,
            counts: CountTable::new(),
            alignments: ProbabilityTable::new(),
        }
    }
}

/// Position of the round loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Round(usize),
    Terminal,
}

impl RoundState {
    pub fn first(limit: usize) -> Self {
        if limit == 0 {
            RoundState::Terminal
        } else {
            RoundState::Round(1)
        }
    }

    pub fn next(self, limit: usize) -> Self {
        match self {
            RoundState::Round(n) if n < limit => RoundState::Round(n + 1),
            _ => RoundState::Terminal,
        }
    }
}

/// Summary of one completed round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub round: usize,
    pub language: Language,
    pub seed_size: usize,
    pub surviving_sources: usize,
    /// Targets new to the other language's working lexicon, sorted.
    pub discovered: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BootstrapResult {
    pub french: LanguageState,
    pub german: LanguageState,
    pub rounds: Vec<RoundReport>,
}

impl BootstrapResult {
    pub fn state(&self, language: Language) -> &LanguageState {
        match language {
            Language::French => &self.french,
            Language::German => &self.german,
        }
    }

    /// Accumulated alignments keyed in `language`.
    pub fn alignments(&self, language: Language) -> &ProbabilityTable {
        &self.state(language).alignments
    }

    pub fn languages_visited(&self) -> Vec<Language> {
        self.rounds.iter().map(|report| report.language).collect()
    }
}

pub struct Bootstrap<'c> {
    corpus: &'c ParallelCorpus,
    config: BootstrapConfig,
    chain: FilterChain,
    french: LanguageState,
    german: LanguageState,
}

impl<'c> Bootstrap<'c> {
    /// Fails if `config` does not validate.
    pub fn new(
        corpus: &'c ParallelCorpus,
        config: BootstrapConfig,
        french: LanguageState,
        german: LanguageState,
    ) -> AlignResult<Self> {
        config.validate()?;
        Ok(Self {
            corpus,
            config,
            chain: FilterChain::standard(),
            french,
            german,
        })
    }

    pub fn with_chain(mut self, chain: FilterChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn state(&self, language: Language) -> &LanguageState {
        match language {
            Language::French => &self.french,
            Language::German => &self.german,
        }
    }

    pub fn run(mut self) -> BootstrapResult {
        let limit = self.config.rounds;
        let mut language = self.config.start_language;
        let mut discovered: Vec<String> = Vec::new();
        let mut reports = Vec::with_capacity(limit);

        let mut state = RoundState::first(limit);
        while let RoundState::Round(n) = state {
            let seed = match n {
                1 | 2 => self.state(language).working.clone(),
                _ if discovered.is_empty() => self.state(language).working.clone(),
                _ => Lexicon::from_entries(discovered.drain(..)),
            };
            let report = self.run_round(n, language, &seed);
            discovered = report.discovered.clone();
            reports.push(report);

            language = language.other();
            state = state.next(limit);
        }

        BootstrapResult {
            french: self.french,
            german: self.german,
            rounds: reports,
        }
    }

    /// One pass from `language` to the other language with the given seed.
    pub fn run_round(&mut self, n: usize, language: Language, seed: &Lexicon) -> RoundReport {
        let span = info_span!("round", n, language = %language);
        let _enter = span.enter();

        let seed = seed.without(language.noisy_seeds());
        let target_language = language.other();

        let extraction = extract(&seed, language, &self.state(language).cache, self.corpus);
        let probabilities = estimate(&extraction.merged());
        let filtered = {
            let ctx = FilterContext {
                target_language,
                config: &self.config.filters,
                counts: &extraction.counts,
                reference_lexicon: &self.state(target_language).reference,
            };
            self.chain.run(probabilities, &ctx)
        };

        let (active, other) = self.states_mut(language);
        let mut discovered: Vec<String> = filtered
            .targets_iter()
            .filter(|target| !target.is_empty() && !other.working.contains(target))
            .cloned()
            .collect();
        discovered.sort();
        discovered.dedup();

        other.working.extend(discovered.iter().cloned());
        let surviving_sources = filtered.len();
        active.counts.merge(extraction.counts);
        active.alignments.merge(filtered);

        info!(
            seed = seed.len(),
            surviving_sources,
            discovered = discovered.len(),
            lexicon = other.working.len(),
            "round complete"
        );

        RoundReport {
            round: n,
            language,
            seed_size: seed.len(),
            surviving_sources,
            discovered,
        }
    }

    /// The active language's state and the other language's state.
    fn states_mut(&mut self, active: Language) -> (&mut LanguageState, &mut LanguageState) {
        match active {
            Language::French => (&mut self.french, &mut self.german),
            Language::German => (&mut self.german, &mut self.french),
        }
    }
}
