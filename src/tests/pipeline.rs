//! One-direction scenarios through index, extraction, estimation and filters.

use crate::extract::extract;
use crate::probability::estimate;
use crate::{
    AlignmentIndex, Bootstrap, BootstrapConfig, CandidateList, CountTable, FilterChain, FilterConfig,
    FilterContext, FilterStage, Language, LanguageState, Lexicon, ParallelCorpus, ProbabilityTable,
};

fn permissive(rounds: usize, start_language: Language) -> BootstrapConfig {
    BootstrapConfig {
        start_language,
        rounds,
        filters: FilterConfig::permissive(),
    }
}

fn single_pass(corpus: &ParallelCorpus, language: Language, seed: &[&str]) -> ProbabilityTable {
    let index = AlignmentIndex::build(corpus);
    let seed = Lexicon::from_entries(seed.iter().copied());
    let (active, other) = (
        LanguageState::new(seed.clone(), seed, index.for_language(language).clone()),
        LanguageState::new(Lexicon::new(), Lexicon::new(), index.for_language(language.other()).clone()),
    );
    let (french, german) = match language {
        Language::French => (active, other),
        Language::German => (other, active),
    };
    Bootstrap::new(corpus, permissive(1, language), french, german)
        .unwrap()
        .run()
        .alignments(language)
        .clone()
}

#[test]
fn single_sentence_end_to_end() {
    let corpus = ParallelCorpus::from_text(
        Language::French,
        "0-0 1-2 2-1 3-3 4-4",
        "il le fait cependant .",
        "er macht es trotzdem .",
    )
    .unwrap();

    let table = single_pass(&corpus, Language::French, &["cependant"]);
    insta::assert_debug_snapshot!(table, @r###"
    ProbabilityTable(
        {
            "cependant": {
                "trotzdem": 1.0,
            },
        },
    )
    "###);
}

#[test]
fn always_unaligned_connective_is_absent() {
    let corpus = ParallelCorpus::from_text(
        Language::French,
        "1-0\n1-0 2-1\n",
        "donc oui\ndonc oui .",
        "ja\nja .",
    )
    .unwrap();

    let table = single_pass(&corpus, Language::French, &["donc", "oui"]);
    assert!(!table.contains_source("donc"));
    assert_eq!(table.probability("oui", "ja"), 1.0);
}

#[test]
fn trailing_contraction_is_reduced_in_the_output() {
    let corpus = ParallelCorpus::from_text(
        Language::German,
        "0-0 0-1 0-2 1-3 2-4",
        "wegen Regen .",
        "en raison des pluies .",
    )
    .unwrap();

    let table = single_pass(&corpus, Language::German, &["wegen"]);
    assert_eq!(table.probability("wegen", "en raison de"), 1.0);
    assert_eq!(table.probability("wegen", "en raison des"), 0.0);
}

#[test]
fn phrase_and_discontinuous_seeds_are_scanned() {
    let corpus = ParallelCorpus::from_text(
        Language::German,
        "0-0 1-1 2-2 3-3\n0-0 1-1 4-3 5-4\n",
        "auch wenn es regnet\nnicht nur x y sondern auch",
        "même si il pleut\nnon seulement a mais aussi",
    )
    .unwrap();

    let table = single_pass(&corpus, Language::German, &["auch wenn", "nicht nur ... sondern auch"]);
    assert_eq!(table.probability("auch wenn", "même si"), 1.0);
    assert_eq!(
        table.probability("nicht nur ... sondern auch", "non seulement ... mais aussi"),
        1.0
    );
}

#[test]
fn estimated_distributions_sum_to_one() {
    let corpus = ParallelCorpus::from_text(
        Language::French,
        "0-0 1-1\n0-0 1-1\n0-1\n",
        "mais non\nmais oui\nmais ,",
        "aber nein\ndoch ja\n, aber",
    )
    .unwrap();
    let index = AlignmentIndex::build(&corpus);
    let seed = Lexicon::from_entries(["mais"]);
    let extraction = extract(&seed, Language::French, &index.french, &corpus);
    let table = estimate(&extraction.merged());

    for (_, targets) in table.iter() {
        let sum: f64 = targets.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
    assert!((table.probability("mais", "aber") - 2.0 / 3.0).abs() < 1e-9);
}

/// Filter 3 only drops a contained phrase while its container is present, so
/// letting filter 2 remove the container first changes the outcome.
#[test]
fn filter_order_is_part_of_the_result() {
    let mut candidates = CandidateList::new();
    for (target, times) in [("bien que", 40), ("même que", 5), ("alors même que", 2)] {
        for _ in 0..times {
            candidates.push("obwohl", target);
        }
    }
    let counts = CountTable::tally(&candidates, |_| true);
    let table = estimate(&candidates);

    let config = FilterConfig {
        phrase_min_count: 3,
        ..FilterConfig::permissive()
    };
    let lexicon = Lexicon::new();
    let ctx = FilterContext {
        target_language: Language::French,
        config: &config,
        counts: &counts,
        reference_lexicon: &lexicon,
    };

    let standard = FilterChain::standard().run(table.clone(), &ctx);
    let swapped = FilterChain::with_stages(vec![
        FilterStage::Threshold,
        FilterStage::UnlikelyAlignment,
        FilterStage::MinimumCount,
        FilterStage::IncompletePhrase,
        FilterStage::SingleWordStoplist,
        FilterStage::Pronoun,
        FilterStage::PhraseCompletion,
    ])
    .run(table, &ctx);

    assert!(standard.probability("obwohl", "même que") > 0.0);
    assert_eq!(swapped.probability("obwohl", "même que"), 0.0);
    assert_ne!(standard, swapped);
}
