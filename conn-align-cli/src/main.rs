//! conn-align - command-line entry point
//!
//! `index` precomputes the word alignment cache of a bitext; `bootstrap` runs
//! the connective discovery rounds over it and writes one alignment table per
//! direction. The German corpus is always the left side of the alignment file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use conn_align::persistence::{
    alignment_file_name, cache_file_name, load_index, save_index, save_json,
};
use conn_align::{
    AlignmentIndex, Bootstrap, BootstrapConfig, BootstrapResult, Language, LanguageState, Lexicon,
    ParallelCorpus,
};
use conn_align_relations::{
    filter_for_relation, label_alignment, relation_mapping, RelationGroups, RelationInventory,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "conn-align")]
#[command(about = "Bootstrapped discourse-connective alignment between German and French")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the word alignment cache of a bitext
    Index {
        #[command(flatten)]
        bitext: Bitext,

        /// Directory for de_word_alignment.json and fr_word_alignment.json
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Run the bidirectional bootstrap
    Bootstrap(BootstrapArgs),
}

#[derive(Args, Debug)]
struct Bitext {
    /// Pharaoh alignment file, German positions on the left
    alignment: PathBuf,
    /// Tokenized German corpus, one sentence per line
    german: PathBuf,
    /// Tokenized French corpus, one sentence per line
    french: PathBuf,
}

#[derive(Args, Debug)]
struct BootstrapArgs {
    #[command(flatten)]
    bitext: Bitext,

    /// German seed lexicon (.txt, one entry per line, or .json array)
    #[arg(long)]
    german_lexicon: PathBuf,

    /// French seed lexicon (.txt, one entry per line, or .json array)
    #[arg(long)]
    french_lexicon: PathBuf,

    /// Complete German lexicon for phrase completion (defaults to the seed)
    #[arg(long)]
    german_reference: Option<PathBuf>,

    /// Complete French lexicon for phrase completion (defaults to the seed)
    #[arg(long)]
    french_reference: Option<PathBuf>,

    /// Directory holding a cache written by `index`; built in memory if absent
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// TOML run configuration
    #[arg(long, env = "CONN_ALIGN_CONFIG")]
    config: Option<PathBuf>,

    /// Restrict both seed lexicons to one discourse relation (e.g. "concession")
    #[arg(long, requires = "relations_dir")]
    relation: Option<String>,

    /// Directory with de_relations.json, fr_relations.json and relations.json
    #[arg(long)]
    relations_dir: Option<PathBuf>,

    /// Append relation senses to connectives in the written tables
    #[arg(long, requires = "relations_dir")]
    show_relation: bool,

    #[arg(long = "word-threshold", visible_alias = "wt")]
    word_threshold: Option<f64>,

    #[arg(long = "phrase-threshold", visible_alias = "pt")]
    phrase_threshold: Option<f64>,

    /// Number of rounds
    #[arg(short = 'i', long = "iterations")]
    iterations: Option<usize>,

    #[arg(long = "word-count", visible_alias = "wc")]
    word_count: Option<usize>,

    #[arg(long = "phrase-count", visible_alias = "pc")]
    phrase_count: Option<usize>,

    /// Start the first round from the German lexicon
    #[arg(short = 'g', long)]
    german_first: bool,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Log filter used when `RUST_LOG` is unset. The binary and the library both
/// log under the `conn_align` target.
const DEFAULT_LOG_FILTER: &str = "conn_align=info";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Index { bitext, out_dir } => run_index(&bitext, &out_dir),
        Command::Bootstrap(args) => run_bootstrap(&args),
    }
}

fn open_corpus(bitext: &Bitext) -> Result<ParallelCorpus> {
    ParallelCorpus::open(Language::German, &bitext.alignment, &bitext.german, &bitext.french)
        .context("Failed to read the bitext")
}

fn run_index(bitext: &Bitext, out_dir: &Path) -> Result<()> {
    let corpus = open_corpus(bitext)?;
    let index = AlignmentIndex::build(&corpus);
    let written = save_index(&index, out_dir).context("Failed to write the alignment cache")?;
    for path in written {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn load_config(args: &BootstrapArgs) -> Result<BootstrapConfig> {
    let mut config = match &args.config {
        Some(path) => BootstrapConfig::load(path).context("Failed to load configuration")?,
        None => BootstrapConfig::default(),
    };

    if let Some(rounds) = args.iterations {
        config.rounds = rounds;
    }
    if args.german_first {
        config.start_language = Language::German;
    }
    let filters = &mut config.filters;
    if let Some(value) = args.word_threshold {
        filters.word_threshold = value;
    }
    if let Some(value) = args.phrase_threshold {
        filters.phrase_threshold = value;
    }
    if let Some(value) = args.word_count {
        filters.word_min_count = value;
    }
    if let Some(value) = args.phrase_count {
        filters.phrase_min_count = value;
    }
    Ok(config)
}

fn load_cache(corpus: &ParallelCorpus, cache_dir: Option<&Path>) -> Result<AlignmentIndex> {
    match cache_dir {
        Some(dir) if dir.join(cache_file_name(Language::German)).exists() => {
            info!("Using alignment cache in {}", dir.display());
            load_index(dir).context("Failed to load the alignment cache")
        }
        Some(dir) => {
            let index = AlignmentIndex::build(corpus);
            save_index(&index, dir).context("Failed to write the alignment cache")?;
            Ok(index)
        }
        None => Ok(AlignmentIndex::build(corpus)),
    }
}

fn load_lexicon(path: &Path, language: Language) -> Result<Lexicon> {
    Lexicon::load(path, language).with_context(|| format!("Failed to load {language} lexicon"))
}

/// Sense inventories of both languages and the relation groups.
struct Relations {
    german: RelationInventory,
    french: RelationInventory,
    groups: RelationGroups,
}

impl Relations {
    fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            german: RelationInventory::load(&dir.join("de_relations.json"), Language::German)
                .context("Failed to load German relations")?,
            french: RelationInventory::load(&dir.join("fr_relations.json"), Language::French)
                .context("Failed to load French relations")?,
            groups: RelationGroups::load(&dir.join("relations.json"))
                .context("Failed to load relation groups")?,
        })
    }

    fn inventory(&self, language: Language) -> &RelationInventory {
        match language {
            Language::French => &self.french,
            Language::German => &self.german,
        }
    }
}

fn run_bootstrap(args: &BootstrapArgs) -> Result<()> {
    let config = load_config(args)?;
    let corpus = open_corpus(&args.bitext)?;
    let index = load_cache(&corpus, args.cache_dir.as_deref())?;

    let mut german = load_lexicon(&args.german_lexicon, Language::German)?;
    let mut french = load_lexicon(&args.french_lexicon, Language::French)?;
    let german_reference = match &args.german_reference {
        Some(path) => load_lexicon(path, Language::German)?,
        None => german.clone(),
    };
    let french_reference = match &args.french_reference {
        Some(path) => load_lexicon(path, Language::French)?,
        None => french.clone(),
    };

    let relations = args.relations_dir.as_deref().map(Relations::load).transpose()?;
    if let (Some(relation), Some(relations)) = (&args.relation, &relations) {
        german = filter_for_relation(&german, &relations.german, &relations.groups, relation);
        french = filter_for_relation(&french, &relations.french, &relations.groups, relation);
        if german.is_empty() && french.is_empty() {
            bail!("No connective of either lexicon belongs to relation {relation:?}");
        }
        info!(
            relation = relation.as_str(),
            german = german.len(),
            french = french.len(),
            "Filtered seed lexicons"
        );
    }

    let result = Bootstrap::new(
        &corpus,
        config,
        LanguageState::new(french, french_reference, index.french),
        LanguageState::new(german, german_reference, index.german),
    )
    .context("Invalid configuration")?
    .run();

    for report in &result.rounds {
        info!(
            round = report.round,
            language = %report.language,
            discovered = report.discovered.len(),
            "{}",
            report.discovered.join(", ")
        );
    }

    let label = args.relation.as_deref().unwrap_or("all");
    let relations = relations.as_ref().map(|relations| (relations, args.show_relation));
    write_tables(&result, relations, &args.out_dir, label)?;
    Ok(())
}

/// Write the non-empty alignment table of each direction, plus its relation
/// mapping when relations are loaded. Returns the paths written.
fn write_tables(
    result: &BootstrapResult,
    relations: Option<(&Relations, bool)>,
    out_dir: &Path,
    label: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    for language in Language::ALL {
        let table = result.alignments(language);
        if table.is_empty() {
            info!(%language, "No alignments, skipping output");
            continue;
        }

        let path = out_dir.join(alignment_file_name(language, label));
        let saved = match relations {
            Some((relations, true)) => save_json(
                &label_alignment(table, relations.inventory(language), relations.inventory(language.other())),
                &path,
            ),
            _ => save_json(table, &path),
        };
        saved.with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        written.push(path);

        if let Some((relations, _)) = relations {
            let mapping = relation_mapping(table, relations.inventory(language), relations.inventory(language.other()));
            let path = out_dir.join(format!(
                "{}_{}_{}_mapping.json",
                language.code(),
                language.other().code(),
                label
            ));
            save_json(&mapping, &path).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use conn_align::persistence::load_json;
    use conn_align::{Distribution, ProbabilityTable};
    use tempfile::NamedTempFile;

    fn bootstrap_args(extra: &[&str]) -> BootstrapArgs {
        let mut argv = vec![
            "conn-align",
            "bootstrap",
            "align.txt",
            "de.txt",
            "fr.txt",
            "--german-lexicon",
            "de_lex.txt",
            "--french-lexicon",
            "fr_lex.txt",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Bootstrap(args) => args,
            other => panic!("expected bootstrap, got {other:?}"),
        }
    }

    fn corpus(alignment: &str, german: &str, french: &str) -> ParallelCorpus {
        ParallelCorpus::from_text(Language::German, alignment, german, french).unwrap()
    }

    #[test]
    fn default_log_filter_names_this_binary() {
        assert_eq!(DEFAULT_LOG_FILTER, format!("{}=info", env!("CARGO_CRATE_NAME")));
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn flags_override_the_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "start_language = \"french\"\nrounds = 2\n\n[filters]\nword_threshold = 0.1\nword_min_count = 7\nphrase_min_count = 4"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let from_file = load_config(&bootstrap_args(&["--config", path])).unwrap();
        assert_eq!(from_file.rounds, 2);
        assert_eq!(from_file.start_language, Language::French);
        assert_eq!(from_file.filters.word_threshold, 0.1);
        assert_eq!(from_file.filters.phrase_min_count, 4);

        let args = bootstrap_args(&["--config", path, "--wt", "0.3", "--pc", "9", "-i", "5", "-g"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.start_language, Language::German);
        assert_eq!(config.filters.word_threshold, 0.3);
        assert_eq!(config.filters.phrase_min_count, 9);
        // not given on the command line
        assert_eq!(config.filters.word_min_count, 7);
        assert_eq!(config.filters.phrase_threshold, 0.014);
    }

    #[test]
    fn aliases_match_long_flags() {
        let long = bootstrap_args(&[
            "--word-threshold",
            "0.2",
            "--phrase-threshold",
            "0.05",
            "--word-count",
            "3",
            "--phrase-count",
            "2",
        ]);
        let short = bootstrap_args(&["--wt", "0.2", "--pt", "0.05", "--wc", "3", "--pc", "2"]);

        assert_eq!(long.word_threshold, short.word_threshold);
        assert_eq!(long.phrase_threshold, short.phrase_threshold);
        assert_eq!(long.word_count, short.word_count);
        assert_eq!(long.phrase_count, short.phrase_count);
        assert_eq!(short.word_threshold, Some(0.2));
        assert_eq!(short.phrase_count, Some(2));
    }

    #[test]
    fn cache_is_written_then_reused() {
        let dir = tempfile::tempdir().unwrap();
        let first = corpus("0-0", "aber", "mais");
        let built = load_cache(&first, Some(dir.path())).unwrap();
        assert!(dir.path().join("de_word_alignment.json").exists());
        assert!(dir.path().join("fr_word_alignment.json").exists());

        // a different bitext still gets the saved cache
        let second = corpus("0-0", "doch", "pourtant");
        let reused = load_cache(&second, Some(dir.path())).unwrap();
        assert_eq!(reused, built);
        assert!(reused.german.get("doch").is_none());

        let fresh = load_cache(&second, None).unwrap();
        assert!(fresh.german.get("doch").is_some());
    }

    #[test]
    fn empty_tables_are_not_written() {
        let mut result = BootstrapResult {
            french: LanguageState::default(),
            german: LanguageState::default(),
            rounds: Vec::new(),
        };
        let distribution: Distribution = [("aber".to_string(), 1.0)].into_iter().collect();
        result.french.alignments = [("mais".to_string(), distribution)].into_iter().collect::<ProbabilityTable>();

        let dir = tempfile::tempdir().unwrap();
        let written = write_tables(&result, None, dir.path(), "all").unwrap();

        assert_eq!(written, vec![dir.path().join("fr_de_connectives_alignment_all.json")]);
        assert!(!dir.path().join("de_fr_connectives_alignment_all.json").exists());
        let saved: ProbabilityTable = load_json(&written[0]).unwrap();
        assert_eq!(saved.probability("mais", "aber"), 1.0);
    }
}
