use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use idspell::cli::output::{print_check_summary, print_results, OutputFormat};
use idspell::config::{Overrides, DEFAULT_DICTIONARY_FILE};
use idspell::dict::manager::{self, DEFAULT_WORDLIST_URL};
use idspell::dict::{SaveMode, SpellingData, WordComparer, WordList};
use idspell::{CancellationToken, Config, SpellChecker};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "idspell")]
#[command(version, about = "Spellchecker for identifiers, comments and doc text in source code", long_about = None)]
struct Cli {
    /// Files or directories to check
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Dictionary word list (repeatable)
    #[arg(short, long, value_name = "FILE")]
    dictionary: Vec<PathBuf>,

    /// Words accepted without being dictionary words (repeatable)
    #[arg(long, value_name = "FILE")]
    ignore_list: Vec<PathBuf>,

    /// `word=fix` list used for suggestions (repeatable)
    #[arg(long, value_name = "FILE")]
    fix_list: Vec<PathBuf>,

    /// Also check identifiers bound by let, var or auto
    #[arg(long)]
    include_locals: bool,

    /// Also check files marked as generated
    #[arg(long)]
    include_generated: bool,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Culture used for messages
    #[arg(long, env = "IDSPELL_CULTURE")]
    culture: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Append every flagged word to this word list
    #[arg(long, value_name = "FILE")]
    save_words: Option<PathBuf>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Word list and fix list maintenance
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed word lists
    List {
        /// Directory to list (defaults to the data directory)
        dir: Option<PathBuf>,
    },
    /// Download a word list
    Download {
        #[arg(long, default_value = DEFAULT_WORDLIST_URL)]
        url: String,
        /// Output file (defaults to words.txt in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show word list info
    Info {
        /// Word list (defaults to words.txt in the data directory)
        path: Option<PathBuf>,
    },
    /// Union word lists, minus excluded words
    Build {
        #[arg(required = true)]
        sources: Vec<PathBuf>,
        #[arg(long)]
        exclude: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Generate prefixed and plural forms confirmed by a reference list
    Generate {
        input: PathBuf,
        #[arg(long)]
        reference: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Only prefixed forms
        #[arg(long, conflicts_with = "suffixes")]
        prefixes: bool,
        /// Only plural forms
        #[arg(long)]
        suffixes: bool,
    },
    /// Merge fix lists, minus a baseline
    MergeFixes {
        #[arg(required = true)]
        sources: Vec<PathBuf>,
        #[arg(long)]
        baseline: Option<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Propose fixes for flagged words
    Synthesize {
        /// Word list of flagged words, e.g. from --save-words
        words: PathBuf,
        #[arg(short, long)]
        dictionary: Vec<PathBuf>,
        #[arg(long)]
        fixes_out: PathBuf,
        #[arg(long)]
        new_words_out: PathBuf,
    },
    /// Review words without a fix
    Review {
        candidates: PathBuf,
        #[arg(long)]
        dictionary: PathBuf,
        #[arg(long)]
        ignore_list: PathBuf,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "idspell", &mut io::stdout());
        return Ok(());
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No paths specified. Use --help for usage information.");
    }

    let mut config = Config::load(Overrides {
        dictionaries: cli.dictionary,
        ignore_lists: cli.ignore_list,
        fix_lists: cli.fix_list,
        include_local_identifiers: cli.include_locals,
        include_generated_code: cli.include_generated,
        ignore_patterns: cli.ignore_pattern,
    })?;
    if let Some(culture) = cli.culture {
        config.culture = culture;
    }

    let data = SpellingData::load(&config.data_paths())?;
    let checker = SpellChecker::new(data, config.analysis_options());
    let cancel = CancellationToken::new();

    let results = checker.check_paths(&cli.paths, &cancel)?;
    let total_errors: usize = results.iter().map(|r| r.error_count()).sum();

    print_results(&results, &config.culture, !cli.no_color, cli.format)?;
    if cli.format == OutputFormat::Text {
        print_check_summary(total_errors, results.len(), !cli.no_color);
    }

    if let Some(path) = &cli.save_words {
        let flagged = WordList::from_words(
            "flagged",
            WordComparer::IgnoreCase,
            results
                .iter()
                .flat_map(|r| r.diagnostics.iter().map(|d| d.value.as_str())),
        );
        flagged
            .save(path, SaveMode::Append)
            .with_context(|| format!("Failed to save flagged words to {}", path.display()))?;
        info!(words = flagged.len(), path = %path.display(), "saved flagged words");
    }

    // Exit with appropriate code
    if total_errors > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn default_word_list() -> Result<PathBuf> {
    Ok(data_dir()?.join(DEFAULT_DICTIONARY_FILE))
}

fn data_dir() -> Result<PathBuf> {
    Config::data_dir().context("Failed to get data directory")
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List { dir } => {
                let dir = match dir {
                    Some(dir) => dir,
                    None => data_dir()?,
                };
                manager::list_word_lists(&dir)?;
            }
            DictCommands::Download { url, output } => {
                let output = match output {
                    Some(output) => output,
                    None => default_word_list()?,
                };
                manager::download_word_list(&url, &output)?;
            }
            DictCommands::Info { path } => {
                let path = match path {
                    Some(path) => path,
                    None => default_word_list()?,
                };
                manager::show_info(&path)?;
            }
            DictCommands::Build {
                sources,
                exclude,
                output,
            } => {
                let dictionary = manager::build_dictionary(&sources, &exclude, &output)?;
                println!("{} words written to {}", dictionary.len(), output.display());
            }
            DictCommands::Generate {
                input,
                reference,
                output,
                prefixes,
                suffixes,
            } => {
                let both = !prefixes && !suffixes;
                let found = manager::generate_forms(
                    &input,
                    &reference,
                    &output,
                    prefixes || both,
                    suffixes || both,
                )?;
                println!("{} forms appended to {}", found.len(), output.display());
            }
            DictCommands::MergeFixes {
                sources,
                baseline,
                output,
            } => {
                let merged = manager::merge_fix_lists(&sources, baseline.as_deref(), &output)?;
                println!("{} keys written to {}", merged.len(), output.display());
            }
            DictCommands::Synthesize {
                words,
                dictionary,
                fixes_out,
                new_words_out,
            } => {
                let config = Config::load(Overrides {
                    dictionaries: dictionary,
                    ..Default::default()
                })?;
                let data = SpellingData::load(&config.data_paths())?;
                manager::synthesize_fixes(
                    &words,
                    &data,
                    config.fuzzy,
                    &fixes_out,
                    &new_words_out,
                    &CancellationToken::new(),
                )?;
            }
            DictCommands::Review {
                candidates,
                dictionary,
                ignore_list,
            } => {
                let outcome = manager::review_new_words(&candidates, &dictionary, &ignore_list)?;
                println!(
                    "{} added, {} ignored, {} left for later",
                    outcome.added, outcome.ignored, outcome.remaining
                );
            }
        },
    }
    Ok(())
}
