//! Offline maintenance commands behind `idspell dict`.
//!
//! Every command loads its inputs, combines them with the word list and fix list
//! set operations and saves the result. None of them run concurrently with a check.

use crate::cancel::CancellationToken;
use crate::checker::suggestions::{FixSynthesizer, FuzzyOptions, Synthesis};
use crate::dict::morphology::{prefixed_forms, suffixed_forms};
use crate::dict::{FixList, SaveMode, SpellingData, WordComparer, WordList};
use anyhow::{Context, Result};
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

// Pinned to a fixed commit so downloads are reproducible.
pub const DEFAULT_WORDLIST_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/6e4bc58ad764c3e6df8b5be4048671962c9d6a23/words_alpha.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordListInfo {
    pub name: String,
    pub path: PathBuf,
    pub word_count: usize,
    pub size_bytes: u64,
    pub sha256: String,
}

impl WordListInfo {
    pub fn inspect(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;
        let list = WordList::load(path, WordComparer::IgnoreCase)?;

        Ok(Self {
            name: list.name().to_string(),
            path: path.to_path_buf(),
            word_count: list.len(),
            size_bytes: bytes.len() as u64,
            sha256: sha256_hex(&bytes),
        })
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

pub fn download_word_list(url: &str, output: &Path) -> Result<WordListInfo> {
    println!("{} {}", "Downloading".cyan().bold(), url.dimmed());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Downloading...");

    let response = reqwest::blocking::get(url).context("Failed to download word list")?;
    if !response.status().is_success() {
        pb.finish_and_clear();
        anyhow::bail!("Failed to download word list: HTTP {}", response.status());
    }
    let body = response.text().context("Failed to read response body")?;
    pb.finish_with_message("Download complete");

    let digest = sha256_hex(body.as_bytes());
    let list = WordList::from_words("download", WordComparer::IgnoreCase, body.lines());
    list.save(output, SaveMode::Overwrite)?;
    info!(url, words = list.len(), sha256 = %digest, "downloaded word list");

    println!("  SHA-256: {}", digest.dimmed());
    println!(
        "{} {} words saved to {}",
        "✓".green().bold(),
        list.len().to_string().yellow(),
        output.display().to_string().cyan()
    );

    WordListInfo::inspect(output)
}

pub fn show_info(path: &Path) -> Result<WordListInfo> {
    if !path.exists() {
        anyhow::bail!("Word list not found: {}", path.display());
    }

    let info = WordListInfo::inspect(path)?;
    println!("{}", format!("Word list: {}", info.name).bold());
    println!("  Path: {}", info.path.display());
    println!("  Words: {}", info.word_count);
    println!("  Size: {} KB", info.size_bytes / 1024);
    println!("  SHA-256: {}", info.sha256);
    Ok(info)
}

/// Word lists (`*.txt`) in `dir`, sorted by path.
pub fn list_word_lists(dir: &Path) -> Result<Vec<WordListInfo>> {
    if !dir.exists() {
        println!("{}", "No word lists installed.".yellow());
        println!("Run {} to download one.", "idspell dict download".cyan());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let infos = paths
        .iter()
        .map(|p| WordListInfo::inspect(p))
        .collect::<Result<Vec<_>>>()?;

    if infos.is_empty() {
        println!("{}", "No word lists found.".yellow());
    } else {
        println!("{}", "Installed word lists:".bold());
        for info in &infos {
            println!(
                "  {} {} ({} words, {})",
                "✓".green(),
                info.name.cyan().bold(),
                info.word_count,
                format!("{}KB", info.size_bytes / 1024).dimmed()
            );
        }
    }
    println!();
    println!("Data directory: {}", dir.display().to_string().dimmed());

    Ok(infos)
}

fn load_all(paths: &[PathBuf]) -> Result<Vec<WordList>> {
    paths
        .iter()
        .map(|p| Ok(WordList::load(p, WordComparer::IgnoreCase)?))
        .collect()
}

/// Union of `sources` minus every word in `excludes`, saved to `output`.
pub fn build_dictionary(sources: &[PathBuf], excludes: &[PathBuf], output: &Path) -> Result<WordList> {
    let sources = load_all(sources)?;
    let excludes = load_all(excludes)?;

    let union = WordList::new("dictionary", WordComparer::IgnoreCase)
        .add_values(&sources.iter().collect::<Vec<_>>());
    let dictionary = union.except(&excludes.iter().collect::<Vec<_>>());

    dictionary.save(output, SaveMode::Overwrite)?;
    info!(words = dictionary.len(), output = %output.display(), "built dictionary");
    Ok(dictionary)
}

/// Derive prefixed and/or plural forms of `input`, keep those found in `reference`
/// and append them to `output`. Returns the forms that were new to `input`.
pub fn generate_forms(
    input: &Path,
    reference: &Path,
    output: &Path,
    prefixes: bool,
    suffixes: bool,
) -> Result<WordList> {
    let words = WordList::load(input, WordComparer::IgnoreCase)?;
    let reference = WordList::load(reference, WordComparer::IgnoreCase)?;

    let mut forms = WordList::new("forms", WordComparer::IgnoreCase);
    if prefixes {
        forms = forms.add_values(&[&prefixed_forms(&words)]);
    }
    if suffixes {
        forms = forms.add_values(&[&suffixed_forms(&words)]);
    }

    let found = forms.intersect(&[&reference]).except(&[&words]);
    found.save(output, SaveMode::Append)?;
    info!(generated = forms.len(), kept = found.len(), "generated word forms");
    Ok(found)
}

/// Merge `sources`, drop what `baseline` already records and save to `output`.
pub fn merge_fix_lists(sources: &[PathBuf], baseline: Option<&Path>, output: &Path) -> Result<FixList> {
    let mut merged = FixList::new();
    for path in sources {
        merged = merged.merge(&[&FixList::load(path)?]);
    }

    if let Some(baseline) = baseline {
        merged = merged.except(&FixList::load(baseline)?);
    }

    merged.save(output)?;
    info!(keys = merged.len(), output = %output.display(), "merged fix lists");
    Ok(merged)
}

/// Propose fixes for the words in `words`. New fixes are merged into `fixes_out`;
/// words without a candidate are appended to `new_words_out` for review.
pub fn synthesize_fixes(
    words: &Path,
    data: &SpellingData,
    options: FuzzyOptions,
    fixes_out: &Path,
    new_words_out: &Path,
    cancel: &CancellationToken,
) -> Result<Synthesis> {
    let words = WordList::load(words, WordComparer::IgnoreCase)?;
    let synthesizer = FixSynthesizer::new(data, options)?;
    let synthesis = synthesizer.synthesize(words.values(), cancel)?;

    let existing = FixList::load(fixes_out)?;
    existing.merge(&[&synthesis.fixes]).save(fixes_out)?;
    synthesis.new_words.save(new_words_out, SaveMode::Append)?;

    println!(
        "{} {} fixes, {} words to review",
        "✓".green().bold(),
        synthesis.fixes.len().to_string().yellow(),
        synthesis.new_words.len().to_string().yellow()
    );
    Ok(synthesis)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Dictionary,
    IgnoreList,
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub added: usize,
    pub ignored: usize,
    pub remaining: usize,
}

/// Ask about every candidate word, then apply the answers.
pub fn review_new_words(candidates: &Path, dictionary: &Path, ignore_list: &Path) -> Result<ReviewOutcome> {
    let words = WordList::load(candidates, WordComparer::IgnoreCase)?;
    if words.is_empty() {
        println!("{}", "Nothing to review.".green());
        return Ok(ReviewOutcome::default());
    }

    let theme = ColorfulTheme::default();
    let options = ["Add to dictionary", "Add to ignore list", "Skip", "Stop reviewing"];
    let mut decisions = Vec::new();

    for word in words.values() {
        let choice = Select::with_theme(&theme)
            .with_prompt(format!("'{}'", word))
            .items(&options[..])
            .default(0)
            .interact()?;

        let choice = match choice {
            0 => ReviewChoice::Dictionary,
            1 => ReviewChoice::IgnoreList,
            2 => ReviewChoice::Skip,
            _ => break,
        };
        decisions.push((word.to_string(), choice));
    }

    apply_review(candidates, dictionary, ignore_list, &decisions)
}

/// Append accepted words to the dictionary or ignore list. Candidates that were
/// skipped or not reached stay in the candidates file.
pub fn apply_review(
    candidates: &Path,
    dictionary: &Path,
    ignore_list: &Path,
    decisions: &[(String, ReviewChoice)],
) -> Result<ReviewOutcome> {
    let words = WordList::load(candidates, WordComparer::IgnoreCase)?;
    let picked = |wanted: ReviewChoice| {
        WordList::from_words(
            "review",
            WordComparer::IgnoreCase,
            decisions
                .iter()
                .filter(|(_, choice)| *choice == wanted)
                .map(|(word, _)| word.as_str()),
        )
    };

    let added = picked(ReviewChoice::Dictionary);
    let ignored = picked(ReviewChoice::IgnoreList);
    if !added.is_empty() {
        added.save(dictionary, SaveMode::Append)?;
    }
    if !ignored.is_empty() {
        ignored.save(ignore_list, SaveMode::Append)?;
    }

    let remaining = words.except(&[&added, &ignored]);
    remaining.save(candidates, SaveMode::Overwrite)?;

    Ok(ReviewOutcome {
        added: added.len(),
        ignored: ignored.len(),
        remaining: remaining.len(),
    })
}
