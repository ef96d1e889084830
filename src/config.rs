use crate::checker::suggestions::FuzzyOptions;
use crate::checker::{AnalysisOptions, DEFAULT_IGNORE_PATTERNS};
use crate::checker::diagnostic::DEFAULT_CULTURE;
use crate::dict::SpellingDataPaths;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCAL_CONFIG_FILE: &str = ".idspell.toml";
pub const DEFAULT_DICTIONARY_FILE: &str = "words.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionaries: Vec<PathBuf>,
    pub ignore_lists: Vec<PathBuf>,
    pub fix_lists: Vec<PathBuf>,
    pub include_local_identifiers: bool,
    pub include_generated_code: bool,
    pub culture: String,
    pub min_word_length: usize,
    pub ignore_patterns: Vec<String>,
    pub fuzzy: FuzzyOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionaries: Self::data_dir()
                .map(|dir| vec![dir.join(DEFAULT_DICTIONARY_FILE)])
                .unwrap_or_default(),
            ignore_lists: Vec::new(),
            fix_lists: Vec::new(),
            include_local_identifiers: false,
            include_generated_code: false,
            culture: DEFAULT_CULTURE.to_string(),
            min_word_length: 3,
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            fuzzy: FuzzyOptions::default(),
        }
    }
}

/// Values given on the command line. Empty lists and `false` flags leave the
/// configured value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dictionaries: Vec<PathBuf>,
    pub ignore_lists: Vec<PathBuf>,
    pub fix_lists: Vec<PathBuf>,
    pub include_local_identifiers: bool,
    pub include_generated_code: bool,
    pub ignore_patterns: Vec<String>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
            overrides,
        )
    }

    pub fn load_from(global: Option<&Path>, local: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                config = config.merge(Self::from_file(global_path)?);
            }
        }

        if local.exists() {
            config = config.merge(Self::from_file(local)?);
        }

        if !overrides.dictionaries.is_empty() {
            config.dictionaries = overrides.dictionaries;
        }
        if !overrides.ignore_lists.is_empty() {
            config.ignore_lists = overrides.ignore_lists;
        }
        if !overrides.fix_lists.is_empty() {
            config.fix_lists = overrides.fix_lists;
        }
        config.include_local_identifiers |= overrides.include_local_identifiers;
        config.include_generated_code |= overrides.include_generated_code;
        config.ignore_patterns.extend(overrides.ignore_patterns);

        debug!(?config, "loaded configuration");
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        let defaults = Self::default();

        if other.dictionaries != defaults.dictionaries {
            self.dictionaries = other.dictionaries;
        }
        if !other.ignore_lists.is_empty() {
            self.ignore_lists = other.ignore_lists;
        }
        if !other.fix_lists.is_empty() {
            self.fix_lists = other.fix_lists;
        }
        if other.include_local_identifiers {
            self.include_local_identifiers = true;
        }
        if other.include_generated_code {
            self.include_generated_code = true;
        }
        if other.culture != defaults.culture {
            self.culture = other.culture;
        }
        if other.min_word_length != defaults.min_word_length {
            self.min_word_length = other.min_word_length;
        }
        if other.ignore_patterns != defaults.ignore_patterns {
            self.ignore_patterns = other.ignore_patterns;
        }
        if other.fuzzy != defaults.fuzzy {
            self.fuzzy = other.fuzzy;
        }
        self
    }

    pub fn data_paths(&self) -> SpellingDataPaths {
        SpellingDataPaths {
            dictionaries: self.dictionaries.clone(),
            ignore_lists: self.ignore_lists.clone(),
            fix_lists: self.fix_lists.clone(),
        }
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            include_local_identifiers: self.include_local_identifiers,
            include_generated_code: self.include_generated_code,
            culture: self.culture.clone(),
            min_word_length: self.min_word_length,
            ..AnalysisOptions::default()
        }
        .with_ignore_patterns(&self.ignore_patterns[..])
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "idspell").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "idspell").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
