use crate::dict::fix_list::{FixList, SpellingFix};
use crate::dict::word_list::{WordComparer, WordList};
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Files that make up a [`SpellingData`].
#[derive(Debug, Clone, Default)]
pub struct SpellingDataPaths {
    pub dictionaries: Vec<PathBuf>,
    pub ignore_lists: Vec<PathBuf>,
    pub fix_lists: Vec<PathBuf>,
}

/// Read-only lookup surface for one analysis pass.
///
/// Shared by reference across worker threads; replaced wholesale (never mutated) by
/// the offline maintenance commands.
#[derive(Debug, Clone, Default)]
pub struct SpellingData {
    dictionary: WordList,
    ignore_list: WordList,
    fixes: FixList,
}

impl SpellingData {
    pub fn new(dictionary: WordList, ignore_list: WordList, fixes: FixList) -> Self {
        Self {
            dictionary,
            ignore_list,
            fixes,
        }
    }

    /// Load and union every configured file. Missing files contribute nothing.
    pub fn load(paths: &SpellingDataPaths) -> Result<Self> {
        let dictionary = load_union("dictionary", &paths.dictionaries)?;
        let ignore_list = load_union("ignore", &paths.ignore_lists)?;

        let mut fixes = FixList::new();
        for path in &paths.fix_lists {
            fixes = fixes.merge(&[&FixList::load(path)?]);
        }

        info!(
            dictionary = dictionary.len(),
            ignored = ignore_list.len(),
            fixes = fixes.len(),
            "loaded spelling data"
        );

        Ok(Self::new(dictionary, ignore_list, fixes))
    }

    pub fn dictionary(&self) -> &WordList {
        &self.dictionary
    }

    pub fn ignore_list(&self) -> &WordList {
        &self.ignore_list
    }

    pub fn fixes(&self) -> &FixList {
        &self.fixes
    }

    /// True when the word is in the dictionary or the ignore list.
    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains(word) || self.ignore_list.contains(word)
    }

    pub fn fixes_for(&self, word: &str) -> &[SpellingFix] {
        self.fixes.get(word).unwrap_or_default()
    }

    pub fn with_dictionary(self, dictionary: WordList) -> Self {
        Self { dictionary, ..self }
    }

    pub fn with_ignore_list(self, ignore_list: WordList) -> Self {
        Self {
            ignore_list,
            ..self
        }
    }

    pub fn with_fixes(self, fixes: FixList) -> Self {
        Self { fixes, ..self }
    }
}

fn load_union(name: &str, paths: &[PathBuf]) -> Result<WordList> {
    let mut list = WordList::new(name, WordComparer::IgnoreCase);
    for path in paths {
        list = list.add_values(&[&WordList::load(path, WordComparer::IgnoreCase)?]);
    }
    Ok(list)
}
