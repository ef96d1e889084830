use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Equality rule for the words of a [`WordList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordComparer {
    #[default]
    IgnoreCase,
    Ordinal,
}

impl WordComparer {
    /// Normalized lookup key for `word` under this comparer.
    pub fn key<'a>(self, word: &'a str) -> Cow<'a, str> {
        match self {
            WordComparer::IgnoreCase => Cow::Owned(word.to_lowercase()),
            WordComparer::Ordinal => Cow::Borrowed(word),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Overwrite,
    /// Union with the words already in the file, then rewrite it.
    Append,
}

/// Immutable named set of words.
///
/// Entries are unique under the list's comparer; the first spelling seen wins.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    name: String,
    path: Option<PathBuf>,
    comparer: WordComparer,
    words: BTreeMap<String, String>,
}

impl WordList {
    pub fn new(name: impl Into<String>, comparer: WordComparer) -> Self {
        Self {
            name: name.into(),
            path: None,
            comparer,
            words: BTreeMap::new(),
        }
    }

    /// Build a list from raw lines. Lines are trimmed and blank lines dropped.
    pub fn from_words<I, S>(name: impl Into<String>, comparer: WordComparer, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(name, comparer).with_values(words)
    }

    /// Load a word list, one word per line.
    ///
    /// A missing file yields an empty list; dictionaries are optional.
    pub fn load(path: &Path, comparer: WordComparer) -> Result<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "word list not found, using empty list");
                return Ok(Self::new(name, comparer).with_path(path));
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let list = Self::from_words(name, comparer, content.lines()).with_path(path);
        debug!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Write one lower-cased word per line, deduplicated and sorted ordinally.
    pub fn save(&self, path: &Path, mode: SaveMode) -> Result<()> {
        let mut values: Vec<String> = self.values().map(normalize_for_save).collect();

        if mode == SaveMode::Append {
            let existing = Self::load(path, WordComparer::IgnoreCase)?;
            values.extend(existing.values().map(normalize_for_save));
        }

        values.retain(|v| !v.is_empty());
        values.sort();
        values.dedup();

        let mut content = values.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), words = values.len(), ?mode, "saved word list");
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn comparer(&self) -> WordComparer {
        self.comparer
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(self.comparer.key(word).as_ref())
    }

    /// Words in key order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.words.values().map(String::as_str)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add loose words, trimmed, keeping existing spellings on collision.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let key = self.comparer.key(value).into_owned();
            self.words.entry(key).or_insert_with(|| value.to_string());
        }
        self
    }

    /// Union with every list in `others`.
    pub fn add_values(&self, others: &[&WordList]) -> WordList {
        others
            .iter()
            .fold(self.clone(), |acc, other| acc.with_values(other.values()))
    }

    /// Words not present in any list of `others`, compared with this list's comparer.
    pub fn except(&self, others: &[&WordList]) -> WordList {
        let excluded: HashSet<String> = others
            .iter()
            .flat_map(|other| other.values())
            .map(|v| self.comparer.key(v).into_owned())
            .collect();

        self.filtered(|key| !excluded.contains(key))
    }

    /// Words present in every list of `others`, compared with this list's comparer.
    pub fn intersect(&self, others: &[&WordList]) -> WordList {
        let operands: Vec<HashSet<String>> = others
            .iter()
            .map(|other| {
                other
                    .values()
                    .map(|v| self.comparer.key(v).into_owned())
                    .collect()
            })
            .collect();

        self.filtered(|key| operands.iter().all(|set| set.contains(key)))
    }

    fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> WordList {
        WordList {
            name: self.name.clone(),
            path: self.path.clone(),
            comparer: self.comparer,
            words: self
                .words
                .iter()
                .filter(|(key, _)| keep(key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl PartialEq for WordList {
    fn eq(&self, other: &Self) -> bool {
        self.comparer == other.comparer && self.words.keys().eq(other.words.keys())
    }
}

fn normalize_for_save(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn list(words: &[&str]) -> WordList {
        WordList::from_words("test", WordComparer::IgnoreCase, words)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let loaded = WordList::load(&dir.path().join("absent.txt"), WordComparer::IgnoreCase)
            .unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.name(), "absent");
    }

    #[test]
    fn test_load_trims_and_drops_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "  hello \n\n   \nWorld\nhello\n").unwrap();

        let loaded = WordList::load(&path, WordComparer::IgnoreCase).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("HELLO"));
        assert!(loaded.contains("world"));
        assert_eq!(loaded.path(), Some(path.as_path()));
    }

    #[test]
    fn test_ordinal_comparer_keeps_case_variants() {
        let words = WordList::from_words("w", WordComparer::Ordinal, ["Json", "json"]);
        assert_eq!(words.len(), 2);
        assert!(!words.contains("JSON"));

        let folded = WordList::from_words("w", WordComparer::IgnoreCase, ["Json", "json"]);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded.values().next(), Some("Json"));
    }

    #[test]
    fn test_save_lowercases_sorts_and_dedups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let words = WordList::from_words("w", WordComparer::Ordinal, ["Zeta", "alpha", "ZETA"]);

        words.save(&path, SaveMode::Overwrite).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nzeta\n");
    }

    #[test]
    fn test_save_append_unions_with_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "delta\nalpha\n").unwrap();

        list(&["charlie", "Alpha"]).save(&path, SaveMode::Append).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "alpha\ncharlie\ndelta\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.txt");
        let original = list(&["Parser", "lexer", " token "]);

        original.save(&path, SaveMode::Overwrite).unwrap();
        let loaded = WordList::load(&path, WordComparer::IgnoreCase).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_except_is_idempotent() {
        let a = list(&["one", "two", "three"]);
        let b = list(&["TWO"]);

        let once = a.except(&[&b]);
        assert_eq!(once.except(&[&b]), once);
        assert!(!once.contains("two"));
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_except_chains_operands() {
        let a = list(&["one", "two", "three"]);
        let result = a.except(&[&list(&["one"]), &list(&["three"])]);
        assert_eq!(result.values().collect::<Vec<_>>(), vec!["two"]);
    }

    #[test]
    fn test_intersect_is_idempotent() {
        let a = list(&["one", "two", "three"]);
        let b = list(&["Two", "three", "four"]);

        let once = a.intersect(&[&b]);
        assert_eq!(once.intersect(&[&b]), once);
        assert_eq!(once.values().collect::<Vec<_>>(), vec!["three", "two"]);
    }

    #[test]
    fn test_intersect_requires_every_operand() {
        let a = list(&["one", "two", "three"]);
        let result = a.intersect(&[&list(&["one", "two"]), &list(&["two", "three"])]);
        assert_eq!(result.values().collect::<Vec<_>>(), vec!["two"]);
    }

    #[test]
    fn test_add_values_is_superset() {
        let a = list(&["one", "two"]);
        let b = list(&["TWO", "three"]);
        let union = a.add_values(&[&b]);

        assert!(a.values().all(|w| union.contains(w)));
        assert!(b.values().all(|w| union.contains(w)));
        assert_eq!(union.len(), 3);
    }

    #[test]
    fn test_set_algebra_uses_target_comparer() {
        let target = WordList::from_words("t", WordComparer::Ordinal, ["Json", "json"]);
        let operand = list(&["json"]);

        let result = target.except(&[&operand]);
        assert_eq!(result.values().collect::<Vec<_>>(), vec!["Json"]);
    }
}
