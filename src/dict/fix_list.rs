use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// How a fix was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellingFixKind {
    None,
    /// Loaded from a fix list file.
    Predefined,
    /// Adjacent-letter transposition.
    Swap,
    /// Bounded edit-distance match.
    Fuzzy,
    Split,
    User,
}

impl fmt::Display for SpellingFixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpellingFixKind::None => "none",
            SpellingFixKind::Predefined => "predefined",
            SpellingFixKind::Swap => "swap",
            SpellingFixKind::Fuzzy => "fuzzy",
            SpellingFixKind::Split => "split",
            SpellingFixKind::User => "user",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingFix {
    pub value: String,
    pub kind: SpellingFixKind,
}

impl SpellingFix {
    pub fn new(value: impl Into<String>, kind: SpellingFixKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Fix identity: case-insensitive value plus kind.
    pub fn same_as(&self, other: &SpellingFix) -> bool {
        self.kind == other.kind && self.value.to_lowercase() == other.value.to_lowercase()
    }
}

/// Immutable map from a misspelled word to its accepted corrections.
///
/// Keys are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixList {
    items: BTreeMap<String, Vec<SpellingFix>>,
}

impl FixList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `word=fix` lines. A missing file yields an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "fix list not found, using empty list");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let list = Self::parse(&content, path)?;
        debug!(path = %path.display(), keys = list.len(), "loaded fix list");
        Ok(list)
    }

    /// Parse fix list text. `path` is only used to report malformed lines.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut list = Self::new();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (key, value) = trimmed.split_once('=').ok_or_else(|| Error::MalformedFixLine {
                path: path.to_path_buf(),
                line_number: idx + 1,
                line: line.to_string(),
            })?;

            list.insert(key.trim(), SpellingFix::new(value.trim(), SpellingFixKind::Predefined));
        }

        Ok(list)
    }

    /// Write `key=value` lines sorted by key, then by value.
    ///
    /// The format has no room for [`SpellingFixKind`]: swap and fuzzy fixes are written
    /// like any other and load back as `Predefined`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut lines: Vec<String> = self
            .items
            .iter()
            .flat_map(|(key, fixes)| fixes.iter().map(move |fix| format!("{}={}", key, fix.value)))
            .collect();
        lines.sort();
        lines.dedup();

        let mut content = lines.join("\n");
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

        debug!(path = %path.display(), lines = lines.len(), "saved fix list");
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&[SpellingFix]> {
        self.items.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    pub fn contains_key(&self, word: &str) -> bool {
        self.items.contains_key(&word.to_lowercase())
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SpellingFix])> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn with_fix(mut self, word: &str, fix: SpellingFix) -> Self {
        self.insert(word, fix);
        self
    }

    /// Union of this list and `others`, per key.
    pub fn merge(&self, others: &[&FixList]) -> FixList {
        let mut merged = self.clone();
        for other in others {
            for (key, fixes) in other.iter() {
                for fix in fixes {
                    merged.insert(key, fix.clone());
                }
            }
        }
        merged
    }

    /// Drop fixes whose key and value are already recorded in `baseline`.
    pub fn except(&self, baseline: &FixList) -> FixList {
        let items = self
            .items
            .iter()
            .filter_map(|(key, fixes)| {
                let retracted = baseline.get(key).unwrap_or_default();
                let remaining: Vec<SpellingFix> = fixes
                    .iter()
                    .filter(|fix| {
                        !retracted
                            .iter()
                            .any(|r| r.value.to_lowercase() == fix.value.to_lowercase())
                    })
                    .cloned()
                    .collect();
                (!remaining.is_empty()).then(|| (key.clone(), remaining))
            })
            .collect();

        FixList { items }
    }

    fn insert(&mut self, word: &str, fix: SpellingFix) {
        let fixes = self.items.entry(word.to_lowercase()).or_default();
        if !fixes.iter().any(|f| f.same_as(&fix)) {
            fixes.push(fix);
        }
    }
}
