use crate::cancel::CancellationToken;
use crate::checker::distance::{damerau_levenshtein_within, osa_row};
use crate::dict::WordList;
use crate::error::Result;
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use tracing::debug;

/// FST over the lower-cased dictionary, used for bounded fuzzy lookups.
pub struct FuzzyIndex {
    set: Set<Vec<u8>>,
}

impl FuzzyIndex {
    pub fn build(words: &WordList) -> Result<Self> {
        let mut keys: Vec<String> = words.values().map(str::to_lowercase).collect();
        keys.sort();
        keys.dedup();

        let mut builder = SetBuilder::memory();
        for key in &keys {
            builder.insert(key)?;
        }
        let set = Set::new(builder.into_inner()?)?;

        debug!(words = set.len(), "built fuzzy index");
        Ok(Self { set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Words within `max_distance` of `query`, with their distance, in index order.
    ///
    /// Stops early when `cancel` fires and returns what was found so far.
    pub fn search(
        &self,
        query: &str,
        max_distance: usize,
        cancel: &CancellationToken,
    ) -> Vec<(String, usize)> {
        self.search_with(query, max_distance, cancel, |_, _| {})
    }

    /// Like [`FuzzyIndex::search`], calling `on_match` for each hit as it streams out.
    pub fn search_with(
        &self,
        query: &str,
        max_distance: usize,
        cancel: &CancellationToken,
        mut on_match: impl FnMut(&str, usize),
    ) -> Vec<(String, usize)> {
        let query = query.to_lowercase();
        let target: Vec<char> = query.chars().collect();
        let automaton = BoundedDamerau {
            target: &target,
            max: max_distance,
            cancel,
        };

        let mut matches = Vec::new();
        let mut stream = self.set.search(automaton).into_stream();

        while let Some(key) = stream.next() {
            if cancel.is_cancelled() {
                debug!(query = %query, found = matches.len(), "fuzzy search cancelled");
                break;
            }

            let Ok(word) = std::str::from_utf8(key) else {
                continue;
            };
            if let Some(distance) = damerau_levenshtein_within(&query, word, max_distance) {
                on_match(word, distance);
                matches.push((word.to_string(), distance));
            }
        }

        matches
    }
}

#[derive(Debug, Clone)]
pub struct DamerauState {
    prev: Vec<usize>,
    row: Vec<usize>,
    last: Option<char>,
    /// Bytes of a UTF-8 char not yet complete.
    pending: Vec<u8>,
}

/// Walks the FST one byte at a time, advancing an optimal-string-alignment row per
/// decoded char. A prefix is dropped as soon as its row minimum exceeds the bound.
struct BoundedDamerau<'a> {
    target: &'a [char],
    max: usize,
    cancel: &'a CancellationToken,
}

impl Automaton for BoundedDamerau<'_> {
    type State = Option<DamerauState>;

    fn start(&self) -> Self::State {
        Some(DamerauState {
            prev: Vec::new(),
            row: (0..=self.target.len()).collect(),
            last: None,
            pending: Vec::new(),
        })
    }

    fn is_match(&self, state: &Self::State) -> bool {
        state
            .as_ref()
            .is_some_and(|s| s.pending.is_empty() && s.row[self.target.len()] <= self.max)
    }

    fn can_match(&self, state: &Self::State) -> bool {
        state.is_some() && !self.cancel.is_cancelled()
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        let state = state.as_ref()?;

        let mut pending = state.pending.clone();
        pending.push(byte);
        if pending.len() < utf8_width(pending[0])? {
            return Some(DamerauState {
                pending,
                ..state.clone()
            });
        }

        let ch = std::str::from_utf8(&pending).ok()?.chars().next()?;
        let row = osa_row(self.target, &state.prev, &state.row, state.last, ch);
        if row.iter().min().is_some_and(|&min| min > self.max) {
            return None;
        }

        Some(DamerauState {
            prev: state.row.clone(),
            row,
            last: Some(ch),
            pending: Vec::new(),
        })
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}
