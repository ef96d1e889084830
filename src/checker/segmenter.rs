//! Splits identifiers and prose fragments into candidate words.
//!
//! Identifier boundaries:
//! 1. every run of non-letters (never emitted),
//! 2. acronym to word, `XMLParser` -> `XML` | `Parser`,
//! 3. lower to upper, `fooBar` -> `foo` | `Bar`.
//!
//! Prose is first cut into alphabetic runs of two or more letters (a trailing
//! contraction such as `'s` stays attached), then optionally re-split by rules 2 and 3.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PROSE_WORD: Regex =
        Regex::new(r"\b\p{L}{2,}(?:['’](?:s|d|ll|m|re|t|ve))?\b").unwrap();
    static ref SHORT_IDENTIFIER: Regex = Regex::new(r"^[a-z]{1,3}[0-9]*$").unwrap();
}

const CONTRACTIONS: &[&str] = &["s", "d", "ll", "m", "re", "t", "ve"];

/// A word cut out of a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitItem {
    pub value: String,
    /// Byte offset into the segmented text.
    pub start_index: usize,
    /// 1-based position in the output sequence.
    pub ordinal: usize,
}

/// Split an identifier on non-letter runs and case transitions.
pub fn split_identifier(text: &str) -> Vec<SplitItem> {
    let mut pieces = Vec::new();
    for (run_start, run) in letter_runs(text) {
        for (offset, segment) in case_segments(run) {
            pieces.push((run_start + offset, segment));
        }
    }
    number(pieces)
}

/// Split a prose fragment into words.
///
/// `split_camel_case` re-splits each word on case transitions; it is used for
/// code-like spans inside comments and left off for plain prose.
pub fn split_prose(text: &str, split_camel_case: bool) -> Vec<SplitItem> {
    let mut pieces = Vec::new();
    for word in PROSE_WORD.find_iter(text) {
        if split_camel_case {
            for (offset, segment) in case_segments(word.as_str()) {
                pieces.push((word.start() + offset, segment));
            }
        } else {
            pieces.push((word.start(), word.as_str()));
        }
    }
    number(pieces)
}

/// Identifiers that are never checked: two chars or fewer, or short lowercase
/// names with optional trailing digits (`i`, `idx`, `x1`).
pub fn should_skip_identifier(text: &str) -> bool {
    text.chars().count() <= 2 || SHORT_IDENTIFIER.is_match(text)
}

/// Strip a type-parameter (`TKey`) or interface (`IList`) prefix.
///
/// Returns the byte length removed and the rest of the identifier.
pub fn strip_identifier_prefix(text: &str) -> (usize, &str) {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('T' | 'I'), Some(second), Some(third))
            if second.is_uppercase() && third.is_lowercase() =>
        {
            (1, &text[1..])
        }
        _ => (0, text),
    }
}

/// The root of a word ending in a contraction or possessive, e.g. `parser's` -> `parser`.
pub fn strip_contraction(word: &str) -> Option<&str> {
    let idx = word.rfind(is_apostrophe)?;
    let suffix = word[idx..].trim_start_matches(is_apostrophe);
    CONTRACTIONS
        .iter()
        .any(|c| c.eq_ignore_ascii_case(suffix))
        .then(|| &word[..idx])
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '’'
}

fn letter_runs(text: &str) -> Vec<(usize, &str)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_alphabetic(), start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                runs.push((s, &text[s..idx]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, &text[s..]));
    }

    runs
}

fn case_segments(word: &str) -> Vec<(usize, &str)> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut segments = Vec::new();
    let mut segment_start = 0;

    for i in 1..chars.len() {
        let (idx, ch) = chars[i];
        let prev = chars[i - 1].1;

        let acronym_end = prev.is_uppercase()
            && ch.is_uppercase()
            && chars.get(i + 1).is_some_and(|&(_, next)| next.is_lowercase());
        let word_start = prev.is_lowercase() && ch.is_uppercase();

        if acronym_end || word_start {
            segments.push((segment_start, &word[segment_start..idx]));
            segment_start = idx;
        }
    }

    if segment_start < word.len() {
        segments.push((segment_start, &word[segment_start..]));
    }

    segments
}

fn number(pieces: Vec<(usize, &str)>) -> Vec<SplitItem> {
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, (start_index, value))| SplitItem {
            value: value.to_string(),
            start_index,
            ordinal: i + 1,
        })
        .collect()
}
