use crate::cancel::CancellationToken;
use crate::checker::casing::TextCasing;
use crate::checker::dictionary::FuzzyIndex;
use crate::dict::{FixList, SpellingData, SpellingFix, SpellingFixKind, WordComparer, WordList};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tuning for the fuzzy search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    /// Shorter words are never fuzzy-matched; they produce too many near misses.
    pub min_length: usize,
    /// One allowed edit per this many chars.
    pub chars_per_edit: usize,
    pub max_distance: usize,
    pub max_candidates: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            min_length: 8,
            chars_per_edit: 4,
            max_distance: 3,
            max_candidates: 5,
        }
    }
}

impl FuzzyOptions {
    /// Edit-distance bound for a word of `len` chars.
    pub fn bound_for(&self, len: usize) -> usize {
        (len / self.chars_per_edit.max(1)).clamp(1, self.max_distance.max(1))
    }
}

/// Output of a synthesis run.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    pub fixes: FixList,
    /// Words with no candidate, kept for human review.
    pub new_words: WordList,
}

/// Proposes corrections for words already known to be misspelled.
pub struct FixSynthesizer<'a> {
    data: &'a SpellingData,
    index: FuzzyIndex,
    options: FuzzyOptions,
}

impl<'a> FixSynthesizer<'a> {
    pub fn new(data: &'a SpellingData, options: FuzzyOptions) -> Result<Self> {
        let index = FuzzyIndex::build(data.dictionary())?;
        Ok(Self {
            data,
            index,
            options,
        })
    }

    /// Dictionary words reachable by transposing one adjacent pair.
    pub fn swap_matches(&self, word: &str) -> Vec<SpellingFix> {
        let casing = TextCasing::of(word);
        let chars: Vec<char> = word.to_lowercase().chars().collect();
        let mut fixes: Vec<SpellingFix> = Vec::new();

        for i in 0..chars.len().saturating_sub(1) {
            if chars[i] == chars[i + 1] {
                continue;
            }

            let mut swapped = chars.clone();
            swapped.swap(i, i + 1);
            let candidate: String = swapped.into_iter().collect();

            if self.data.dictionary().contains(&candidate) {
                let fix = SpellingFix::new(casing.apply(&candidate), SpellingFixKind::Swap);
                if !fixes.iter().any(|f| f.same_as(&fix)) {
                    fixes.push(fix);
                }
            }
        }

        fixes
    }

    /// Dictionary words within the length-scaled edit distance, best first.
    ///
    /// Empty for words shorter than [`FuzzyOptions::min_length`].
    pub fn fuzzy_matches(&self, word: &str, cancel: &CancellationToken) -> Vec<SpellingFix> {
        let len = word.chars().count();
        if len < self.options.min_length {
            return Vec::new();
        }

        let bound = self.options.bound_for(len);
        let mut candidates = self.index.search(word, bound, cancel);
        candidates.sort_by(|(a, da), (b, db)| {
            da.cmp(db)
                .then_with(|| {
                    let la = a.chars().count().abs_diff(len);
                    let lb = b.chars().count().abs_diff(len);
                    la.cmp(&lb)
                })
                .then_with(|| a.cmp(b))
        });
        candidates.truncate(self.options.max_candidates);

        let casing = TextCasing::of(word);
        candidates
            .into_iter()
            .map(|(value, _)| SpellingFix::new(casing.apply(&value), SpellingFixKind::Fuzzy))
            .collect()
    }

    /// Swap matches, or fuzzy matches when there are none.
    pub fn suggest(&self, word: &str, cancel: &CancellationToken) -> Vec<SpellingFix> {
        let swaps = self.swap_matches(word);
        if !swaps.is_empty() {
            return swaps;
        }
        self.fuzzy_matches(word, cancel)
    }

    /// Build fixes for `words`. Words that are known, or already have a fix, are skipped.
    pub fn synthesize<I, S>(&self, words: I, cancel: &CancellationToken) -> Result<Synthesis>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fixes = FixList::new();
        let mut unresolved = Vec::new();

        for word in words {
            cancel.check()?;

            let word = word.as_ref().trim();
            if word.is_empty() || self.data.contains(word) || self.data.fixes().contains_key(word) {
                continue;
            }

            let suggestions = self.suggest(word, cancel);
            if suggestions.is_empty() {
                debug!(word, "no fix found");
                unresolved.push(word.to_string());
            }
            for fix in suggestions {
                fixes = fixes.with_fix(word, fix);
            }
        }
        cancel.check()?;

        info!(
            fixes = fixes.len(),
            new_words = unresolved.len(),
            "synthesized fixes"
        );

        Ok(Synthesis {
            fixes,
            new_words: WordList::from_words("new-words", WordComparer::IgnoreCase, unresolved),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn data(words: &[&str]) -> SpellingData {
        SpellingData::default()
            .with_dictionary(WordList::from_words("d", WordComparer::IgnoreCase, words))
    }

    #[test]
    fn test_swap_match() {
        let data = data(&["hello"]);
        let synth = FixSynthesizer::new(&data, FuzzyOptions::default()).unwrap();

        assert_eq!(
            synth.swap_matches("ehllo"),
            vec![SpellingFix::new("hello", SpellingFixKind::Swap)]
        );
        assert_eq!(synth.swap_matches("Ehllo")[0].value, "Hello");
        assert!(synth.swap_matches("hlelo").len() == 1);
        assert!(synth.swap_matches("hxllo").is_empty());
    }

    #[test]
    fn test_fuzzy_match_for_long_words() {
        let data = data(&["receiving", "receive"]);
        let synth = FixSynthesizer::new(&data, FuzzyOptions::default()).unwrap();

        let fixes = synth.suggest("recieveing", &CancellationToken::new());
        assert_eq!(fixes, vec![SpellingFix::new("receiving", SpellingFixKind::Fuzzy)]);
    }

    #[test]
    fn test_short_words_skip_fuzzy_search() {
        let data = data(&["receive"]);
        let synth = FixSynthesizer::new(&data, FuzzyOptions::default()).unwrap();

        assert!(synth.fuzzy_matches("recive", &CancellationToken::new()).is_empty());

        let outcome = synth
            .synthesize(["recive"], &CancellationToken::new())
            .unwrap();
        assert!(outcome.fixes.is_empty());
        assert!(outcome.new_words.contains("recive"));
    }

    #[test]
    fn test_synthesize_records_kinds_and_skips_known() {
        let data = data(&["hello", "receiving"])
            .with_fixes(FixList::new().with_fix("wrold", SpellingFix::new("world", SpellingFixKind::Predefined)));
        let synth = FixSynthesizer::new(&data, FuzzyOptions::default()).unwrap();

        let outcome = synth
            .synthesize(["ehllo", "recieveing", "hello", "wrold", "zzqx"], &CancellationToken::new())
            .unwrap();

        assert_eq!(outcome.fixes.len(), 2);
        assert_eq!(outcome.fixes.get("ehllo").unwrap()[0].kind, SpellingFixKind::Swap);
        assert_eq!(outcome.fixes.get("recieveing").unwrap()[0].kind, SpellingFixKind::Fuzzy);
        assert!(!outcome.fixes.contains_key("wrold"));
        assert_eq!(outcome.new_words.values().collect::<Vec<_>>(), vec!["zzqx"]);
    }

    #[test]
    fn test_synthesize_honors_cancellation() {
        let data = data(&["hello"]);
        let synth = FixSynthesizer::new(&data, FuzzyOptions::default()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(matches!(
            synth.synthesize(["ehllo"], &cancel),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_bound_scales_with_length() {
        let options = FuzzyOptions::default();
        assert_eq!(options.bound_for(3), 1);
        assert_eq!(options.bound_for(8), 2);
        assert_eq!(options.bound_for(10), 2);
        assert_eq!(options.bound_for(40), 3);
    }
}
