//! Word-form generation used when building dictionaries offline.
//!
//! Generation over-produces on purpose: the output is meant to be intersected with a
//! reference list before it is added to a dictionary.

use crate::dict::word_list::WordList;

/// Shortest base word (and generated word) that is kept.
pub const MIN_WORD_LENGTH: usize = 3;

pub const PREFIXES: &[&str] = &[
    "anti", "auto", "co", "counter", "de", "dis", "en", "extra", "hyper", "in", "inter",
    "intra", "macro", "micro", "mid", "mis", "multi", "non", "over", "post", "pre", "pro",
    "pseudo", "re", "semi", "sub", "super", "trans", "un", "under",
];

/// Prefixed forms of `word`, e.g. `build` -> `rebuild`, `prebuild`, ...
pub fn generate_prefixes(word: &str) -> Vec<String> {
    let word = word.trim();
    if word.chars().count() < MIN_WORD_LENGTH {
        return Vec::new();
    }

    let lower = word.to_lowercase();
    PREFIXES
        .iter()
        .map(|prefix| format!("{}{}", prefix, lower))
        .filter(|w| w.chars().count() >= MIN_WORD_LENGTH)
        .collect()
}

/// Plural forms of `word`.
///
/// Latin and Greek endings (`us`, `is`, `on`) yield both the classical and the
/// regular plural.
pub fn generate_suffixes(word: &str) -> Vec<String> {
    let word = word.trim().to_lowercase();
    if word.chars().count() < MIN_WORD_LENGTH {
        return Vec::new();
    }

    let mut forms = Vec::new();

    if let Some(stem) = word.strip_suffix("us") {
        forms.push(format!("{}i", stem));
    } else if let Some(stem) = word.strip_suffix("is") {
        forms.push(format!("{}es", stem));
    } else if let Some(stem) = word.strip_suffix("on") {
        forms.push(format!("{}a", stem));
    }

    let regular = if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|ending| word.ends_with(ending))
    {
        format!("{}es", word)
    } else if let Some(stem) = word.strip_suffix('y').filter(|stem| ends_with_consonant(stem)) {
        format!("{}ies", stem)
    } else {
        format!("{}s", word)
    };
    forms.push(regular);

    forms.retain(|w| w.chars().count() >= MIN_WORD_LENGTH);
    forms.dedup();
    forms
}

/// Prefixed forms for every word of `list`, as a list with the same comparer.
pub fn prefixed_forms(list: &WordList) -> WordList {
    WordList::new(format!("{}.prefixed", list.name()), list.comparer())
        .with_values(list.values().flat_map(generate_prefixes))
}

/// Plural forms for every word of `list`, as a list with the same comparer.
pub fn suffixed_forms(list: &WordList) -> WordList {
    WordList::new(format!("{}.suffixed", list.name()), list.comparer())
        .with_values(list.values().flat_map(generate_suffixes))
}

fn ends_with_consonant(stem: &str) -> bool {
    stem.chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic() && !"aeiou".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::word_list::WordComparer;

    #[test]
    fn test_prefixes() {
        let forms = generate_prefixes("Build");
        assert!(forms.contains(&"rebuild".to_string()));
        assert!(forms.contains(&"prebuild".to_string()));
        assert_eq!(forms.len(), PREFIXES.len());
    }

    #[test]
    fn test_short_words_are_ignored() {
        assert!(generate_prefixes("go").is_empty());
        assert!(generate_suffixes("id").is_empty());
    }

    #[test]
    fn test_plural_heuristics() {
        assert_eq!(generate_suffixes("box"), vec!["boxes"]);
        assert_eq!(generate_suffixes("match"), vec!["matches"]);
        assert_eq!(generate_suffixes("query"), vec!["queries"]);
        assert_eq!(generate_suffixes("key"), vec!["keys"]);
        assert_eq!(generate_suffixes("token"), vec!["tokens"]);
    }

    #[test]
    fn test_classical_plurals() {
        assert_eq!(generate_suffixes("radius"), vec!["radii", "radiuses"]);
        assert_eq!(generate_suffixes("axis"), vec!["axes", "axises"]);
        assert_eq!(generate_suffixes("criterion"), vec!["criteria", "criterions"]);
    }

    #[test]
    fn test_list_forms() {
        let base = WordList::from_words("base", WordComparer::IgnoreCase, ["file", "it"]);
        let plurals = suffixed_forms(&base);
        assert_eq!(plurals.values().collect::<Vec<_>>(), vec!["files"]);
        assert_eq!(plurals.name(), "base.suffixed");

        let prefixed = prefixed_forms(&base);
        assert!(prefixed.contains("refile"));
        assert!(!prefixed.contains("reit"));
    }
}
