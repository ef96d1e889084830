use idspell::checker::nonsense::is_nonsense;
use idspell::checker::segmenter::split_identifier;
use idspell::checker::suggestions::{FixSynthesizer, FuzzyOptions};
use idspell::dict::{FixList, SaveMode, SpellingData, SpellingFix, SpellingFixKind, WordComparer, WordList};
use idspell::{analyze_token, AnalysisOptions, CancellationToken, SourceSpan, SpellChecker, TokenKind};
use std::path::Path;
use tempfile::tempdir;

fn list(words: &[&str]) -> WordList {
    WordList::from_words("test", WordComparer::IgnoreCase, words)
}

fn data(words: &[&str]) -> SpellingData {
    SpellingData::default().with_dictionary(list(words))
}

fn analyze(text: &str, data: &SpellingData) -> Vec<idspell::SpellingDiagnostic> {
    analyze_token(
        text,
        TokenKind::Identifier,
        &SourceSpan::new(Path::new("src/main.rs"), 1, 1, 0),
        data,
        &AnalysisOptions::default(),
        &CancellationToken::new(),
    )
    .unwrap()
}

#[test]
fn misspelled_identifier_is_flagged() {
    let diags = analyze("lenght", &data(&["length", "count"]));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].value, "lenght");
    assert!(diags[0].fixes.is_empty());
}

#[test]
fn fix_is_attached_without_suppressing() {
    let data = data(&["length", "count"]).with_fixes(
        FixList::new().with_fix("lenght", SpellingFix::new("length", SpellingFixKind::Predefined)),
    );
    let diags = analyze("lenght", &data);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].value, "lenght");
    assert_eq!(diags[0].fixes[0].value, "length");
}

#[test]
fn short_identifiers_are_skipped() {
    assert!(analyze("x1", &data(&[])).is_empty());
}

#[test]
fn identifier_segmentation() {
    let values = |s: &str| -> Vec<String> {
        split_identifier(s).into_iter().map(|i| i.value).collect()
    };
    assert_eq!(values("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
    assert_eq!(values("fooBarBaz"), vec!["foo", "Bar", "Baz"]);
}

#[test]
fn nonsense_filter() {
    for word in ["abc", "ABC", "Abc", "aabbcc", "xxxx"] {
        assert!(is_nonsense(word), "{word} should be filtered");
    }
    for word in ["abd", "xyab"] {
        assert!(!is_nonsense(word), "{word} should not be filtered");
    }
}

#[test]
fn swap_and_fuzzy_synthesis() {
    let cancel = CancellationToken::new();

    let hello = data(&["hello"]);
    let synth = FixSynthesizer::new(&hello, FuzzyOptions::default()).unwrap();
    assert_eq!(synth.suggest("ehllo", &cancel)[0].value, "hello");

    let receiving = data(&["receiving"]);
    let synth = FixSynthesizer::new(&receiving, FuzzyOptions::default()).unwrap();
    assert_eq!(synth.suggest("recieveing", &cancel)[0].value, "receiving");

    let outcome = synth.synthesize(["recievd"], &cancel).unwrap();
    assert!(outcome.fixes.is_empty());
    assert!(outcome.new_words.contains("recievd"));
}

#[test]
fn word_list_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.txt");
    let words = list(&["parser", " token ", "Buffer", "parser"]);

    words.save(&path, SaveMode::Overwrite).unwrap();
    let loaded = WordList::load(&path, WordComparer::IgnoreCase).unwrap();

    assert_eq!(loaded, words);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "buffer\nparser\ntoken\n");
}

#[test]
fn set_algebra_laws() {
    let a = list(&["alpha", "beta", "gamma", "delta"]);
    let b = list(&["BETA", "delta", "epsilon"]);

    let once = a.except(&[&b]);
    assert_eq!(once.except(&[&b]), once);

    let once = a.intersect(&[&b]);
    assert_eq!(once.intersect(&[&b]), once);

    let union = a.add_values(&[&b]);
    assert!(a.values().chain(b.values()).all(|w| union.contains(w)));
}

#[test]
fn checker_over_a_source_file() {
    let checker = SpellChecker::new(
        data(&["count", "length", "compute", "the", "of", "items", "len"]),
        AnalysisOptions::default(),
    );
    let source = "/// Compute the lenght of `itemCount`.\nfn compute_length(items: &[u8]) -> usize {\n    items.len()\n}\n";

    let result = checker
        .check_source(Path::new("lib.rs"), source, &CancellationToken::new())
        .unwrap();
    let flagged: Vec<(&str, usize, usize)> = result
        .diagnostics
        .iter()
        .map(|d| (d.value.as_str(), d.location.line, d.location.column))
        .collect();

    assert_eq!(flagged, vec![("lenght", 1, 17), ("item", 1, 28)]);
}
