pub mod casing;
pub mod diagnostic;
pub mod dictionary;
pub mod distance;
pub mod nonsense;
pub mod segmenter;
pub mod suggestions;

use crate::cancel::CancellationToken;
use crate::dict::{SpellingData, SpellingFix};
use crate::error::{Error, Result};
use crate::{parser, CheckResult};
use casing::TextCasing;
use diagnostic::{IdentifierRef, SourceSpan, SpellingDiagnostic, DEFAULT_CULTURE};
use rayon::prelude::*;
use regex::Regex;
use segmenter::{
    should_skip_identifier, split_identifier, split_prose, strip_contraction,
    strip_identifier_prefix,
};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    r"\b[A-Z0-9_]{2,}\b",                              // ALL_CAPS
    r"https?://\S+",                                   // URLs
    r"\b[a-fA-F0-9]{32,}\b",                           // Hashes
    r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}", // Emails
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    /// An identifier bound by `let`, `var` or `auto`.
    LocalIdentifier,
    Comment,
    DocComment,
    /// A backtick span inside a comment.
    InlineCode,
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub include_local_identifiers: bool,
    pub include_generated_code: bool,
    pub culture: String,
    /// Identifier items shorter than this are not checked.
    pub min_word_length: usize,
    /// Masked out of comment, doc and inline-code text. Identifiers are not matched.
    pub ignore_patterns: Vec<Regex>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_local_identifiers: false,
            include_generated_code: false,
            culture: DEFAULT_CULTURE.to_string(),
            min_word_length: 3,
            ignore_patterns: compile_patterns(DEFAULT_IGNORE_PATTERNS),
        }
    }
}

impl AnalysisOptions {
    /// Replace the ignore patterns. Invalid regexes are skipped with a warning.
    pub fn with_ignore_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.ignore_patterns = compile_patterns(patterns);
        self
    }

    /// Blank out pattern matches, keeping byte offsets intact.
    fn mask<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut masked = Cow::Borrowed(text);
        for re in &self.ignore_patterns {
            if re.is_match(&masked) {
                let replaced = re
                    .replace_all(&masked, |caps: &regex::Captures| " ".repeat(caps[0].len()))
                    .into_owned();
                masked = Cow::Owned(replaced);
            }
        }
        masked
    }
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        match Regex::new(pattern) {
            Ok(re) => compiled.push(re),
            Err(e) => warn!(pattern, error = %e, "invalid ignore pattern"),
        }
    }
    compiled
}

/// Check one token and return a diagnostic for every unknown word in it.
///
/// Returns [`Error::Cancelled`] if `cancel` fires; partial results are dropped.
pub fn analyze_token(
    text: &str,
    kind: TokenKind,
    span: &SourceSpan,
    data: &SpellingData,
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Result<Vec<SpellingDiagnostic>> {
    if span.generated && !options.include_generated_code {
        return Ok(Vec::new());
    }

    match kind {
        TokenKind::LocalIdentifier if !options.include_local_identifiers => Ok(Vec::new()),
        TokenKind::Identifier | TokenKind::LocalIdentifier => {
            analyze_identifier(text, kind, span, data, options, cancel)
        }
        TokenKind::Comment | TokenKind::DocComment | TokenKind::InlineCode => {
            analyze_prose(text, kind, span, data, options, cancel)
        }
    }
}

fn analyze_identifier(
    text: &str,
    kind: TokenKind,
    span: &SourceSpan,
    data: &SpellingData,
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Result<Vec<SpellingDiagnostic>> {
    if should_skip_identifier(text) || data.contains(text) {
        return Ok(Vec::new());
    }

    let identifier = IdentifierRef {
        name: text.to_string(),
        span: span.clone(),
        local: kind == TokenKind::LocalIdentifier,
    };
    let (prefix_len, rest) = strip_identifier_prefix(text);
    let mut diagnostics = Vec::new();

    for item in split_identifier(rest) {
        cancel.check()?;

        let value = item.value.as_str();
        if value.chars().count() < options.min_word_length
            || nonsense::is_nonsense(value)
            || data.contains(value)
        {
            continue;
        }

        let index = prefix_len + item.start_index;
        let fixes = recased_fixes(data, value, None);
        diagnostics.push(SpellingDiagnostic {
            value: item.value,
            containing_value: text.to_string(),
            location: span.advance(text, index),
            index,
            identifier: Some(identifier.clone()),
            fixes,
        });
    }

    Ok(diagnostics)
}

fn analyze_prose(
    text: &str,
    kind: TokenKind,
    span: &SourceSpan,
    data: &SpellingData,
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Result<Vec<SpellingDiagnostic>> {
    let masked = options.mask(text);
    let mut diagnostics = Vec::new();

    for item in split_prose(&masked, kind == TokenKind::InlineCode) {
        cancel.check()?;

        let value = item.value.as_str();
        let root = strip_contraction(value);
        if data.contains(value)
            || root.is_some_and(|r| data.contains(r))
            || nonsense::is_nonsense(value)
        {
            continue;
        }

        let fixes = recased_fixes(data, value, root);
        diagnostics.push(SpellingDiagnostic {
            location: span.advance(text, item.start_index),
            index: item.start_index,
            containing_value: text.to_string(),
            identifier: None,
            fixes,
            value: item.value,
        });
    }

    Ok(diagnostics)
}

fn recased_fixes(data: &SpellingData, value: &str, root: Option<&str>) -> Vec<SpellingFix> {
    let mut fixes = data.fixes_for(value);
    if fixes.is_empty() {
        if let Some(root) = root {
            fixes = data.fixes_for(root);
        }
    }

    let casing = TextCasing::of(value);
    fixes
        .iter()
        .map(|fix| SpellingFix::new(casing.apply(&fix.value), fix.kind))
        .collect()
}

/// Checks source files against one [`SpellingData`] snapshot.
pub struct SpellChecker {
    data: SpellingData,
    options: AnalysisOptions,
}

impl SpellChecker {
    pub fn new(data: SpellingData, options: AnalysisOptions) -> Self {
        Self { data, options }
    }

    pub fn data(&self) -> &SpellingData {
        &self.data
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Tokenize `content` as the file at `path` and analyze every token.
    pub fn check_source(
        &self,
        path: &Path,
        content: &str,
        cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        let tokens = parser::tokenize(path, content);
        let mut diagnostics = Vec::new();

        for token in &tokens {
            diagnostics.extend(analyze_token(
                &token.text,
                token.kind,
                &token.span,
                &self.data,
                &self.options,
                cancel,
            )?);
        }

        debug!(
            path = %path.display(),
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "checked file"
        );

        Ok(CheckResult {
            path: path.to_path_buf(),
            diagnostics,
        })
    }

    pub fn check_file(&self, path: &Path, cancel: &CancellationToken) -> Result<CheckResult> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.check_source(path, &content, cancel)
    }

    /// Check every supported file under `paths` in parallel. Results keep file order.
    pub fn check_paths(
        &self,
        paths: &[PathBuf],
        cancel: &CancellationToken,
    ) -> Result<Vec<CheckResult>> {
        let files = parser::collect_files(paths);
        info!(files = files.len(), "checking files");

        files
            .par_iter()
            .map(|file| self.check_file(file, cancel))
            .collect()
    }
}
