pub mod source_code;

use crate::checker::diagnostic::SourceSpan;
use crate::checker::TokenKind;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Lines searched for a generated-code marker.
const GENERATED_HEADER_LINES: usize = 5;
const GENERATED_MARKERS: &[&str] = &["@generated", "<auto-generated", "DO NOT EDIT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Jsx,
    Tsx,
    Ruby,
    Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `//`, `/* */`, with `///`, `//!` and `/** */` as doc comments.
    CStyle,
    /// `#`, with `"""` blocks as doc text.
    Hash,
}

impl SourceLang {
    /// Detect language from extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let lang = match ext.as_str() {
            "rs" => SourceLang::Rust,
            "js" | "mjs" | "cjs" => SourceLang::JavaScript,
            "ts" | "mts" | "cts" => SourceLang::TypeScript,
            "jsx" => SourceLang::Jsx,
            "tsx" => SourceLang::Tsx,
            "py" | "pyw" => SourceLang::Python,
            "go" => SourceLang::Go,
            "java" => SourceLang::Java,
            "c" | "h" => SourceLang::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => SourceLang::Cpp,
            "cs" => SourceLang::CSharp,
            "rb" => SourceLang::Ruby,
            "sh" | "bash" | "zsh" => SourceLang::Shell,
            _ => return None,
        };
        Some(lang)
    }

    pub fn comment_style(self) -> CommentStyle {
        match self {
            SourceLang::Python | SourceLang::Ruby | SourceLang::Shell => CommentStyle::Hash,
            _ => CommentStyle::CStyle,
        }
    }
}

/// A checkable piece of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub span: SourceSpan,
}

/// Extract identifier, comment and inline-code tokens from a source file.
///
/// Unsupported file types yield no tokens.
pub fn tokenize(path: &Path, content: &str) -> Vec<Token> {
    let Some(lang) = SourceLang::from_path(path) else {
        return Vec::new();
    };

    let path: Arc<Path> = Arc::from(path);
    source_code::tokenize(content, lang.comment_style(), path, is_generated(content))
}

/// True when the file header carries a generated-code marker.
pub fn is_generated(content: &str) -> bool {
    content
        .lines()
        .take(GENERATED_HEADER_LINES)
        .any(|line| GENERATED_MARKERS.iter().any(|marker| line.contains(marker)))
}

/// Supported source files under `paths`, sorted. Directories are walked honoring
/// `.gitignore`.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                    if is_file && SourceLang::from_path(entry.path()).is_some() {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => warn!(error = %err, "skipping unreadable path"),
            }
        }
    }

    files.sort();
    files.dedup();
    files
}
