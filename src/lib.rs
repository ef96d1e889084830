pub mod cancel;
pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod parser;

pub use cancel::CancellationToken;
pub use checker::diagnostic::{SourceSpan, SpellingDiagnostic};
pub use checker::{analyze_token, AnalysisOptions, SpellChecker, TokenKind};
pub use config::Config;
pub use error::{Error, Result};

use std::path::PathBuf;

/// Diagnostics for one source file.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub path: PathBuf,
    pub diagnostics: Vec<SpellingDiagnostic>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}
