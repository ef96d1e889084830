use crate::dict::SpellingFix;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_CULTURE: &str = "en-US";

// (language, message lead) pairs.
const MESSAGES: &[(&str, &str)] = &[("en", "Fix spelling of")];

/// Position of a token or word in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub path: Arc<Path>,
    /// 1-based.
    pub line: usize,
    /// 1-based, in chars.
    pub column: usize,
    /// Byte offset in the file.
    pub offset: usize,
    pub generated: bool,
}

impl SourceSpan {
    pub fn new(path: impl Into<Arc<Path>>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            path: path.into(),
            line,
            column,
            offset,
            generated: false,
        }
    }

    pub fn in_generated_code(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// Span of the position `index` bytes into `text`, where `text` starts at `self`.
    pub fn advance(&self, text: &str, index: usize) -> SourceSpan {
        let before = &text[..index];
        let (line, column) = match before.rfind('\n') {
            Some(newline) => (
                self.line + before.matches('\n').count(),
                before[newline + 1..].chars().count() + 1,
            ),
            None => (self.line, self.column + before.chars().count()),
        };

        SourceSpan {
            path: Arc::clone(&self.path),
            line,
            column,
            offset: self.offset + index,
            generated: self.generated,
        }
    }
}

/// The identifier token a diagnostic came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRef {
    pub name: String,
    pub span: SourceSpan,
    pub local: bool,
}

/// A flagged word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingDiagnostic {
    pub value: String,
    /// The unsplit token the word was cut from.
    pub containing_value: String,
    pub location: SourceSpan,
    /// Byte index of the word within the token.
    pub index: usize,
    pub identifier: Option<IdentifierRef>,
    /// Known corrections, recased to match `value`.
    pub fixes: Vec<SpellingFix>,
}

impl SpellingDiagnostic {
    /// `"<path>(<line>,<col>): Fix spelling of '<value>'"`.
    pub fn message(&self, culture: &str) -> String {
        format!(
            "{}({},{}): {} '{}'",
            self.location.path.display(),
            self.location.line,
            self.location.column,
            message_lead(culture),
            self.value
        )
    }
}

impl fmt::Display for SpellingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(DEFAULT_CULTURE))
    }
}

fn message_lead(culture: &str) -> &'static str {
    let language = culture
        .split(|c| c == '-' || c == '_')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    MESSAGES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, lead)| *lead)
        .unwrap_or_else(|| {
            debug!(culture, "no messages for culture, using English");
            MESSAGES[0].1
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(value: &str, line: usize, column: usize) -> SpellingDiagnostic {
        SpellingDiagnostic {
            value: value.to_string(),
            containing_value: value.to_string(),
            location: SourceSpan::new(Path::new("src/lib.rs"), line, column, 0),
            index: 0,
            identifier: None,
            fixes: Vec::new(),
        }
    }

    #[test]
    fn test_message_format() {
        let d = diagnostic("lenght", 12, 5);
        assert_eq!(d.message("en-US"), "src/lib.rs(12,5): Fix spelling of 'lenght'");
        assert_eq!(d.to_string(), d.message(DEFAULT_CULTURE));
    }

    #[test]
    fn test_unknown_culture_falls_back() {
        let d = diagnostic("teh", 1, 1);
        assert_eq!(d.message("de-DE"), d.message("en"));
    }

    #[test]
    fn test_advance_within_line() {
        let span = SourceSpan::new(Path::new("a.rs"), 3, 10, 100);
        let moved = span.advance("maxLenght", 3);
        assert_eq!((moved.line, moved.column, moved.offset), (3, 13, 103));
    }

    #[test]
    fn test_advance_across_lines() {
        let span = SourceSpan::new(Path::new("a.rs"), 3, 10, 100);
        let text = "first line\n  second teh";
        let moved = span.advance(text, text.find("teh").unwrap());
        assert_eq!((moved.line, moved.column), (4, 10));
    }
}
