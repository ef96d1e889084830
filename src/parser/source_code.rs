use crate::checker::diagnostic::SourceSpan;
use crate::checker::TokenKind;
use crate::parser::{CommentStyle, Token};
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

lazy_static! {
    static ref KEYWORDS: HashSet<&'static str> = [
        // Rust
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "fn", "for", "if", "in", "mod", "int",
        "extern", "false", "true", "impl", "loop", "match", "move", "mut", "pub", "ref",
        "return", "self", "Self", "static", "struct", "super", "trait", "type", "unsafe",
        "use", "where", "while", "usize", "isize", "Some", "None", "Ok", "Err", "println",
        // C family, Java, C#, Go, JS
        "auto", "bool", "case", "catch", "char", "class", "default", "delete", "double",
        "export", "extends", "final", "finally", "float", "func", "implements", "import",
        "interface", "long", "namespace", "new", "null", "package", "private", "protected",
        "public", "short", "signed", "sizeof", "switch", "template", "this", "throw",
        "throws", "typedef", "typename", "typeof", "undefined", "unsigned", "virtual", "void",
        "volatile", "override", "readonly", "instanceof", "function", "defer", "chan",
        "select", "string",
        // Python, Ruby, shell
        "def", "elif", "except", "from", "global", "lambda", "nonlocal", "pass", "raise",
        "with", "yield", "True", "False", "elsif", "unless", "until", "begin",
        "rescue", "ensure", "then", "done", "esac", "local", "and", "not", "or", "is", "end",
        "nil", "do", "try",
    ]
    .into_iter()
    .collect();
}

/// Keywords that introduce a local binding.
const LOCAL_BINDINGS: &[&str] = &["let", "var", "auto"];

pub fn tokenize(content: &str, style: CommentStyle, path: Arc<Path>, generated: bool) -> Vec<Token> {
    let mut scanner = Scanner {
        src: content,
        pos: 0,
        line: 1,
        column: 1,
        path,
        generated,
        binding: false,
        tokens: Vec::new(),
    };
    scanner.run(style);
    scanner.tokens
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    path: Arc<Path>,
    generated: bool,
    /// The previous word was a local-binding keyword.
    binding: bool,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn run(&mut self, style: CommentStyle) {
        while let Some(ch) = self.peek(0) {
            match style {
                CommentStyle::CStyle if self.rest().starts_with("///") || self.rest().starts_with("//!") => {
                    self.line_comment(3, TokenKind::DocComment)
                }
                CommentStyle::CStyle if self.rest().starts_with("//") => {
                    self.line_comment(2, TokenKind::Comment)
                }
                CommentStyle::CStyle if self.rest().starts_with("/*") => self.block_comment(),
                CommentStyle::Hash if ch == '#' => self.line_comment(1, TokenKind::Comment),
                CommentStyle::Hash if self.rest().starts_with("\"\"\"") => self.doc_string("\"\"\""),
                CommentStyle::Hash if self.rest().starts_with("'''") => self.doc_string("'''"),
                _ => self.code(ch, style),
            }
        }
    }

    fn code(&mut self, ch: char, style: CommentStyle) {
        if ch == '"' || ch == '`' {
            self.binding = false;
            self.string(ch);
        } else if ch == '\'' {
            self.binding = false;
            let is_char_literal = self.peek(1) == Some('\\') || self.peek(2) == Some('\'');
            if style == CommentStyle::Hash || is_char_literal {
                self.string(ch);
            } else {
                // lifetime or label
                self.bump();
            }
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            self.identifier();
        } else if ch.is_ascii_digit() {
            self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        } else {
            if !ch.is_whitespace() {
                self.binding = false;
            }
            self.bump();
        }
    }

    fn identifier(&mut self) {
        let span = self.span();
        let text = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');

        if LOCAL_BINDINGS.contains(&text) {
            self.binding = true;
            return;
        }
        if text == "mut" && self.binding {
            return;
        }
        if KEYWORDS.contains(text) {
            self.binding = false;
            return;
        }

        let kind = if self.binding {
            TokenKind::LocalIdentifier
        } else {
            TokenKind::Identifier
        };
        self.binding = false;
        self.push(text, kind, span);
    }

    fn line_comment(&mut self, marker_len: usize, kind: TokenKind) {
        self.advance(marker_len);
        let span = self.span();
        let text = self.take_while(|c| c != '\n');
        self.comment(text, kind, span);
    }

    fn block_comment(&mut self) {
        let is_doc = self.rest().starts_with("/**") && !self.rest().starts_with("/**/");
        self.advance(2);
        self.close_block("*/", if is_doc { TokenKind::DocComment } else { TokenKind::Comment });
    }

    fn doc_string(&mut self, quotes: &str) {
        self.advance(3);
        self.close_block(quotes, TokenKind::DocComment);
    }

    fn close_block(&mut self, terminator: &str, kind: TokenKind) {
        let span = self.span();
        let start = self.pos;
        let end = self.rest().find(terminator).map_or(self.src.len(), |i| start + i);
        self.advance_to(end);
        let src = self.src;
        let text = &src[start..end];
        self.comment(text, kind, span);
        if self.rest().starts_with(terminator) {
            self.advance(terminator.chars().count());
        }
    }

    /// Emit comment text, splitting out backtick spans as inline code.
    fn comment(&mut self, text: &'a str, kind: TokenKind, span: SourceSpan) {
        let mut offset = 0;
        for (i, segment) in text.split('`').enumerate() {
            let segment_kind = if i % 2 == 1 { TokenKind::InlineCode } else { kind };
            if !segment.trim().is_empty() {
                self.push(segment, segment_kind, span.advance(text, offset));
            }
            offset += segment.len() + 1;
        }
    }

    fn string(&mut self, quote: char) {
        self.bump();
        while let Some(ch) = self.bump() {
            match ch {
                '\\' => {
                    self.bump();
                }
                c if c == quote => break,
                '\n' if quote != '`' => break,
                _ => {}
            }
        }
    }

    fn push(&mut self, text: &str, kind: TokenKind, span: SourceSpan) {
        self.tokens.push(Token {
            text: text.to_string(),
            kind,
            span,
        });
    }

    fn span(&self) -> SourceSpan {
        SourceSpan::new(Arc::clone(&self.path), self.line, self.column, self.pos)
            .in_generated_code(self.generated)
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek(0)?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn advance(&mut self, chars: usize) {
        for _ in 0..chars {
            self.bump();
        }
    }

    fn advance_to(&mut self, end: usize) {
        while self.pos < end && self.bump().is_some() {}
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek(0).is_some_and(&pred) {
            self.bump();
        }
        let src = self.src;
        &src[start..self.pos]
    }
}
