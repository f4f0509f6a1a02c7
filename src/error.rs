use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Span;

// ============= Scan errors (with miette diagnostics) =============

/// What went wrong while recognising a lexeme.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),

    #[error("Unterminated string.")]
    UnterminatedString,
}

/// A lexical error. Displays in the `[line N] Error<location>: <message>` shape.
#[derive(Error, Debug, Diagnostic)]
#[error("[line {line}] Error{location}: {kind}")]
#[diagnostic(code(lox::scan))]
pub struct ScanError {
    pub line: usize,
    pub location: String,
    pub kind: ScanErrorKind,
    #[label("here")]
    pub span: SourceSpan,
    #[source_code]
    src: miette::NamedSource<String>,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, line: usize, span: Span) -> Self {
        Self {
            line,
            location: String::new(),
            kind,
            span: span.into(),
            src: miette::NamedSource::new("input", String::new()),
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            src: miette::NamedSource::new(name.into(), source.into()),
            ..self
        }
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}

// ============= Tests =============
