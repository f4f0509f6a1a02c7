pub mod lexer;
pub mod token;

use crate::error::ScanError;
use token::Token;

/// Result of one scan: every token recognised (always ending in `Eof`)
/// plus the lexical errors skipped over along the way.
#[derive(Debug)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
}

impl Scanned {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scan source code into a list of tokens.
pub fn scan(source: &str) -> Scanned {
    lexer::scan_all(source)
}
