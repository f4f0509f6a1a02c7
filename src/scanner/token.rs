use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

/// Value carried by string and number tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// Render a number the way Lox prints doubles: plain decimal in
/// `[1e-3, 1e7)` with at least one fractional digit, `1.0E20` style outside.
fn format_number(n: f64) -> String {
    let magnitude = n.abs();
    if !n.is_finite() || n == 0.0 || (1e-3..1e7).contains(&magnitude) {
        if n.is_finite() && n.fract() == 0.0 {
            return format!("{n:.1}");
        }
        return format!("{n}");
    }
    let sci = format!("{n:e}");
    match sci.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => sci,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Option<Literal>) -> Self {
        self.literal = literal;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {literal}", self.kind, self.lexeme),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    match ident {
        "and" => Some(TokenKind::And),
        "class" => Some(TokenKind::Class),
        "else" => Some(TokenKind::Else),
        "false" => Some(TokenKind::False),
        "fun" => Some(TokenKind::Fun),
        "for" => Some(TokenKind::For),
        "if" => Some(TokenKind::If),
        "nil" => Some(TokenKind::Nil),
        "or" => Some(TokenKind::Or),
        "print" => Some(TokenKind::Print),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "this" => Some(TokenKind::This),
        "true" => Some(TokenKind::True),
        "var" => Some(TokenKind::Var),
        "while" => Some(TokenKind::While),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_screaming_snake_case() {
        assert_eq!(TokenKind::LeftParen.to_string(), "LEFT_PAREN");
        assert_eq!(TokenKind::BangEqual.to_string(), "BANG_EQUAL");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn display_without_literal() {
        let token = Token::new(TokenKind::LeftParen, "(", 1, Span::new(0, 1));
        assert_eq!(token.to_string(), "LEFT_PAREN ( null");
    }

    #[test]
    fn display_eof() {
        let token = Token::new(TokenKind::Eof, "", 3, Span::new(10, 0));
        assert_eq!(token.to_string(), "EOF  null");
    }

    #[test]
    fn display_number_literal() {
        let whole = Token::new(TokenKind::Number, "1", 1, Span::new(0, 1))
            .with_literal(Some(Literal::Number(1.0)));
        assert_eq!(whole.to_string(), "NUMBER 1 1.0");

        let frac = Token::new(TokenKind::Number, "2.5", 1, Span::new(0, 3))
            .with_literal(Some(Literal::Number(2.5)));
        assert_eq!(frac.to_string(), "NUMBER 2.5 2.5");
    }

    #[rstest::rstest]
    #[case(0.0, "0.0")]
    #[case(0.001, "0.001")]
    #[case(9_999_999.0, "9999999.0")]
    #[case(1e7, "1.0E7")]
    #[case(1.5e20, "1.5E20")]
    #[case(1e20, "1.0E20")]
    #[case(0.0001, "1.0E-4")]
    fn number_literal_matches_double_printing(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(Literal::Number(value).to_string(), expected);
    }

    #[test]
    fn display_string_literal() {
        let token = Token::new(TokenKind::String, "\"hi\"", 1, Span::new(0, 4))
            .with_literal(Some(Literal::String("hi".to_string())));
        assert_eq!(token.to_string(), "STRING \"hi\" hi");
    }

    #[test]
    fn serializes_to_json() {
        let token = Token::new(TokenKind::Number, "2", 4, Span::new(7, 1))
            .with_literal(Some(Literal::Number(2.0)));
        let json = serde_json::to_value(&token).expect("token should serialize");
        assert_eq!(json["kind"], "NUMBER");
        assert_eq!(json["lexeme"], "2");
        assert_eq!(json["literal"], 2.0);
        assert_eq!(json["line"], 4);
        assert_eq!(json["span"]["offset"], 7);
    }

    #[test]
    fn keywords_are_reserved() {
        assert_eq!(keyword_kind("while"), Some(TokenKind::While));
        assert_eq!(keyword_kind("whilst"), None);
    }
}
