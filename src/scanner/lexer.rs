use winnow::combinator::{alt, opt};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location};
use winnow::token::{any, take_till, take_while};

use crate::error::{ScanError, ScanErrorKind};
use crate::scanner::Scanned;
use crate::scanner::token::{Literal, Span, Token, TokenKind, keyword_kind};

type Input<'a> = LocatingSlice<&'a str>;

/// Outcome of recognising one lexeme.
#[derive(Debug)]
enum Lexed {
    Token(TokenKind, Option<Literal>),
    Invalid(ScanErrorKind),
}

fn shebang<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    ("#!", take_till(0.., '\n'), opt('\n'))
        .void()
        .parse_next(input)
}

fn whitespace_and_comments<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    loop {
        let before = input.current_token_start();
        take_while(0.., |c: char| {
            c == ' ' || c == '\t' || c == '\r' || c == '\n'
        })
        .void()
        .parse_next(input)?;

        if input.starts_with("//") {
            take_while(0.., |c: char| c != '\n')
                .void()
                .parse_next(input)?;
        } else if input.current_token_start() == before {
            break;
        }
    }
    Ok(())
}

fn string_literal<'a>(input: &mut Input<'a>) -> ModalResult<Lexed> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let Ok(c) = any::<_, ContextError>.parse_next(input) else {
            return Ok(Lexed::Invalid(ScanErrorKind::UnterminatedString));
        };
        match c {
            '"' => break,
            '\\' => {
                let Ok(esc) = any::<_, ContextError>.parse_next(input) else {
                    return Ok(Lexed::Invalid(ScanErrorKind::UnterminatedString));
                };
                match esc {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    '\\' => s.push('\\'),
                    '"' => s.push('"'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            other => s.push(other),
        }
    }
    Ok(Lexed::Token(TokenKind::String, Some(Literal::String(s))))
}

fn number_literal<'a>(input: &mut Input<'a>) -> ModalResult<Lexed> {
    let text: &str = (
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .parse_next(input)?;
    let value = str::parse::<f64>(text).ok().map(Literal::Number);
    Ok(Lexed::Token(TokenKind::Number, value))
}

fn identifier_or_keyword<'a>(input: &mut Input<'a>) -> ModalResult<Lexed> {
    let ident: &str = (
        any.verify(|c: &char| c.is_ascii_alphabetic() || *c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)?;
    let kind = keyword_kind(ident).unwrap_or(TokenKind::Identifier);
    Ok(Lexed::Token(kind, None))
}

fn two_char_token<'a>(input: &mut Input<'a>) -> ModalResult<Lexed> {
    let kind = alt((
        "!=".value(TokenKind::BangEqual),
        "==".value(TokenKind::EqualEqual),
        ">=".value(TokenKind::GreaterEqual),
        "<=".value(TokenKind::LessEqual),
    ))
    .parse_next(input)?;
    Ok(Lexed::Token(kind, None))
}

fn single_char_token<'a>(input: &mut Input<'a>) -> ModalResult<Lexed> {
    let c = any.parse_next(input)?;
    let kind = match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        '-' => TokenKind::Minus,
        '+' => TokenKind::Plus,
        ';' => TokenKind::Semicolon,
        '/' => TokenKind::Slash,
        '*' => TokenKind::Star,
        '!' => TokenKind::Bang,
        '=' => TokenKind::Equal,
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        other => return Ok(Lexed::Invalid(ScanErrorKind::UnexpectedCharacter(other))),
    };
    Ok(Lexed::Token(kind, None))
}

/// Recognise one lexeme. Only fails on empty input: the last alternative
/// accepts any character, turning unknown ones into `Lexed::Invalid`.
fn scan_token<'a>(input: &mut Input<'a>) -> ModalResult<Lexed> {
    alt((
        string_literal,
        number_literal,
        identifier_or_keyword,
        two_char_token,
        single_char_token,
    ))
    .parse_next(input)
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Scan all tokens from source, collecting scan errors instead of stopping at them.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn scan_all(source: &str) -> Scanned {
    let mut input = LocatingSlice::new(source);
    let mut line = 1;
    if let Ok(Some(skipped)) = opt(shebang.take()).parse_next(&mut input) {
        line += count_newlines(skipped);
    }
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    loop {
        match whitespace_and_comments.take().parse_next(&mut input) {
            Ok(skipped) => line += count_newlines(skipped),
            Err(_) => break,
        }
        if input.is_empty() {
            break;
        }

        let start = input.current_token_start();
        let Ok((lexed, lexeme)) = scan_token.with_taken().parse_next(&mut input) else {
            break;
        };
        line += count_newlines(lexeme);
        let span = Span::new(start, lexeme.len());
        match lexed {
            Lexed::Token(kind, literal) => {
                tokens.push(Token::new(kind, lexeme, line, span).with_literal(literal));
            }
            Lexed::Invalid(kind) => {
                tracing::trace!(line, offset = start, %kind, "skipping invalid lexeme");
                errors.push(ScanError::new(kind, line, span));
            }
        }
    }

    let eof_offset = source.len();
    tokens.push(Token::new(TokenKind::Eof, "", line, Span::new(eof_offset, 0)));

    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "scan complete");
    Scanned { tokens, errors }
}
