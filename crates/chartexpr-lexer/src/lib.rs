// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the chart expression language.
//!
//! This crate provides tokenization of program source using logos.
//!
//! # Design
//!
//! - `Token`: all token types (operators, keywords, literals, identifiers)
//! - Whitespace, including newlines, is skipped; statements are separated by `;`
//! - Longest match wins, so `7d` is one duration token and `>=` one operator
//! - Keywords only match whole words: `android` and `notes` are identifiers
//!
//! # Examples
//!
//! ```
//! # use chartexpr_lexer::*;
//! let tokens = tokenize("Smoothed = moving_avg(Revenue, 7d);").unwrap();
//! assert_eq!(tokens.len(), 9);
//! assert_eq!(tokens[0].1.column, 1);
//! ```

mod error;

pub use error::LexError;

use chartexpr_ast::foundation::{LineIndex, Span};
use chartexpr_ast::{DurationLiteral, DurationUnit};
use logos::Logos;
use std::fmt;
use std::rc::Rc;

/// Program token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // === Keywords ===
    /// Boolean literal `true`
    #[token("true")]
    True,
    /// Boolean literal `false`
    #[token("false")]
    False,
    /// Keyword `and` (logical and)
    #[token("and")]
    And,
    /// Keyword `or` (logical or)
    #[token("or")]
    Or,
    /// Keyword `not` (logical not, same as `!`)
    #[token("not")]
    Not,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token("==")]
    EqEq,
    /// Assignment and named-argument `=`
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // === Literals ===
    /// Duration literal (e.g., 500ms, 30s, 7d, 2w)
    ///
    /// A value whose millisecond length overflows `i64` is a lex error.
    #[regex(r"[0-9]+(ms|s|m|h|d|w)", lex_duration)]
    Duration(DurationLiteral),

    /// Number literal (e.g., 42, 3.14)
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    /// String literal with backslash escapes, stored decoded.
    ///
    /// Uses `Rc<str>` for cheap cloning throughout the parser pipeline.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len() - 1]).map(|s| Rc::from(s.as_str()))
    })]
    String(Rc<str>),

    /// Identifier (e.g., Revenue, Revenue_2024, _tmp)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),
}

fn lex_duration(lex: &mut logos::Lexer<Token>) -> Option<DurationLiteral> {
    let slice = lex.slice();
    let split = slice.find(|c: char| !c.is_ascii_digit())?;
    let (digits, suffix) = slice.split_at(split);
    let literal = DurationLiteral::new(digits.parse().ok()?, DurationUnit::from_suffix(suffix)?);
    literal.checked_millis().map(|_| literal)
}

/// Decode the body of a string literal.
///
/// Accepts the escapes `\" \\ \/ \b \f \n \r \t \uXXXX` (surrogate pairs
/// combine). Unknown escapes and raw control characters are rejected.
fn unescape_string(s: &str) -> Option<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                '"' => result.push('"'),
                '\\' => result.push('\\'),
                '/' => result.push('/'),
                'b' => result.push('\u{8}'),
                'f' => result.push('\u{c}'),
                'n' => result.push('\n'),
                'r' => result.push('\r'),
                't' => result.push('\t'),
                'u' => {
                    let high = read_hex4(&mut chars)?;
                    let code = if (0xD800..0xDC00).contains(&high) {
                        if chars.next()? != '\\' || chars.next()? != 'u' {
                            return None;
                        }
                        let low = read_hex4(&mut chars)?;
                        if !(0xDC00..0xE000).contains(&low) {
                            return None;
                        }
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    } else {
                        high
                    };
                    result.push(char::from_u32(code)?);
                }
                _ => return None,
            },
            c if (c as u32) < 0x20 => return None,
            c => result.push(c),
        }
    }
    Some(result)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

/// Tokenize a whole program.
///
/// Returns every token paired with its span, or the error at the first
/// character that starts no valid token.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();

    for (result, range) in Token::lexer(source).spanned() {
        let span = index.span(range.start, range.end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(LexError::at(&source[range], span)),
        }
    }

    Ok(tokens)
}

impl Token {
    /// Short human-readable name used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            Token::Duration(_) => format!("duration '{}'", self),
            Token::Number(_) => format!("number '{}'", self),
            Token::String(_) => format!("string {}", self),
            Token::Ident(_) => format!("identifier '{}'", self),
            _ => format!("'{}'", self),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Token::Duration(d) => return write!(f, "{}", d),
            Token::Number(n) => return write!(f, "{}", n),
            Token::String(s) => return write!(f, "{:?}", s),
            Token::Ident(id) => return write!(f, "{}", id),
            Token::True => "true",
            Token::False => "false",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::EqEq => "==",
            Token::Eq => "=",
            Token::Bang => "!",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
        };
        f.write_str(s)
    }
}
