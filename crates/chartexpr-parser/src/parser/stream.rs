//! Token stream wrapper for hand-written parser.

use super::ParseError;
use chartexpr_ast::foundation::{LineIndex, Span};
use chartexpr_lexer::Token;

/// Deepest allowed nesting of parentheses, calls and prefix operators.
pub const MAX_NESTING: usize = 64;

/// Token stream with lookahead and position tracking.
///
/// Each token is paired with its span from the source, so every node the
/// parser builds can report the exact range of tokens it came from.
pub struct TokenStream<'src> {
    tokens: &'src [(Token, Span)],
    pos: usize,
    /// Zero-length span just after the last token.
    end: Span,
    depth: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &str, tokens: &'src [(Token, Span)]) -> Self {
        let end = match tokens.last() {
            Some((_, last)) => {
                let offset = last.end as usize;
                LineIndex::new(source).span(offset, offset)
            }
            None => Span::zero(),
        };
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&'src Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token has the same kind as `expected`.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Expect a specific token and advance if it matches.
    pub fn expect(&mut self, expected: Token) -> Result<Span, ParseError> {
        if self.check(&expected) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(ParseError::expected_token(
                &expected,
                self.peek(),
                self.current_span(),
            ))
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Span from the token at `start` through the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let first = match self.tokens.get(start) {
            Some((_, span)) => *span,
            None => return self.current_span(),
        };
        match self.pos.checked_sub(1).and_then(|last| self.tokens.get(last)) {
            Some((_, last)) if self.pos > start => first.merge(last),
            _ => first,
        }
    }

    /// Span of the current token, or a zero-length span after the last one.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => *span,
            None => self.end,
        }
    }

    /// Run `parse` one nesting level deeper.
    ///
    /// Fails without calling `parse` once [`MAX_NESTING`] levels are open.
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::invalid_syntax(
                format!("expression nested too deeply (limit {})", MAX_NESTING),
                "Expression is nested too deeply; split it into several assignments",
                self.current_span(),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Skip past the next `;` for error recovery.
    ///
    /// Parsing resumes at the statement after the one that failed.
    pub fn synchronize(&mut self) {
        while let Some(token) = self.advance() {
            if matches!(token, Token::Semicolon) {
                break;
            }
        }
    }
}
