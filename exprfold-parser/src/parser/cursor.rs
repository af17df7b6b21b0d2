use crate::tokenizer::{tokenize_complete, Token};
use std::ops::Range;
use super::error::{kind, Error};

/// A position-tracking view over the tokens of the input.
///
/// The cursor only moves forward: it can look at the current token and consume it, nothing else.
#[derive(Debug, Clone)]
pub struct Cursor<'source> {
    /// The tokens of the input.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be consumed.
    index: usize,
}

impl<'source> Cursor<'source> {
    /// Creates a cursor positioned at the start of the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            index: 0,
        }
    }

    /// Returns the current token without consuming it, or [`None`] at the end of the input.
    pub fn peek(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.index)
    }

    /// Consumes and returns the current token.
    ///
    /// Returns an [`kind::UnexpectedEof`] error naming the `expected` production if the cursor is
    /// at the end of the input.
    pub fn advance(&mut self, expected: kind::Production) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.index) {
            Some(token) => {
                self.index += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(Error::new(vec![self.eof_span()], kind::UnexpectedEof { expected })),
        }
    }

    /// Returns true if every token has been consumed.
    pub fn is_eof(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.peek().map_or_else(|| self.eof_span(), |token| token.span.clone())
    }

    /// Returns the byte offset of the current token.
    pub fn position(&self) -> usize {
        self.span().start
    }
}

#[cfg(test)]
mod tests {
    use crate::tokenizer::TokenKind;
    use super::*;

    #[test]
    fn peek_does_not_move() {
        let cursor = Cursor::new("2x");
        assert_eq!(cursor.peek().map(|t| t.kind), Some(TokenKind::Int));
        assert_eq!(cursor.peek().map(|t| t.kind), Some(TokenKind::Int));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn advance_until_end() {
        let mut cursor = Cursor::new("2x");
        assert_eq!(cursor.advance(kind::Production::Term).unwrap().lexeme, "2");
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.advance(kind::Production::Term).unwrap().lexeme, "x");
        assert!(cursor.is_eof());
        assert_eq!(cursor.position(), 2);

        let err = cursor.advance(kind::Production::Number).unwrap_err();
        assert_eq!(err.downcast_ref::<kind::UnexpectedEof>(), Some(&kind::UnexpectedEof {
            expected: kind::Production::Number,
        }));
        assert_eq!(err.spans, vec![2..2]);
    }

    #[test]
    fn empty_input() {
        let cursor = Cursor::new("");
        assert!(cursor.peek().is_none());
        assert!(cursor.is_eof());
        assert_eq!(cursor.span(), 0..0);
    }
}
