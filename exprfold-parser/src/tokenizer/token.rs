use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// A single letter. Variables are one character long, so `xy` is two tokens.
    #[regex(r"[a-zA-Z]")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if a token of this kind can start a term: a number, a variable, or an opening
    /// parenthesis.
    pub fn starts_term(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Name | TokenKind::OpenParen)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns the first character of the lexeme.
    pub fn first_char(&self) -> char {
        self.lexeme.chars().next().unwrap_or_default()
    }
}
