pub mod cursor;
pub mod error;

use crate::{
    tokenizer::TokenKind,
    tree::{Expr, OpKind},
};
pub use cursor::Cursor;
use error::{kind::{self, Production}, Error};
use num_bigint::BigInt;
use std::ops::Range;

/// The default maximum number of nested parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The default maximum height of the tree built by the parser.
pub const DEFAULT_MAX_HEIGHT: usize = 512;

/// A recursive-descent parser for the expression grammar:
///
/// ```text
/// Digit      := '0'..'9'
/// Number     := Digit+
/// Variable   := a single letter
/// Singleton  := Number | Variable
/// Term       := '(' Expression ')' | Singleton
/// Group      := Term Group | Term
/// Mult       := Group '*' Mult | Group '/' Mult | Group
/// Expression := Mult '+' Expression | Mult '-' Expression | Mult
/// ```
///
/// Consecutive terms in a group are multiplied (`2x`, `2(x + 1)`). The parser decides whether a
/// group continues by looking at exactly one token, and never backtracks.
///
/// Every production returns the **raw** tree: all operations are binary, and chains of `+` or `*`
/// are nested to the right (`1 + 2 + 3` is `1 + (2 + 3)`). Chains of `-` and `/` are nested to the
/// left so the tree keeps the usual meaning of `a - b + c`. Use [`Expr::flatten`] (or
/// [`crate::parse`]) to merge the chains.
///
/// # Limits
///
/// Every later pass walks the tree recursively, so the parser bounds its shape:
///
/// - at most `max_depth` parentheses can be open at once ([`kind::NestingTooDeep`]);
/// - the raw tree can be at most `max_height` operations tall ([`kind::ExpressionTooDeep`]). Each
/// operator of a chain adds a level, so `1+1+...+1` with more than `max_height` operators is
/// rejected.
///
/// Both limits are checked while parsing, before a tree that exceeds them exists.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The cursor over the tokens of the input.
    cursor: Cursor<'source>,

    /// The number of parentheses currently open.
    depth: usize,

    /// The maximum number of parentheses that can be open at once.
    max_depth: usize,

    /// The maximum height of the tree.
    max_height: usize,
}

/// A parsed expression, along with the height of its tree: `0` for a leaf, and one more than its
/// tallest child for an operation.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 0 }
    }
}

/// An operand of a chain, with the location of the operator that precedes it. Juxtaposed terms
/// have no operator, so the location of the term itself is used.
type Link = (Range<usize>, Node);

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, with the default limits.
    pub fn new(source: &'source str) -> Self {
        Self::with_limits(source, DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT)
    }

    /// Create a new parser for the given source, allowing up to `max_depth` nested parentheses.
    pub fn with_max_depth(source: &'source str, max_depth: usize) -> Self {
        Self::with_limits(source, max_depth, DEFAULT_MAX_HEIGHT)
    }

    /// Create a new parser for the given source, allowing up to `max_depth` nested parentheses
    /// and a tree up to `max_height` operations tall.
    pub fn with_limits(source: &'source str, max_depth: usize, max_height: usize) -> Self {
        Self {
            cursor: Cursor::new(source),
            depth: 0,
            max_depth,
            max_height,
        }
    }

    /// Returns the kind of the current token.
    fn peek_kind(&self) -> Option<TokenKind> {
        self.cursor.peek().map(|token| token.kind)
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    fn error(&self, kind: impl error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.cursor.span()], kind)
    }

    /// Creates the error for a production that cannot accept the current token.
    fn unexpected(&self, expected: Production) -> Error {
        match self.cursor.peek() {
            Some(token) => self.error(kind::UnexpectedToken {
                expected,
                found: token.first_char(),
            }),
            None => self.error(kind::UnexpectedEof { expected }),
        }
    }

    /// Joins two operands with the given operator. Fails if the result would be taller than the
    /// parser allows; `span` is the location of the operator.
    fn join(&self, op: OpKind, lhs: Node, rhs: Node, span: &Range<usize>) -> Result<Node, Error> {
        let height = lhs.height.max(rhs.height) + 1;
        if height > self.max_height {
            return Err(Error::new(vec![span.clone()], kind::ExpressionTooDeep {
                limit: self.max_height,
            }));
        }

        Ok(Node {
            expr: Expr::Operation(op, vec![lhs.expr, rhs.expr]),
            height,
        })
    }

    /// Nests the given operands to the right with the given operator: `[a, b, c]` becomes
    /// `a op (b op c)`.
    fn nest_right(&self, op: OpKind, first: Node, rest: Vec<Link>) -> Result<Node, Error> {
        let mut rest = rest.into_iter().rev();
        let Some((mut span, mut acc)) = rest.next() else {
            return Ok(first);
        };

        for (lhs_span, lhs) in rest {
            acc = self.join(op, lhs, acc, &span)?;
            span = lhs_span;
        }

        self.join(op, first, acc, &span)
    }

    /// Builds the tree of a chain of operands at the same precedence level, such as
    /// `a + b - c + d`.
    ///
    /// Operands are grouped left to right, except that a run of the same associative operator is
    /// nested to the right, matching the right-recursive grammar: `a + b + c` is `a + (b + c)`,
    /// while `a - b - c` is `(a - b) - c` and `a - b + c` is `(a - b) + c`.
    fn build_chain(&self, first: Node, rest: Vec<(OpKind, Link)>) -> Result<Node, Error> {
        let mut acc = first;
        let mut rest = rest.into_iter().peekable();

        while let Some((op, (span, operand))) = rest.next() {
            if op.is_associative() {
                let mut run = Vec::new();
                while let Some((_, link)) = rest.next_if(|(next, _)| *next == op) {
                    run.push(link);
                }
                let rhs = self.nest_right(op, operand, run)?;
                acc = self.join(op, acc, rhs, &span)?;
            } else {
                acc = self.join(op, acc, operand, &span)?;
            }
        }

        Ok(acc)
    }

    /// Returns true if the current token starts a term, i.e. it is a digit, a letter, or an
    /// opening parenthesis.
    pub fn is_term(&self) -> bool {
        self.peek_kind().map_or(false, TokenKind::starts_term)
    }

    /// Parses an expression. The whole input must be consumed; if not, an error is returned.
    pub fn try_parse_full(&mut self) -> Result<Expr, Error> {
        let node = self.parse_sum()?;
        match self.cursor.peek() {
            None => Ok(node.expr),
            Some(token) => Err(self.error(kind::ExpectedEof {
                found: token.first_char(),
            })),
        }
    }

    /// Parses the `Expression` production, leaving any remaining input unconsumed.
    pub fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_sum().map(|node| node.expr)
    }

    /// Parses the `Expression` production.
    fn parse_sum(&mut self) -> Result<Node, Error> {
        let first = self.parse_mult()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Add) => OpKind::Add,
                Some(TokenKind::Sub) => OpKind::Sub,
                _ => break,
            };
            let span = self.cursor.advance(Production::Expression)?.span;
            rest.push((op, (span, self.parse_mult()?)));
        }

        self.build_chain(first, rest)
    }

    /// Parses the `Mult` production.
    fn parse_mult(&mut self) -> Result<Node, Error> {
        let first = self.parse_group()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Mul) => OpKind::Mul,
                Some(TokenKind::Div) => OpKind::Div,
                _ => break,
            };
            let span = self.cursor.advance(Production::Mult)?.span;
            rest.push((op, (span, self.parse_group()?)));
        }

        self.build_chain(first, rest)
    }

    /// Parses the `Group` production: one or more juxtaposed terms, multiplied together.
    fn parse_group(&mut self) -> Result<Node, Error> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();
        while self.is_term() {
            let span = self.cursor.span();
            rest.push((span, self.parse_term()?));
        }

        self.nest_right(OpKind::Mul, first, rest)
    }

    /// Parses the `Term` production.
    fn parse_term(&mut self) -> Result<Node, Error> {
        match self.peek_kind() {
            Some(TokenKind::OpenParen) => {
                if self.depth >= self.max_depth {
                    return Err(self.error(kind::NestingTooDeep { limit: self.max_depth }));
                }

                self.cursor.advance(Production::Term)?;
                self.depth += 1;
                let node = self.parse_sum();
                self.depth -= 1;
                let node = node?;

                if self.peek_kind() == Some(TokenKind::CloseParen) {
                    self.cursor.advance(Production::Term)?;
                    Ok(node)
                } else {
                    Err(self.unexpected(Production::Term))
                }
            },
            Some(TokenKind::Int | TokenKind::Name) => self.parse_singleton(),
            _ => Err(self.unexpected(Production::Term)),
        }
    }

    /// Parses the `Singleton` production.
    fn parse_singleton(&mut self) -> Result<Node, Error> {
        match self.peek_kind() {
            Some(TokenKind::Int) => self.parse_number(),
            Some(TokenKind::Name) => self.parse_variable(),
            _ => Err(self.unexpected(Production::Singleton)),
        }
    }

    /// Parses the `Number` production.
    fn parse_number(&mut self) -> Result<Node, Error> {
        if self.peek_kind() != Some(TokenKind::Int) {
            return Err(self.unexpected(Production::Number));
        }

        let token = self.cursor.advance(Production::Number)?;
        let value = token.lexeme
            .chars()
            .filter_map(|c| c.to_digit(10))
            .fold(BigInt::from(0), |value, digit| value * 10u32 + digit);
        Ok(Node::leaf(Expr::Value(value)))
    }

    /// Parses the `Variable` production.
    fn parse_variable(&mut self) -> Result<Node, Error> {
        if self.peek_kind() != Some(TokenKind::Name) {
            return Err(self.unexpected(Production::Variable));
        }

        let token = self.cursor.advance(Production::Variable)?;
        Ok(Node::leaf(Expr::Variable(token.first_char())))
    }
}
