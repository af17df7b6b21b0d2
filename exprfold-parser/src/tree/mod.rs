//! The expression tree produced by the parser and transformed by later passes.
//!
//! An [`Expr`] is either an integer [`Expr::Value`], a single-letter [`Expr::Variable`], or an
//! [`Expr::Operation`] that applies an [`OpKind`] to an ordered list of children. Trees are plain
//! values: every pass consumes a tree and returns a new one.
//!
//! The parser only ever builds binary operations. [`Expr::flatten`] merges chains of the same
//! operator into a single n-ary node, which is the shape the canonicalization and evaluation
//! passes expect:
//!
//! ```
//! use exprfold_parser::{parser::Parser, tree::Expr};
//!
//! let raw = Parser::new("1+2+3").try_parse_full().unwrap();
//! assert_eq!(raw, Expr::add(vec![
//!     Expr::value(1),
//!     Expr::add(vec![Expr::value(2), Expr::value(3)]),
//! ]));
//!
//! assert_eq!(raw.flatten(), Expr::add(vec![Expr::value(1), Expr::value(2), Expr::value(3)]));
//! ```
//!
//! # Equality
//!
//! Equality is structural and order-sensitive: `x + y` and `y + x` are different trees.

mod flatten;
mod fmt;
mod iter;

pub use fmt::TreeDisplay;
pub use iter::ExprIter;

use num_bigint::BigInt;

/// An operator that can be applied to the children of an [`Expr::Operation`].
///
/// Operators are compared by kind, so flattening can check whether a child uses the same operator
/// as its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl OpKind {
    /// Returns the symbol used to display the operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Returns the identity element of the operator, if it has one that can be elided during
    /// constant folding: `0` for addition and `1` for multiplication.
    pub fn identity(self) -> Option<i32> {
        match self {
            Self::Add => Some(0),
            Self::Mul => Some(1),
            Self::Sub | Self::Div => None,
        }
    }

    /// Returns true if `a op (b op c) = (a op b) op c`, i.e. the operands can be regrouped freely.
    pub fn is_associative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }

    /// Returns the operator that combines every operand after the first one.
    ///
    /// `a - b - c = a - (b + c)` and `a / b / c = a / (b * c)`, so subtraction accumulates with
    /// addition and division accumulates with multiplication. Associative operators accumulate
    /// with themselves.
    pub fn accumulator(self) -> Self {
        match self {
            Self::Add | Self::Sub => Self::Add,
            Self::Mul | Self::Div => Self::Mul,
        }
    }

    /// Returns the binding strength of the operator. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// An integer constant, such as `2` or `144`.
    Value(BigInt),

    /// A single-letter variable, such as `x`.
    Variable(char),

    /// An operator applied to one or more children, in order.
    Operation(OpKind, Vec<Expr>),
}

impl Expr {
    /// Creates an integer constant.
    pub fn value(n: impl Into<BigInt>) -> Self {
        Self::Value(n.into())
    }

    /// Creates a variable.
    pub fn var(name: char) -> Self {
        Self::Variable(name)
    }

    /// Creates an addition of the given terms. No flattening or collapsing is done.
    pub fn add(children: Vec<Expr>) -> Self {
        Self::Operation(OpKind::Add, children)
    }

    /// Creates a subtraction of the given operands. No flattening or collapsing is done.
    pub fn sub(children: Vec<Expr>) -> Self {
        Self::Operation(OpKind::Sub, children)
    }

    /// Creates a multiplication of the given factors. No flattening or collapsing is done.
    pub fn mul(children: Vec<Expr>) -> Self {
        Self::Operation(OpKind::Mul, children)
    }

    /// Creates a division of the given operands. No flattening or collapsing is done.
    pub fn div(children: Vec<Expr>) -> Self {
        Self::Operation(OpKind::Div, children)
    }

    /// Creates an operation, collapsing it into its only child if there is exactly one.
    ///
    /// An operation without children is replaced by the identity of the operator; operators
    /// without an identity keep the empty operation.
    pub fn operation(op: OpKind, mut children: Vec<Expr>) -> Self {
        match children.len() {
            1 => children.remove(0),
            0 => match op.identity() {
                Some(identity) => Self::value(identity),
                None => Self::Operation(op, children),
            },
            _ => Self::Operation(op, children),
        }
    }

    /// If the expression is a [`Expr::Value`], returns a reference to the contained integer.
    pub fn as_value(&self) -> Option<&BigInt> {
        match self {
            Self::Value(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Expr::Value`].
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// If the expression is a [`Expr::Variable`], returns its name.
    pub fn as_variable(&self) -> Option<char> {
        match self {
            Self::Variable(name) => Some(*name),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Operation`], returns its operator and children.
    pub fn as_operation(&self) -> Option<(OpKind, &[Expr])> {
        match self {
            Self::Operation(op, children) => Some((*op, children)),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Expr::Operation`] with the given operator.
    pub fn is_operation(&self, op: OpKind) -> bool {
        matches!(self, Self::Operation(kind, _) if *kind == op)
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::value(n)
    }
}

impl From<char> for Expr {
    fn from(name: char) -> Self {
        Self::var(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn operation_collapses_single_child() {
        let expr = Expr::operation(OpKind::Mul, vec![Expr::var('x')]);
        assert_eq!(expr, Expr::var('x'));
    }

    #[test]
    fn operation_without_children() {
        assert_eq!(Expr::operation(OpKind::Add, vec![]), Expr::value(0));
        assert_eq!(Expr::operation(OpKind::Mul, vec![]), Expr::value(1));
        assert_eq!(Expr::operation(OpKind::Div, vec![]), Expr::div(vec![]));
    }

    #[test]
    fn equality_is_ordered() {
        let a = Expr::add(vec![Expr::var('x'), Expr::var('y')]);
        let b = Expr::add(vec![Expr::var('y'), Expr::var('x')]);
        assert_ne!(a, b);
    }

    #[test]
    fn accessors() {
        let expr = Expr::mul(vec![Expr::value(2), Expr::var('x')]);
        let (op, children) = expr.as_operation().unwrap();
        assert_eq!(op, OpKind::Mul);
        assert_eq!(children[0].as_value(), Some(&BigInt::from(2)));
        assert_eq!(children[1].as_variable(), Some('x'));
        assert!(expr.is_operation(OpKind::Mul));
        assert!(!expr.is_operation(OpKind::Add));
    }
}
