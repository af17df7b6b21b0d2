use num_traits::Signed;
use std::fmt::{self, Display, Formatter};
use super::{Expr, OpKind};

/// Returns true if the given child of an operation must be wrapped in parentheses to be read
/// back with the same grouping.
fn needs_parens(parent: OpKind, child: &Expr, index: usize) -> bool {
    match child {
        Expr::Value(n) => index > 0 && n.is_negative(),
        Expr::Variable(_) => false,
        Expr::Operation(op, _) => {
            if op.precedence() != parent.precedence() {
                return op.precedence() < parent.precedence();
            }

            // operations are read left to right, so only a later operand can be regrouped
            index > 0 && !(parent.is_associative() && *op == parent)
        },
    }
}

/// Formats the expression on one line, such as `2 * x + 3`. Parentheses are inserted where the
/// grouping of the tree differs from the usual reading of the operators.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(n) => write!(f, "{}", n),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Operation(op, children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.symbol())?;
                    }

                    if needs_parens(*op, child, i) {
                        write!(f, "({})", child)?;
                    } else {
                        write!(f, "{}", child)?;
                    }
                }
                Ok(())
            },
        }
    }
}

/// A wrapper type that formats an expression as an indented tree, one node per line.
///
/// Leaves are printed at their depth, and the symbol of an operation is printed between each pair
/// of its children at the depth of the operation itself:
///
/// ```text
///  x
/// +
///   2
///  *
///   y
/// ```
///
/// This type is created by [`Expr::tree`].
pub struct TreeDisplay<'a>(&'a Expr);

impl TreeDisplay<'_> {
    fn fmt_depth(expr: &Expr, depth: usize, f: &mut Formatter<'_>) -> fmt::Result {
        match expr {
            Expr::Value(_) | Expr::Variable(_) => writeln!(f, "{:depth$}{}", "", expr, depth = depth),
            Expr::Operation(op, children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, "{:depth$}{}", "", op.symbol(), depth = depth)?;
                    }
                    Self::fmt_depth(child, depth + 1, f)?;
                }
                Ok(())
            },
        }
    }
}

impl Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Self::fmt_depth(self.0, 0, f)
    }
}

impl Expr {
    /// Returns a wrapper that formats the expression as an indented tree.
    pub fn tree(&self) -> TreeDisplay<'_> {
        TreeDisplay(self)
    }
}
