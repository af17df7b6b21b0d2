use exprfold_parser::tree::Expr;
use std::fmt;

/// A stage of the reduction of an expression, holding the tree produced by that stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The input was parsed and flattened.
    Parse(Expr),

    /// Nested operations with the same operator were merged.
    Flatten(Expr),

    /// Subtractions were rewritten as additions of negated terms.
    SubToAdd(Expr),

    /// The operations introduced by the rewrite were merged into their parents.
    Merge(Expr),
}

impl Step {
    /// Returns the tree produced by this step.
    pub fn expr(&self) -> &Expr {
        match self {
            Self::Parse(expr) | Self::Flatten(expr) | Self::SubToAdd(expr) | Self::Merge(expr) => expr,
        }
    }

    /// Returns a short description of the step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Flatten(_) => "flatten",
            Self::SubToAdd(_) => "rewrite subtraction",
            Self::Merge(_) => "merge",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description(), self.expr())
    }
}
