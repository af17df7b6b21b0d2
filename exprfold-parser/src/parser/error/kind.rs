use ariadne::Fmt;
use exprfold_attrs::ErrorKind;
use exprfold_error::EXPR;
use std::fmt;

/// A production of the grammar. Errors name the production that could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    /// One or more digits.
    Number,

    /// A single letter.
    Variable,

    /// A number or a variable.
    Singleton,

    /// A parenthesized expression or a singleton.
    Term,

    /// One or more juxtaposed terms.
    Group,

    /// Groups separated by `*` or `/`.
    Mult,

    /// Mults separated by `+` or `-`.
    Expression,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "a number",
            Self::Variable => "a variable",
            Self::Singleton => "a number or variable",
            Self::Term => "a term",
            Self::Group => "a group of terms",
            Self::Mult => "a product",
            Self::Expression => "an expression",
        };
        f.write_str(name)
    }
}

/// A production required a character class that the current character does not belong to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", found),
    labels = [format!("I expected to see {} here", expected.fg(EXPR))],
    help = if *expected == Production::Term {
        "a term is a number, a single-letter variable, or an expression in parentheses"
    } else {
        "whitespace and other symbols are not part of an expression"
    },
)]
pub struct UnexpectedToken {
    /// The production that was being parsed.
    pub expected: Production,

    /// The character that was found.
    pub found: char,
}

/// The end of the input was reached while a production still needed more characters.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("I expected to see {} here", expected.fg(EXPR))],
    help = if *expected == Production::Term {
        "check that every opening parenthesis `(` has a matching `)`"
    } else {
        "the input must contain an expression"
    },
)]
pub struct UnexpectedEof {
    /// The production that was being parsed.
    pub expected: Production,
}

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "input".fg(EXPR))],
    help = if *found == ')' {
        "this closing parenthesis has no matching `(`".to_string()
    } else {
        format!("`{}` cannot continue the expression", found)
    },
)]
pub struct ExpectedEof {
    /// The first character that was not consumed.
    pub found: char,
}

/// Parentheses were nested more deeply than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "parentheses are nested too deeply",
    labels = ["this parenthesis exceeds the limit"],
    help = format!("at most {} nested parentheses are allowed", limit),
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub limit: usize,
}

/// The operators of the expression formed a tree taller than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["this operator exceeds the limit"],
    help = format!("each operator in a chain adds a level to the expression, and at most {} levels are allowed", limit),
)]
pub struct ExpressionTooDeep {
    /// The maximum height of the expression tree.
    pub limit: usize,
}
