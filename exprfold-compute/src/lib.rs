//! Canonicalization and constant folding of expression trees produced by [`exprfold_parser`].
//!
//! An expression goes through three stages:
//!
//! 1. [`exprfold_parser::parse`] turns the text into a flattened tree.
//! 2. [`canonicalize`] rewrites every subtraction in terms of addition and multiplication by
//! `-1`, so that `a - b` becomes `a + (-1 * b)`.
//! 3. [`evaluate`] folds the constant operands of every operation into a single value.
//!
//! ```
//! use exprfold_compute::{canonicalize, evaluate};
//! use exprfold_parser::{parse, tree::Expr};
//!
//! let expr = parse("x+1+y+2").unwrap();
//! let reduced = evaluate(&canonicalize(&expr)).unwrap();
//! assert_eq!(reduced, Expr::add(vec![Expr::var('x'), Expr::var('y'), Expr::value(3)]));
//! assert_eq!(reduced.to_string(), "x + y + 3");
//! ```
//!
//! [`reduce`] (or [`reduce_with_steps`]) runs all three stages on a line of text and reports failures as
//! [`exprfold_error::Error`]s, ready to be rendered with [`ariadne`].

pub mod canonical;
pub mod eval;
pub mod step_collector;

pub use canonical::{canonicalize, canonicalize_with_steps, Step};
pub use eval::{combine, evaluate, EvalError};
pub use step_collector::StepCollector;

use exprfold_error::Error;
use exprfold_parser::tree::Expr;

/// Parses, canonicalizes and evaluates the given whitespace-free text.
///
/// Evaluation errors are not tied to a single token, so they point at the whole input.
pub fn reduce(text: &str) -> Result<Expr, Error> {
    reduce_with_steps(text, &mut ())
}

/// Parses, canonicalizes and evaluates the given whitespace-free text, reporting the parsed tree
/// and the tree produced by each canonicalization stage to the given [`StepCollector`].
pub fn reduce_with_steps(text: &str, step_collector: &mut dyn StepCollector<Step>) -> Result<Expr, Error> {
    let expr = exprfold_parser::parse(text)?;
    step_collector.push(Step::Parse(expr.clone()));
    let canonical = canonicalize_with_steps(&expr, step_collector);
    evaluate(&canonical).map_err(|err| Error::new(vec![0..text.len()], err))
}
