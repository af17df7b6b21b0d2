//! Rewrites a tree into the canonical form expected by [`crate::evaluate`].
//!
//! A canonical tree is flat (no operation has a direct child with the same associative operator,
//! and no operation has a single child) and contains no subtraction. Subtraction is expressed as
//! the addition of a term multiplied by `-1`:
//!
//! ```
//! use exprfold_compute::canonicalize;
//! use exprfold_parser::{parse, tree::Expr};
//!
//! let expr = canonicalize(&parse("a-b-c").unwrap());
//! assert_eq!(expr, Expr::add(vec![
//!     Expr::var('a'),
//!     Expr::mul(vec![
//!         Expr::value(-1),
//!         Expr::add(vec![Expr::var('b'), Expr::var('c')]),
//!     ]),
//! ]));
//! ```
//!
//! Division is left as is.

mod step;

pub use step::Step;

use exprfold_parser::tree::{Expr, OpKind};
use log::debug;
use crate::step_collector::StepCollector;

/// Merges nested operations that use the same operator. See [`Expr::flatten`].
pub fn flatten(expr: &Expr) -> Expr {
    expr.flatten()
}

/// Rewrites every subtraction in the tree in terms of addition.
///
/// A subtraction `a - b - c - ...` becomes `a + (-1 * (b + c + ...))`. If there is only one
/// subtrahend, it is negated directly: `a - b` becomes `a + (-1 * b)`. The rewrite happens bottom
/// up, so no subtraction remains anywhere in the result.
///
/// The input should be flattened first. The output is not: the additions and multiplications
/// introduced here may be nested directly inside operations with the same operator.
pub fn sub_to_add(expr: &Expr) -> Expr {
    match expr {
        Expr::Value(_) | Expr::Variable(_) => expr.clone(),
        Expr::Operation(op, children) => {
            let mut children = children.iter().map(sub_to_add).collect::<Vec<_>>();
            if *op != OpKind::Sub {
                return Expr::operation(*op, children);
            }

            if children.is_empty() {
                return Expr::operation(OpKind::Add, children);
            }

            let minuend = children.remove(0);
            if children.is_empty() {
                return minuend;
            }

            let subtrahend = Expr::operation(OpKind::Add, children);
            Expr::add(vec![
                minuend,
                Expr::mul(vec![Expr::value(-1), subtrahend]),
            ])
        },
    }
}

/// Rewrites the tree into canonical form: flatten, rewrite subtraction, then flatten again.
pub fn canonicalize(expr: &Expr) -> Expr {
    canonicalize_with_steps(expr, &mut ())
}

/// Rewrites the tree into canonical form, reporting the tree produced by each stage to the given
/// [`StepCollector`].
pub fn canonicalize_with_steps(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let flat = flatten(expr);
    debug!("flattened: {}", flat);

    let rewritten = sub_to_add(&flat);
    debug!("rewrote subtraction: {}", rewritten);

    let merged = flatten(&rewritten);
    debug!("canonical: {}", merged);

    step_collector.push(Step::Flatten(flat));
    step_collector.push(Step::SubToAdd(rewritten));
    step_collector.push(Step::Merge(merged.clone()));
    merged
}
