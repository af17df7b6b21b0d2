//! Constant folding of canonical trees.
//!
//! [`evaluate`] reduces every operation bottom up:
//!
//! - For `+` and `*`, every constant child is combined into a single value, which is placed after
//! the other children. The value is dropped if it is the identity of the operator (`x + 0` is
//! `x`). The other children keep their relative order.
//! - For `/` (and `-`, if the tree was not canonicalized), constants are only combined with their
//! neighbors, since the operands cannot be reordered. `x / 2 / 3` becomes `x / 6`, and `8 / 4`
//! becomes `2`, but `7 / 2` is kept since the result is not an integer.
//!
//! An operation left with a single child is replaced by that child.

mod error;

pub use error::EvalError;

use exprfold_parser::tree::{Expr, OpKind};
use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::Zero;

/// Applies the operator to the two operands.
///
/// Division truncates toward zero; [`EvalError::DivisionByZero`] is returned if `b` is zero.
pub fn combine(op: OpKind, a: &BigInt, b: &BigInt) -> Result<BigInt, EvalError> {
    match op {
        OpKind::Add => Ok(a + b),
        OpKind::Sub => Ok(a - b),
        OpKind::Mul => Ok(a * b),
        OpKind::Div => {
            if b.is_zero() {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        },
    }
}

/// Folds the constants of the given canonical tree.
///
/// The input is expected to be the output of [`crate::canonicalize`]. Other trees are accepted,
/// but subtraction is only folded positionally.
pub fn evaluate(expr: &Expr) -> Result<Expr, EvalError> {
    let result = eval_node(expr)?;
    debug!("evaluated: {}", result);
    Ok(result)
}

fn eval_node(expr: &Expr) -> Result<Expr, EvalError> {
    match expr {
        Expr::Value(_) | Expr::Variable(_) => Ok(expr.clone()),
        Expr::Operation(op, children) => {
            let children = children.iter()
                .map(eval_node)
                .collect::<Result<Vec<_>, _>>()?;

            if op.is_associative() {
                fold_associative(*op, children)
            } else {
                fold_positional(*op, children)
            }
        },
    }
}

/// Folds every constant child of an addition or multiplication into a single value.
fn fold_associative(op: OpKind, children: Vec<Expr>) -> Result<Expr, EvalError> {
    let mut constant: Option<BigInt> = None;
    let mut rest = Vec::with_capacity(children.len());

    // a child may have become an operation with the same operator after its own folding, such as
    // `(x + 0) + y`, so its children are merged first
    let merged = children.into_iter().flat_map(|child| match child {
        Expr::Operation(kind, grandchildren) if kind == op => grandchildren,
        other => vec![other],
    });

    for child in merged {
        match child {
            Expr::Value(n) => {
                constant = Some(match constant {
                    Some(acc) => {
                        let folded = combine(op, &acc, &n)?;
                        trace!("folded {} {} {} = {}", acc, op.symbol(), n, folded);
                        folded
                    },
                    None => n,
                });
            },
            other => rest.push(other),
        }
    }

    if let Some(n) = constant {
        if !is_identity(op, &n) {
            rest.push(Expr::Value(n));
        }
    }

    Ok(Expr::operation(op, rest))
}

/// Folds the constants of a division or subtraction without reordering its operands.
///
/// Every operand after the first one is combined with the [`OpKind::accumulator`] of the operator,
/// so adjacent constant operands are merged into one. A merged run that directly follows a
/// constant first operand is applied to it, as long as the result is exact.
fn fold_positional(op: OpKind, children: Vec<Expr>) -> Result<Expr, EvalError> {
    let mut children = children.into_iter();
    let Some(first) = children.next() else {
        return Ok(Expr::operation(op, Vec::new()));
    };

    // the leading child may have become an operation with the same operator, such as
    // `((x / 2) * 1) / 3`
    let mut operands = match first {
        Expr::Operation(kind, inner) if kind == op => inner.into_iter(),
        other => vec![other].into_iter(),
    }.chain(children);

    let Some(mut head) = operands.next() else {
        return Ok(Expr::operation(op, Vec::new()));
    };
    let mut rest = Vec::new();
    let mut run: Option<BigInt> = None;

    for operand in operands {
        match operand {
            Expr::Value(n) => {
                run = Some(match run {
                    Some(acc) => combine(op.accumulator(), &acc, &n)?,
                    None => n,
                });
            },
            other => {
                if let Some(n) = run.take() {
                    apply_run(op, &mut head, &mut rest, n)?;
                }
                rest.push(other);
            },
        }
    }

    if let Some(n) = run {
        apply_run(op, &mut head, &mut rest, n)?;
    }

    let mut children = Vec::with_capacity(rest.len() + 1);
    children.push(head);
    children.extend(rest);
    Ok(Expr::operation(op, children))
}

/// Applies a merged run of constant operands to the folded operation.
fn apply_run(op: OpKind, head: &mut Expr, rest: &mut Vec<Expr>, run: BigInt) -> Result<(), EvalError> {
    if op == OpKind::Div && run.is_zero() {
        return Err(EvalError::DivisionByZero);
    }

    if is_identity(op.accumulator(), &run) {
        trace!("dropped {} {}", op.symbol(), run);
        return Ok(());
    }

    if rest.is_empty() {
        if let Expr::Value(n) = head {
            let exact = op != OpKind::Div || (&*n % &run).is_zero();
            if exact {
                let folded = combine(op, n, &run)?;
                trace!("folded {} {} {} = {}", n, op.symbol(), run, folded);
                *n = folded;
                return Ok(());
            }
        }
    }

    rest.push(Expr::Value(run));
    Ok(())
}

/// Returns true if the value is the identity of the operator.
fn is_identity(op: OpKind, n: &BigInt) -> bool {
    op.identity().map_or(false, |identity| *n == BigInt::from(identity))
}

#[cfg(test)]
mod tests {
    use exprfold_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn v(n: i64) -> Expr {
        Expr::value(n)
    }

    fn x(name: char) -> Expr {
        Expr::var(name)
    }

    /// Evaluates the given parsed (but not canonicalized) input.
    fn eval_str(input: &str) -> Result<Expr, EvalError> {
        evaluate(&parse(input).unwrap())
    }

    #[test]
    fn combine_all_operators() {
        let (a, b) = (BigInt::from(7), BigInt::from(2));
        assert_eq!(combine(OpKind::Add, &a, &b), Ok(BigInt::from(9)));
        assert_eq!(combine(OpKind::Sub, &a, &b), Ok(BigInt::from(5)));
        assert_eq!(combine(OpKind::Mul, &a, &b), Ok(BigInt::from(14)));
        assert_eq!(combine(OpKind::Div, &a, &b), Ok(BigInt::from(3)));
        assert_eq!(combine(OpKind::Div, &a, &BigInt::from(0)), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn leaves() {
        assert_eq!(evaluate(&v(3)), Ok(v(3)));
        assert_eq!(evaluate(&x('x')), Ok(x('x')));
    }

    #[test]
    fn fold_sum() {
        assert_eq!(eval_str("1+2+3"), Ok(v(6)));
    }

    #[test]
    fn fold_keeps_order() {
        assert_eq!(eval_str("2+x+3+y"), Ok(Expr::add(vec![x('x'), x('y'), v(5)])));
        assert_eq!(eval_str("y2x"), Ok(Expr::mul(vec![x('y'), x('x'), v(2)])));
    }

    #[test]
    fn identity_is_dropped() {
        assert_eq!(eval_str("x+0"), Ok(x('x')));
        assert_eq!(eval_str("0+x"), Ok(x('x')));
        assert_eq!(eval_str("1x"), Ok(x('x')));
        assert_eq!(eval_str("x+2+y+0"), Ok(Expr::add(vec![x('x'), x('y'), v(2)])));
    }

    #[test]
    fn identity_only() {
        assert_eq!(evaluate(&Expr::add(vec![v(0), v(0)])), Ok(v(0)));
        assert_eq!(evaluate(&Expr::mul(vec![v(1), v(1), v(1)])), Ok(v(1)));
    }

    #[test]
    fn multiplication_by_zero_is_not_simplified() {
        assert_eq!(eval_str("x*0"), Ok(Expr::mul(vec![x('x'), v(0)])));
    }

    #[test]
    fn nested_folds_merge() {
        // (x + 0) collapses to x, (1 + 2) to 3, and the outer product folds 3 * 4
        assert_eq!(eval_str("(x+0)(1+2)4"), Ok(Expr::mul(vec![x('x'), v(12)])));

        // (x y + 0) collapses to x y, which is merged into the outer product
        assert_eq!(
            evaluate(&Expr::mul(vec![v(2), Expr::add(vec![Expr::mul(vec![x('x'), x('y')]), v(0)])])),
            Ok(Expr::mul(vec![x('x'), x('y'), v(2)])),
        );
    }

    #[test]
    fn exact_division() {
        assert_eq!(eval_str("8/4"), Ok(v(2)));
        assert_eq!(eval_str("8/4/2"), Ok(v(1)));
        assert_eq!(eval_str("12/2/3x"), Ok(Expr::div(vec![v(6), Expr::mul(vec![x('x'), v(3)])])));
    }

    #[test]
    fn inexact_division_is_kept() {
        assert_eq!(eval_str("7/2"), Ok(Expr::div(vec![v(7), v(2)])));
        assert_eq!(eval_str("7/2/3"), Ok(Expr::div(vec![v(7), v(6)])));
    }

    #[test]
    fn divisors_are_merged() {
        assert_eq!(eval_str("x/2/3"), Ok(Expr::div(vec![x('x'), v(6)])));
        assert_eq!(eval_str("x/2/y/3/4"), Ok(Expr::div(vec![x('x'), v(2), x('y'), v(12)])));
    }

    #[test]
    fn division_by_one() {
        assert_eq!(eval_str("x/1"), Ok(x('x')));
        assert_eq!(eval_str("x/(3-2)"), Ok(x('x')));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval_str("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("x/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("x/2/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("0/0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn division_by_zero_inside_other_operations() {
        assert_eq!(eval_str("1+2(3/0)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn constant_before_variable_is_kept() {
        assert_eq!(eval_str("6/x/2"), Ok(Expr::div(vec![v(6), x('x'), v(2)])));
    }

    #[test]
    fn residual_subtraction() {
        assert_eq!(eval_str("10-3-2"), Ok(v(5)));
        assert_eq!(eval_str("x-3-2"), Ok(Expr::sub(vec![x('x'), v(5)])));
        assert_eq!(eval_str("x-0"), Ok(x('x')));
    }

    #[test]
    fn leading_operation_is_merged() {
        // ((x / 2) * 1) collapses to x / 2, which is merged into the outer division
        assert_eq!(
            evaluate(&Expr::div(vec![Expr::mul(vec![Expr::div(vec![x('x'), v(2)]), v(1)]), v(3)])),
            Ok(Expr::div(vec![x('x'), v(6)])),
        );
        assert_eq!(
            evaluate(&Expr::div(vec![Expr::div(vec![x('x'), v(2)]), v(3)])),
            Ok(Expr::div(vec![x('x'), v(6)])),
        );
    }
}
