use super::{Expr, OpKind};

impl Expr {
    /// Merges nested operations that use the same operator into a single n-ary operation.
    ///
    /// - For associative operators (`+` and `*`), a child that uses the same operator as its
    /// parent is replaced by its own children, in order, wherever it appears: `1 + (2 + 3)` and
    /// `(1 + 2) + 3` both become `1 + 2 + 3`.
    /// - For `-` and `/`, only the **leading** child is merged: `(a - b) - c` becomes `a - b - c`,
    /// but `a - (b - c)` is left alone, since it is a different expression.
    ///
    /// Leaves are returned unchanged. The result is always a new tree; flattening a flattened tree
    /// returns an equal tree.
    pub fn flatten(&self) -> Expr {
        match self {
            Self::Value(_) | Self::Variable(_) => self.clone(),
            Self::Operation(op, children) => {
                let children = if op.is_associative() {
                    flatten_associative(*op, children)
                } else {
                    flatten_leading(*op, children)
                };
                Expr::operation(*op, children)
            },
        }
    }
}

/// Flattens the children of an associative operation. Same-operator children are expanded in
/// place using an explicit stack, so long chains do not grow the call stack.
fn flatten_associative(op: OpKind, children: &[Expr]) -> Vec<Expr> {
    let mut flattened = Vec::with_capacity(children.len());
    let mut stack = children.iter().rev().collect::<Vec<_>>();

    while let Some(child) = stack.pop() {
        match child {
            Expr::Operation(kind, grandchildren) if *kind == op => {
                stack.extend(grandchildren.iter().rev());
            },
            _ => flattened.push(child.flatten()),
        }
    }

    flattened
}

/// Flattens the children of a non-associative operation, following the chain of leading
/// same-operator children.
fn flatten_leading(op: OpKind, children: &[Expr]) -> Vec<Expr> {
    // `spine[0]` is the outermost list of children; each following entry is the list of children
    // of the leading child of the previous one
    let mut spine = vec![children];
    loop {
        let last: &[Expr] = spine[spine.len() - 1];
        match last.first() {
            Some(Expr::Operation(kind, inner)) if *kind == op => spine.push(inner),
            _ => break,
        }
    }

    let deepest = spine.len() - 1;
    let mut flattened = Vec::new();
    for (depth, level) in spine.iter().enumerate().rev() {
        // every level except the deepest starts with the child that was just expanded
        let skip = if depth == deepest { 0 } else { 1 };
        flattened.extend(level.iter().skip(skip).map(Expr::flatten));
    }

    flattened
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn v(n: i64) -> Expr {
        Expr::value(n)
    }

    #[test]
    fn leaves_are_unchanged() {
        assert_eq!(v(4).flatten(), v(4));
        assert_eq!(Expr::var('q').flatten(), Expr::var('q'));
    }

    #[test]
    fn right_nested_addition() {
        let expr = Expr::add(vec![v(1), Expr::add(vec![v(2), Expr::add(vec![v(3), v(4)])])]);
        assert_eq!(expr.flatten(), Expr::add(vec![v(1), v(2), v(3), v(4)]));
    }

    #[test]
    fn nesting_in_any_position() {
        let expr = Expr::mul(vec![
            Expr::mul(vec![v(1), v(2)]),
            v(3),
            Expr::mul(vec![v(4), Expr::mul(vec![v(5), v(6)])]),
        ]);
        assert_eq!(expr.flatten(), Expr::mul(vec![v(1), v(2), v(3), v(4), v(5), v(6)]));
    }

    #[test]
    fn different_operators_are_kept() {
        let expr = Expr::add(vec![v(1), Expr::mul(vec![v(2), Expr::mul(vec![v(3), Expr::var('x')])])]);
        assert_eq!(expr.flatten(), Expr::add(vec![
            v(1),
            Expr::mul(vec![v(2), v(3), Expr::var('x')]),
        ]));
    }

    #[test]
    fn nested_through_other_operator() {
        // (1 + (2 + 3)) * 4
        let expr = Expr::mul(vec![
            Expr::add(vec![v(1), Expr::add(vec![v(2), v(3)])]),
            v(4),
        ]);
        assert_eq!(expr.flatten(), Expr::mul(vec![
            Expr::add(vec![v(1), v(2), v(3)]),
            v(4),
        ]));
    }

    #[test]
    fn subtraction_leading_chain() {
        // ((a - b) - c) - d
        let expr = Expr::sub(vec![
            Expr::sub(vec![Expr::sub(vec![Expr::var('a'), Expr::var('b')]), Expr::var('c')]),
            Expr::var('d'),
        ]);
        assert_eq!(expr.flatten(), Expr::sub(vec![
            Expr::var('a'),
            Expr::var('b'),
            Expr::var('c'),
            Expr::var('d'),
        ]));
    }

    #[test]
    fn subtraction_trailing_is_kept() {
        // a - (b - c)
        let expr = Expr::sub(vec![Expr::var('a'), Expr::sub(vec![Expr::var('b'), Expr::var('c')])]);
        assert_eq!(expr.flatten(), expr);
    }

    #[test]
    fn division_leading_chain() {
        let expr = Expr::div(vec![Expr::div(vec![v(8), v(4)]), v(2)]);
        assert_eq!(expr.flatten(), Expr::div(vec![v(8), v(4), v(2)]));
    }

    #[test]
    fn idempotent() {
        let exprs = [
            Expr::add(vec![v(1), Expr::add(vec![v(2), Expr::mul(vec![v(3), Expr::mul(vec![v(4), v(5)])])])]),
            Expr::sub(vec![Expr::sub(vec![v(1), v(2)]), Expr::sub(vec![v(3), v(4)])]),
            Expr::div(vec![Expr::var('x'), Expr::add(vec![Expr::add(vec![v(1), v(2)]), v(3)])]),
        ];

        for expr in exprs {
            let once = expr.flatten();
            assert_eq!(once.flatten(), once);
        }
    }

    #[test]
    fn long_chain() {
        let mut expr = v(0);
        for i in (1..2_000).rev() {
            expr = Expr::add(vec![v(i), expr]);
        }

        match expr.flatten() {
            Expr::Operation(OpKind::Add, children) => assert_eq!(children.len(), 2_000),
            other => panic!("expected a flat addition, got {:?}", other),
        }
    }
}
