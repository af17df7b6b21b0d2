use ariadne::Source;
use exprfold_parser::{
    parse,
    parser::{error::{kind, ParseError}, Parser},
    tree::{Expr, OpKind},
};
use pretty_assertions::assert_eq;

/// Renders the report of the given error against the given source, without colors.
fn render(err: &ParseError, src: &str) -> String {
    let mut buf = Vec::new();
    err.build_report("input")
        .write(("input", Source::from(src)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

/// Returns true if no operation in the tree has a direct child with the same operator, and every
/// operation has at least two children.
fn is_flat(expr: &Expr) -> bool {
    expr.post_order_iter().all(|node| match node.as_operation() {
        Some((op, children)) => {
            children.len() >= 2
                && children.iter().enumerate().all(|(i, child)| {
                    // a non-associative operator may only keep a same-operator child that is not
                    // in leading position
                    !child.is_operation(op) || (!op.is_associative() && i > 0)
                })
        },
        None => true,
    })
}

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(parse("1+2*3").unwrap(), Expr::add(vec![
        Expr::value(1),
        Expr::mul(vec![Expr::value(2), Expr::value(3)]),
    ]));
}

#[test]
fn juxtaposition() {
    assert_eq!(parse("2x").unwrap(), Expr::mul(vec![Expr::value(2), Expr::var('x')]));
    assert_eq!(parse("2(2+1)").unwrap(), Expr::mul(vec![
        Expr::value(2),
        Expr::add(vec![Expr::value(2), Expr::value(1)]),
    ]));
}

#[test]
fn associativity_merge() {
    let raw = Parser::new("1+2+3").try_parse_full().unwrap();
    assert_eq!(raw, Expr::add(vec![
        Expr::value(1),
        Expr::add(vec![Expr::value(2), Expr::value(3)]),
    ]));
    assert_eq!(parse("1+2+3").unwrap(), Expr::add(vec![
        Expr::value(1),
        Expr::value(2),
        Expr::value(3),
    ]));
}

#[test]
fn mixed_juxtaposition_and_products_merge() {
    // 2 * (x y) * 3 and (2 x) * y are both a single product
    assert_eq!(parse("2xy*3").unwrap(), Expr::mul(vec![
        Expr::value(2),
        Expr::var('x'),
        Expr::var('y'),
        Expr::value(3),
    ]));
    assert_eq!(parse("(2x)y").unwrap(), Expr::mul(vec![
        Expr::value(2),
        Expr::var('x'),
        Expr::var('y'),
    ]));
}

#[test]
fn subtraction_chain_merges_leading_operands() {
    assert_eq!(parse("a-b-c").unwrap(), Expr::sub(vec![
        Expr::var('a'),
        Expr::var('b'),
        Expr::var('c'),
    ]));
    assert_eq!(parse("a-(b-c)").unwrap(), Expr::sub(vec![
        Expr::var('a'),
        Expr::sub(vec![Expr::var('b'), Expr::var('c')]),
    ]));
}

#[test]
fn parsed_trees_are_flat() {
    let inputs = [
        "1+2+3",
        "((1+2)+(3+4))+5",
        "2x(y+z)(w)",
        "a-b+c-d",
        "a/b/c*d/e",
        "x-(y-(z-w))",
        "((((q))))",
        "3(x+1)-2(x-1)",
    ];

    for input in inputs {
        let expr = parse(input).unwrap();
        assert!(is_flat(&expr), "not flat: {} -> {:?}", input, expr);
        assert_eq!(expr.flatten(), expr, "flatten is not idempotent for {}", input);
    }
}

#[test]
fn operators_survive_parsing() {
    let expr = parse("x/y").unwrap();
    assert_eq!(expr.as_operation().map(|(op, _)| op), Some(OpKind::Div));
}

#[test]
fn unclosed_parenthesis_is_reported_at_term() {
    let err = parse("(1+2").unwrap_err();
    assert_eq!(err.downcast_ref::<kind::UnexpectedEof>(), Some(&kind::UnexpectedEof {
        expected: kind::Production::Term,
    }));

    let out = render(&err, "(1+2");
    assert!(out.contains("unexpected end of input"));
    assert!(out.contains("I expected to see a term here"));
    assert!(out.contains("matching `)`"));
}

#[test]
fn empty_input_fails() {
    let err = parse("").unwrap_err();
    assert!(err.is::<kind::UnexpectedEof>());
    assert_eq!(err.position(), 0);
}

#[test]
fn unexpected_character_report() {
    let err = parse("2+$").unwrap_err();
    assert_eq!(err.position(), 2);

    let out = render(&err, "2+$");
    assert!(out.contains("unexpected character `$`"));
    assert!(out.contains("I expected to see a term here"));
}

#[test]
fn unmatched_close_paren_report() {
    let err = parse("1+2)").unwrap_err();
    let out = render(&err, "1+2)");
    assert!(out.contains("expected end of input"));
    assert!(out.contains("has no matching `(`"));
}
