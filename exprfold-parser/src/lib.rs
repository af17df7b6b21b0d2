//! Parser for single-line arithmetic expressions over integer literals and single-letter
//! variables.
//!
//! The grammar supports `+`, `-`, `*`, `/`, parentheses, and implicit multiplication by
//! juxtaposition (`2x`, `2(x + 1)`, `xy`). Whitespace is not part of the grammar; callers are
//! expected to remove it before parsing.
//!
//! ```
//! use exprfold_parser::{parse, tree::Expr};
//!
//! let expr = parse("1+2*3").unwrap();
//! assert_eq!(expr, Expr::add(vec![
//!     Expr::value(1),
//!     Expr::mul(vec![Expr::value(2), Expr::value(3)]),
//! ]));
//! ```

pub mod parser;
pub mod tokenizer;
pub mod tree;

use parser::{error::ParseError, Parser};
use tree::Expr;

/// Parses the given whitespace-free text into a flattened expression tree.
///
/// The whole input must form a single expression. Chains of the same associative operator are
/// merged into one n-ary node, so `1+2+3` parses as a single addition of three terms.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let raw = Parser::new(text).try_parse_full()?;
    Ok(raw.flatten())
}
