use ariadne::{Fmt, Label, Report, ReportKind};
use exprfold_error::{ErrorKind, EXPR};
use std::{any::Any, fmt, ops::Range};

/// An error that can occur while folding constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// A constant divisor evaluated to zero.
    DivisionByZero,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => f.write_str("division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}

// manual ErrorKind implementation, since the derive only supports structs
impl ErrorKind for EvalError {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        let offset = spans.first().map_or(0, |span| span.start);
        let labels = spans.iter()
            .cloned()
            .map(|span| {
                Label::new((src_id, span))
                    .with_message(format!("this {} divides by zero", "expression".fg(EXPR)))
                    .with_color(EXPR)
            });

        let mut builder = Report::build(ReportKind::Error, src_id, offset)
            .with_message(self.to_string())
            .with_labels(labels);
        match self {
            Self::DivisionByZero => {
                builder.set_help("the divisors of a division must not evaluate to `0`");
            },
        }
        builder.finish()
    }
}
