pub mod kind;

pub use exprfold_error::{Error, ErrorKind};

/// The error returned by every parsing function: a spanned [`Error`] whose kind is one of the
/// types in [`kind`].
pub type ParseError = Error;
