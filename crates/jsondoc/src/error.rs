use thiserror::Error;

pub use crate::parser::{EncodingError, Incomplete, ParseError, ParseErrorKind, SyntaxError};
use crate::value::ValueType;

/// A malformed RFC 6901 pointer. Fatal to the navigation call only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("invalid JSON pointer {0:?}: must be empty or start with '/'")]
    MissingLeadingSlash(String),
    #[error("invalid JSON pointer {0:?}: percent-decoded fragment is not UTF-8")]
    InvalidEncoding(String),
}

/// Misuse of a builder. These are programmer errors, not data errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("value must be {expected} or null, found {found}")]
    VariantMismatch {
        expected: ValueType,
        found: ValueType,
    },
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot build on a {0} value, expected object or array")]
    NotAContainer(ValueType),
}

/// An unsigned integer above `i64::MAX`, which no [`Number`](crate::Number)
/// variant holds exactly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("number out of range: {0}")]
pub struct NumberOutOfRange(pub u64);

/// Returned by the strict `require*` accessors when nothing resolves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing JSON value at {at:?}")]
pub struct MissingError {
    pub at: String,
}

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Missing(#[from] MissingError),
    #[error(transparent)]
    Number(#[from] NumberOutOfRange),
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
