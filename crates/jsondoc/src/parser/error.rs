use bstr::{BString, ByteSlice};
use thiserror::Error;

/// Bytes of input shown on each side of the error offset.
const CONTEXT_RADIUS: usize = 10;

/// A failed parse: what went wrong, where, and the bytes around it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset} (line {line}, column {column}), near `{context}`")]
pub struct ParseError {
    /// The category and description of the failure.
    pub kind: ParseErrorKind,
    /// Byte offset into the input where the failure was detected.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 1-based byte column of `offset`.
    pub column: usize,
    /// Up to ten bytes on either side of `offset`.
    pub context: BString,
}

impl ParseError {
    pub(crate) fn new(input: &[u8], offset: usize, kind: impl Into<ParseErrorKind>) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = 1 + before.find_iter(b"\n").count();
        let column = match before.rfind_byte(b'\n') {
            Some(nl) => offset - nl,
            None => offset + 1,
        };
        let start = offset.saturating_sub(CONTEXT_RADIUS);
        let end = offset.saturating_add(CONTEXT_RADIUS).min(input.len());
        Self {
            kind: kind.into(),
            offset,
            line,
            column,
            context: BString::from(&input[start..end]),
        }
    }

    /// Returns `true` for malformed grammar.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax(_))
    }

    /// Returns `true` for bad escapes, surrogates or UTF-8.
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Encoding(_))
    }

    /// Returns `true` when the input ended in the middle of a value.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Truncated(_))
    }
}

/// The three failure categories of the reader. All are fatal to the parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("truncated input: {0}")]
    Truncated(#[from] Incomplete),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("expected ':'")]
    ExpectedColon,
    #[error("expected string")]
    ExpectedString,
    #[error("expected ',' or '}}'")]
    ExpectedCommaOrBrace,
    #[error("expected ',' or ']'")]
    ExpectedCommaOrBracket,
    #[error("expected '{{' or null")]
    ExpectedObject,
    #[error("expected '[' or null")]
    ExpectedArray,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("invalid number")]
    InvalidNumber,
    #[error("number out of range")]
    NumberOutOfRange,
    #[error("invalid escape character {0:?}")]
    InvalidEscape(char),
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
    #[error("unexpected trailing content")]
    TrailingContent,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid hex digit {0:?}")]
    InvalidHexDigit(char),
    #[error("invalid surrogate")]
    InvalidSurrogate,
    #[error("invalid unicode character")]
    InvalidUnicodeCharacter,
}

/// What the input ended in the middle of.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    #[error("incomplete string")]
    String,
    #[error("incomplete array")]
    Array,
    #[error("incomplete object")]
    Object,
    #[error("incomplete number")]
    Number,
    #[error("unexpected end of input")]
    Input,
}

#[cfg(test)]
mod tests {
    use super::{Incomplete, ParseError, SyntaxError};

    #[test]
    fn position_and_context() {
        let input = b"{\n  \"key\": tru\n}";
        let err = ParseError::new(input, 11, SyntaxError::InvalidLiteral);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 10);
        assert_eq!(err.context, "{\n  \"key\": tru\n}"[1..].as_bytes());
        assert!(err.is_syntax());
    }

    #[test]
    fn offset_at_end_of_input() {
        let err = ParseError::new(b"[1,", 3, Incomplete::Array);
        assert_eq!((err.line, err.column), (1, 4));
        assert_eq!(
            err.to_string(),
            "truncated input: incomplete array at offset 3 (line 1, column 4), near `[1,`"
        );
        assert!(err.is_truncation());
    }
}
