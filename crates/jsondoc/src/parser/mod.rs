//! The JSON reader.
//!
//! A recursive-descent reader over a byte slice that produces a complete
//! [`Value`] tree in one call. The first significant byte of every value is
//! classified through a 256-entry table and dispatched to the matching
//! reader; whitespace (space, tab, CR, LF) is skipped by the cursor.
//!
//! A [`Parser`] lives for exactly one call: the public entry points build
//! one, run it over the whole input and drop it, so no cursor state or
//! scratch storage is ever shared between parses.
//!
//! # Leniency
//!
//! [`parse_object`] and [`parse_array`] accept a bare `null` where the
//! container is expected and return an empty container for it. This is a
//! deliberate deviation from strict JSON.

mod cursor;
mod error;
mod numbers;
mod strings;

#[cfg(test)]
mod tests;

use cursor::Cursor;
pub use error::{EncodingError, Incomplete, ParseError, ParseErrorKind, SyntaxError};

use crate::{
    options::ParserOptions,
    value::{Array, Map, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Invalid,
    String,
    Number,
    Null,
    Boolean,
    Array,
    Object,
}

/// Classification of the first byte of a value.
static CLASSES: [Class; 256] = classes();

const fn classes() -> [Class; 256] {
    let mut table = [Class::Invalid; 256];
    table[b'"' as usize] = Class::String;
    table[b'-' as usize] = Class::Number;
    let mut d = b'0';
    while d <= b'9' {
        table[d as usize] = Class::Number;
        d += 1;
    }
    table[b't' as usize] = Class::Boolean;
    table[b'f' as usize] = Class::Boolean;
    table[b'n' as usize] = Class::Null;
    table[b'[' as usize] = Class::Array;
    table[b'{' as usize] = Class::Object;
    table
}

/// Parses `input` as exactly one JSON value followed only by whitespace.
///
/// # Errors
///
/// Returns a [`ParseError`] on any grammar violation, invalid escape or
/// UTF-8 sequence, or truncated input.
///
/// # Examples
///
/// ```rust
/// let doc = jsondoc::parse(r#"{"baz":[1,"one"]}"#).unwrap();
/// assert_eq!(doc.at("/baz/1").unwrap().as_str(), Some("one"));
/// ```
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    parse_with_options(input, ParserOptions::default())
}

/// Like [`parse`], with explicit [`ParserOptions`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options(
    input: impl AsRef<[u8]>,
    options: ParserOptions,
) -> Result<Value, ParseError> {
    run(input.as_ref(), options, Parser::read_value)
}

/// Parses `input` as an object. A bare `null` yields an empty object.
///
/// # Errors
///
/// See [`parse`]; additionally fails if the root is neither an object nor
/// `null`.
pub fn parse_object(input: impl AsRef<[u8]>) -> Result<Map, ParseError> {
    run(input.as_ref(), ParserOptions::default(), Parser::read_object_or_null)
}

/// Parses `input` as an array. A bare `null` yields an empty array.
///
/// # Errors
///
/// See [`parse`]; additionally fails if the root is neither an array nor
/// `null`.
pub fn parse_array(input: impl AsRef<[u8]>) -> Result<Array, ParseError> {
    run(input.as_ref(), ParserOptions::default(), Parser::read_array_or_null)
}

fn run<'i, T>(
    input: &'i [u8],
    options: ParserOptions,
    read_root: impl FnOnce(&mut Parser<'i>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    log::trace!("parsing {} bytes", input.len());
    let mut parser = Parser::new(input, options);
    let result = read_root(&mut parser).and_then(|root| parser.finish().map(|()| root));
    if let Err(err) = &result {
        log::debug!("parse failed: {err}");
    }
    result
}

/// Single-use reader state for one input buffer.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], options: ParserOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            options,
            depth: 0,
        }
    }

    fn error_at(&self, offset: usize, kind: impl Into<ParseErrorKind>) -> ParseError {
        ParseError::new(self.cursor.input(), offset, kind)
    }

    fn error_here(&self, kind: impl Into<ParseErrorKind>) -> ParseError {
        self.error_at(self.cursor.position(), kind)
    }

    /// Checks what follows the root value.
    fn finish(&mut self) -> Result<(), ParseError> {
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(self.depth, 0, "unbalanced container depth after root value");

        if self.options.allow_trailing_content {
            return Ok(());
        }
        self.cursor.skip_whitespace();
        if self.cursor.is_at_end() {
            Ok(())
        } else {
            Err(self.error_here(SyntaxError::TrailingContent))
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error_here(SyntaxError::RecursionLimitExceeded));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn read_value(&mut self) -> Result<Value, ParseError> {
        let Some(b) = self.cursor.peek_token() else {
            return Err(self.error_here(Incomplete::Input));
        };
        match CLASSES[usize::from(b)] {
            Class::String => {
                self.cursor.advance();
                self.read_string_body().map(Value::String)
            }
            Class::Number => self.read_number().map(Value::Number),
            Class::Null => self.read_literal(b"null").map(|()| Value::Null),
            Class::Boolean if b == b't' => self.read_literal(b"true").map(|()| Value::Boolean(true)),
            Class::Boolean => self.read_literal(b"false").map(|()| Value::Boolean(false)),
            Class::Array => self.read_array().map(Value::Array),
            Class::Object => self.read_object().map(Value::Object),
            Class::Invalid => Err(self.error_here(SyntaxError::UnexpectedCharacter(char::from(b)))),
        }
    }

    /// Matches `expected` byte for byte.
    fn read_literal(&mut self, expected: &'static [u8]) -> Result<(), ParseError> {
        let start = self.cursor.position();
        match self.cursor.take(expected.len()) {
            Some(bytes) if bytes == expected => Ok(()),
            Some(_) => Err(self.error_at(start, SyntaxError::InvalidLiteral)),
            None if expected.starts_with(self.cursor.rest()) => {
                Err(self.error_at(start + self.cursor.remaining(), Incomplete::Input))
            }
            None => Err(self.error_at(start, SyntaxError::InvalidLiteral)),
        }
    }

    /// Reads an array; the cursor sits on `[`.
    fn read_array(&mut self) -> Result<Array, ParseError> {
        self.cursor.advance();
        self.enter()?;
        let mut items = Array::new();
        if self.cursor.peek_token() == Some(b']') {
            self.cursor.advance();
            self.leave();
            return Ok(items);
        }
        loop {
            if self.cursor.peek_token().is_none() {
                return Err(self.error_here(Incomplete::Array));
            }
            items.push(self.read_value()?);
            match self.cursor.peek_token() {
                Some(b',') => self.cursor.advance(),
                Some(b']') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => return Err(self.error_here(SyntaxError::ExpectedCommaOrBracket)),
                None => return Err(self.error_here(Incomplete::Array)),
            }
        }
        self.leave();
        Ok(items)
    }

    /// Reads an object; the cursor sits on `{`. A repeated key keeps its
    /// first position and takes the last value.
    fn read_object(&mut self) -> Result<Map, ParseError> {
        self.cursor.advance();
        self.enter()?;
        let mut map = Map::new();
        if self.cursor.peek_token() == Some(b'}') {
            self.cursor.advance();
            self.leave();
            return Ok(map);
        }
        loop {
            let key = self.read_key()?;
            match self.cursor.peek_token() {
                Some(b':') => self.cursor.advance(),
                Some(_) => return Err(self.error_here(SyntaxError::ExpectedColon)),
                None => return Err(self.error_here(Incomplete::Object)),
            }
            if self.cursor.peek_token().is_none() {
                return Err(self.error_here(Incomplete::Object));
            }
            let value = self.read_value()?;
            map.insert(key, value);
            match self.cursor.peek_token() {
                Some(b',') => self.cursor.advance(),
                Some(b'}') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => return Err(self.error_here(SyntaxError::ExpectedCommaOrBrace)),
                None => return Err(self.error_here(Incomplete::Object)),
            }
        }
        self.leave();
        Ok(map)
    }

    fn read_key(&mut self) -> Result<String, ParseError> {
        match self.cursor.peek_token() {
            Some(b'"') => {
                self.cursor.advance();
                self.read_string_body()
            }
            Some(_) => Err(self.error_here(SyntaxError::ExpectedString)),
            None => Err(self.error_here(Incomplete::Object)),
        }
    }

    fn read_object_or_null(&mut self) -> Result<Map, ParseError> {
        match self.cursor.peek_token() {
            Some(b'{') => self.read_object(),
            Some(b'n') => self.read_literal(b"null").map(|()| Map::new()),
            Some(_) => Err(self.error_here(SyntaxError::ExpectedObject)),
            None => Err(self.error_here(Incomplete::Input)),
        }
    }

    fn read_array_or_null(&mut self) -> Result<Array, ParseError> {
        match self.cursor.peek_token() {
            Some(b'[') => self.read_array(),
            Some(b'n') => self.read_literal(b"null").map(|()| Array::new()),
            Some(_) => Err(self.error_here(SyntaxError::ExpectedArray)),
            None => Err(self.error_here(Incomplete::Input)),
        }
    }
}
