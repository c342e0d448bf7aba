//! A self-contained JSON document engine.
//!
//! Bytes go through [`parse`] into an immutable [`Value`] tree. Values are
//! read with typed accessors, keyed and indexed lookup, and RFC 6901
//! [`JsonPointer`]s; lookups that miss yield [`Value::Unknown`] rather than
//! failing. New documents are assembled with [`Builder`], and either kind of
//! tree renders back to compact JSON through [`Value::write`] or `Display`.
//!
//! ```rust
//! use jsondoc::{Builder, parse};
//!
//! let doc = parse(r#"{"baz":[1,"one"]}"#).unwrap();
//! assert_eq!(doc.at("/baz/1").unwrap().as_str(), Some("one"));
//! assert!(doc.at("/missing").unwrap().is_unknown());
//!
//! let mut out = Builder::object();
//! out.put("a", 1).put_array("b").add(1).add("x");
//! assert_eq!(out.to_json().write(), r#"{"a":1,"b":[1,"x"]}"#);
//! ```

#![allow(missing_docs)]

mod access;
mod builder;
mod error;
mod number;
mod options;
mod parser;
mod pointer;
mod value;
mod writer;

#[cfg(any(test, feature = "serde"))]
mod serde_impls;


pub use access::ValueIndex;
pub use builder::{ArrayBuilder, Builder, ObjectBuilder};
pub use error::{
    BuildError, EncodingError, Error, Incomplete, MissingError, NumberOutOfRange, ParseError,
    ParseErrorKind, PointerError, Result, SyntaxError,
};
pub use number::Number;
pub use options::ParserOptions;
pub use parser::{parse, parse_array, parse_object, parse_with_options};
pub use pointer::{JsonPointer, Segment, SegmentFrom};
pub use value::{Array, Map, Value, ValueType};

/// Builds a [`JsonPointer`] from a list of keys and indices.
///
/// Non-negative integers become [`Segment::Index`]; strings and negative
/// integers become [`Segment::Key`].
///
/// ```rust
/// use jsondoc::{Segment, pointer};
///
/// let p = pointer!["foo", 0, "a/b"];
/// assert_eq!(
///     p.segments(),
///     [
///         Segment::Key("foo".into()),
///         Segment::Index(0),
///         Segment::Key("a/b".into()),
///     ]
/// );
/// assert_eq!(p.to_string(), "/foo/0/a~1b");
/// ```
#[macro_export]
macro_rules! pointer {
    ( $( $seg:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::SegmentFrom;
        $crate::JsonPointer::from_segments(::std::vec![$($crate::Segment::from_segment($seg)),*])
    }};
}
