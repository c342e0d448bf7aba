//! Read-side navigation and typed extraction over [`Value`].
//!
//! Lookups never fail: a missing key, an out-of-range index or navigation
//! into a scalar yields the [`Value::Unknown`] sentinel, and looking anything
//! up on `Unknown` yields `Unknown` again. Only malformed pointer text is an
//! error. The `require*` methods turn a miss into a [`MissingError`] for
//! callers that prefer `?` over sentinel checks.
use std::{borrow::Cow, fmt::Display, ops::Index, sync::LazyLock};

use crate::{
    error::{MissingError, PointerError},
    number::Number,
    pointer::{JsonPointer, Segment},
    value::{Array, Map, UNKNOWN, Value},
};

static EMPTY_MAP: LazyLock<Map> = LazyLock::new(Map::new);
static EMPTY_ARRAY: Array = Array::new();

/// A type that can address a child of a [`Value`].
///
/// Keys resolve against objects and indices against arrays. A key that is a
/// canonical decimal number (no sign, no leading zeros) also resolves against
/// an array, and an index resolves against an object member whose name is
/// its decimal text.
pub trait ValueIndex {
    /// Returns the addressed child, or `None` if it does not exist.
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value>;
}

/// Parses `key` as an array index.
fn array_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    let canonical = match bytes {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        _ => bytes.iter().all(u8::is_ascii_digit),
    };
    if canonical { key.parse().ok() } else { None }
}

impl ValueIndex for str {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Object(map) => map.get(self),
            Value::Array(items) => array_index(self).and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

impl ValueIndex for String {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(value)
    }
}

impl ValueIndex for usize {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Array(items) => items.get(*self),
            Value::Object(map) => map.get(itoa::Buffer::new().format(*self)),
            _ => None,
        }
    }
}

impl ValueIndex for Segment {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match self {
            Segment::Key(key) => key.index_into(value),
            Segment::Index(i) => i.index_into(value),
        }
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (**self).index_into(value)
    }
}

/// Looks up a child; a miss yields [`Value::Unknown`] instead of panicking.
///
/// ```
/// let doc = jsondoc::parse(r#"{"a":[10,20]}"#).unwrap();
/// assert_eq!(doc["a"][1].as_i64(), Some(20));
/// assert!(doc["b"][0]["c"].is_unknown());
/// ```
impl<I: ValueIndex> Index<I> for Value {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        self.get(index)
    }
}

impl Value {
    /// Returns the child addressed by `index`, or [`Value::Unknown`].
    #[must_use]
    pub fn get<I: ValueIndex>(&self, index: I) -> &Value {
        index.index_into(self).unwrap_or(&UNKNOWN)
    }

    /// Resolves RFC 6901 pointer text against this value.
    ///
    /// # Errors
    ///
    /// Returns a [`PointerError`] if `pointer` is not valid pointer text. A
    /// pointer that does not resolve is not an error; it yields
    /// [`Value::Unknown`].
    ///
    /// ```
    /// let doc = jsondoc::parse(r#"{"baz":[1,"one"]}"#).unwrap();
    /// assert_eq!(doc.at("/baz/1").unwrap().as_str(), Some("one"));
    /// assert!(doc.at("/missing").unwrap().is_unknown());
    /// assert!(doc.at("bad").is_err());
    /// ```
    pub fn at(&self, pointer: &str) -> Result<&Value, PointerError> {
        Ok(self.at_pointer(&JsonPointer::parse(pointer)?))
    }

    /// Resolves an already parsed pointer.
    #[must_use]
    pub fn at_pointer(&self, pointer: &JsonPointer) -> &Value {
        let mut current = self;
        for segment in pointer {
            current = current.get(segment);
            if current.is_unknown() {
                break;
            }
        }
        current
    }

    /// Like [`get`](Self::get), but a miss is an error.
    ///
    /// # Errors
    ///
    /// [`MissingError`] naming `index` if nothing resolves.
    pub fn require<I: ValueIndex + Display>(&self, index: I) -> Result<&Value, MissingError> {
        match index.index_into(self) {
            Some(v) => Ok(v),
            None => Err(MissingError {
                at: index.to_string(),
            }),
        }
    }

    /// Like [`at`](Self::at), but a miss is an error.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Pointer`] for malformed pointer text and
    /// [`crate::Error::Missing`] if the pointer does not resolve.
    pub fn require_at(&self, pointer: &str) -> crate::Result<&Value> {
        let parsed = JsonPointer::parse(pointer)?;
        let found = self.at_pointer(&parsed);
        if found.is_unknown() {
            return Err(MissingError {
                at: pointer.to_owned(),
            }
            .into());
        }
        Ok(found)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The integer payload. Floats are not truncated: `1.0` yields `None`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    /// The integer payload if it fits in 32 bits.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        self.as_number().and_then(|n| n.as_i32())
    }

    /// Any number, widened to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.as_str().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_bool_or(&self, fallback: bool) -> bool {
        self.as_bool().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_number_or(&self, fallback: Number) -> Number {
        self.as_number().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_i64_or(&self, fallback: i64) -> i64 {
        self.as_i64().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_i32_or(&self, fallback: i32) -> i32 {
        self.as_i32().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_f64_or(&self, fallback: f64) -> f64 {
        self.as_f64().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_object_or<'a>(&'a self, fallback: &'a Map) -> &'a Map {
        self.as_object().unwrap_or(fallback)
    }

    #[must_use]
    pub fn as_array_or<'a>(&'a self, fallback: &'a Array) -> &'a Array {
        self.as_array().unwrap_or(fallback)
    }

    /// The object payload, or a shared empty object.
    #[must_use]
    pub fn as_object_or_empty(&self) -> &Map {
        self.as_object().unwrap_or(&EMPTY_MAP)
    }

    /// The array payload, or a shared empty array.
    #[must_use]
    pub fn as_array_or_empty(&self) -> &Array {
        self.as_array().unwrap_or(&EMPTY_ARRAY)
    }

    /// A string's own text, the JSON text of any other known value, or
    /// `fallback` for [`Value::Unknown`].
    ///
    /// ```
    /// use jsondoc::Value;
    ///
    /// assert_eq!(Value::from("hi").as_text_or("-"), "hi");
    /// assert_eq!(Value::from(1.5).as_text_or("-"), "1.5");
    /// assert_eq!(Value::Unknown.as_text_or("-"), "-");
    /// ```
    #[must_use]
    pub fn as_text_or<'a>(&'a self, fallback: &'a str) -> Cow<'a, str> {
        match self {
            Self::String(s) => Cow::Borrowed(s),
            Self::Unknown => Cow::Borrowed(fallback),
            other => Cow::Owned(other.write()),
        }
    }

    /// `self`, unless it is [`Value::Unknown`].
    #[must_use]
    pub fn known_or<'a>(&'a self, fallback: &'a Value) -> &'a Value {
        if self.is_unknown() { fallback } else { self }
    }

    /// `self`, unless it is [`Value::Unknown`] or [`Value::Null`].
    #[must_use]
    pub fn known_non_null_or<'a>(&'a self, fallback: &'a Value) -> &'a Value {
        if self.is_unknown() || self.is_null() {
            fallback
        } else {
            self
        }
    }
}
