//! JSON value types.
//!
//! This module defines the [`Value`] enum, the immutable tree produced by the
//! parser and by builder snapshots, together with its [`ValueType`]
//! discriminant and the conversions into it.
use indexmap::IndexMap;

use crate::{error::NumberOutOfRange, number::Number};

/// An object: string keys in insertion order.
pub type Map = IndexMap<String, Value>;
/// An array of values.
pub type Array = Vec<Value>;

/// The sentinel handed out by lookups that miss.
pub(crate) static UNKNOWN: Value = Value::Unknown;

/// A JSON value as defined by [RFC 8259], plus the [`Unknown`] miss sentinel.
///
/// The `Value` enum can represent any JSON data type:
///
/// - Null
/// - Boolean
/// - Number
/// - String
/// - Array
/// - Object
///
/// Object keys keep the order in which they were read or inserted, and that
/// order is what the writer emits.
///
/// # Examples
///
/// ```
/// use jsondoc::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::from("value"));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
/// [`Unknown`]: Value::Unknown
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// A JSON `null`.
    #[default]
    Null,
    /// A JSON boolean.
    Boolean(bool),
    /// A JSON number.
    Number(Number),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Array),
    /// A JSON object with insertion-ordered keys.
    Object(Map),
    /// Result of a lookup that did not resolve: a missing key, an index out
    /// of range, or navigation into a scalar. Not part of any document.
    Unknown,
}

/// The variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// See [`Value::Unknown`].
    Unknown,
    /// See [`Value::Null`].
    Null,
    /// See [`Value::Boolean`].
    Boolean,
    /// See [`Value::Number`].
    Number,
    /// See [`Value::String`].
    String,
    /// See [`Value::Array`].
    Array,
    /// See [`Value::Object`].
    Object,
}

impl ValueType {
    /// Lowercase name used in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Number(Number::from(v))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, f32, f64);

impl TryFrom<u64> for Value {
    type Error = NumberOutOfRange;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        Number::try_from(v).map(Self::Number)
    }
}

impl TryFrom<usize> for Value {
    type Error = NumberOutOfRange;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        Number::try_from(v).map(Self::Number)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// The variant tag of this value.
    ///
    /// ```
    /// use jsondoc::{Value, ValueType};
    ///
    /// assert_eq!(Value::from(1).type_of(), ValueType::Number);
    /// assert_eq!(Value::Unknown.type_of(), ValueType::Unknown);
    /// ```
    #[must_use]
    pub fn type_of(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) => ValueType::Object,
            Self::Unknown => ValueType::Unknown,
        }
    }

    /// Returns `true` if the value is the [`Unknown`] miss sentinel.
    ///
    /// [`Unknown`]: Value::Unknown
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsondoc::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    ///
    /// # Examples
    ///
    /// ```
    /// use jsondoc::Value;
    ///
    /// assert!(Value::from(42).is_number());
    /// assert!(Value::from(4.2).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    ///
    /// # Examples
    ///
    /// ```
    /// use jsondoc::{Map, Value};
    ///
    /// let v = Value::Object(Map::new());
    /// assert!(v.is_object());
    /// assert!(!Value::Null.is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Renders the value as compact JSON text.
    ///
    /// The [`Unknown`] sentinel renders as an empty string.
    ///
    /// [`Unknown`]: Value::Unknown
    #[must_use]
    pub fn write(&self) -> String {
        self.to_string()
    }

    /// Writes the compact JSON text of this value into `out`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_to<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.write().as_bytes())
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        crate::writer::write_root(f, self)
    }
}

impl core::str::FromStr for Value {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl TryFrom<&[u8]> for Value {
    type Error = crate::ParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        crate::parse(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{Map, Value, ValueType};
    use crate::Number;

    #[test]
    fn conversions_pick_matching_variants() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("x"), Value::String("x".into()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Number(Number::I32(3)));
        assert_eq!(Value::from(vec![Value::Null]).type_of(), ValueType::Array);
    }

    #[test]
    fn wide_unsigned_integers_stay_integers() {
        assert_eq!(Value::try_from(42_u64), Ok(Value::Number(Number::I32(42))));
        assert_eq!(
            Value::try_from(usize::MAX).map_err(|e| e.to_string()),
            Err(format!("number out of range: {}", usize::MAX))
        );
        assert!(Value::try_from(u64::MAX).is_err());
    }

    #[test]
    fn collecting_pairs_keeps_insertion_order() {
        let v: Value = [("z", Value::from(1)), ("a", Value::from(2))]
            .into_iter()
            .collect();
        let Value::Object(map) = v else {
            panic!("expected object");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), ["z", "a"]);
    }

    #[test]
    fn default_is_null() {
        assert!(Value::default().is_null());
        assert!(Value::Object(Map::new()).is_object());
        assert_eq!(ValueType::Boolean.to_string(), "boolean");
    }
}
