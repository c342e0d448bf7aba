//! Mutable construction of JSON documents.
//!
//! [`ObjectBuilder`] and [`ArrayBuilder`] own their entries, which are either
//! finished [`Value`]s or nested builders. [`to_json`](ObjectBuilder::to_json)
//! assembles a [`Value`] snapshot, caches it, and hands out a shared borrow
//! of the cache; any mutation drops the cache. A snapshot that was cloned out
//! is an independent tree and never observes later mutations.
//!
//! ```
//! use jsondoc::Builder;
//!
//! let mut doc = Builder::object();
//! doc.put("a", 1);
//! doc.put_array("b").add(1).add("x");
//! assert_eq!(doc.to_json().write(), r#"{"a":1,"b":[1,"x"]}"#);
//! ```
use core::{cell::OnceCell, fmt};

use indexmap::IndexMap;

use crate::{
    error::BuildError,
    value::{Array, Map, Value, ValueType},
};

/// Entry point for building documents.
#[derive(Debug, Clone)]
pub enum Builder {
    /// Builds an object.
    Object(ObjectBuilder),
    /// Builds an array.
    Array(ArrayBuilder),
}

impl Builder {
    /// An empty object builder.
    #[must_use]
    pub fn object() -> ObjectBuilder {
        ObjectBuilder::new()
    }

    /// An empty array builder.
    #[must_use]
    pub fn array() -> ArrayBuilder {
        ArrayBuilder::new()
    }

    /// Starts a builder from an existing object or array, for modification.
    ///
    /// # Errors
    ///
    /// [`BuildError::NotAContainer`] for any other variant.
    pub fn from_value(value: Value) -> Result<Self, BuildError> {
        match value {
            Value::Object(map) => Ok(Self::Object(ObjectBuilder::from(map))),
            Value::Array(items) => Ok(Self::Array(ArrayBuilder::from(items))),
            other => Err(BuildError::NotAContainer(other.type_of())),
        }
    }

    /// The current snapshot of whichever builder this is.
    #[must_use]
    pub fn to_json(&self) -> &Value {
        match self {
            Self::Object(b) => b.to_json(),
            Self::Array(b) => b.to_json(),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Object(b) => b.into_value(),
            Self::Array(b) => b.into_value(),
        }
    }
}

impl TryFrom<Value> for Builder {
    type Error = BuildError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_json(), f)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Value(Value),
    Object(ObjectBuilder),
    Array(ArrayBuilder),
}

impl Node {
    /// `Unknown` is not storable; it becomes `null`.
    fn scalar(value: Value) -> Self {
        match value {
            Value::Unknown => Self::Value(Value::Null),
            v => Self::Value(v),
        }
    }

    fn container(value: Value, expected: ValueType) -> Result<Self, BuildError> {
        let found = value.type_of();
        if found == expected || found == ValueType::Null {
            Ok(Self::Value(value))
        } else {
            Err(BuildError::VariantMismatch { expected, found })
        }
    }

    fn snapshot(&self) -> &Value {
        match self {
            Self::Value(v) => v,
            Self::Object(b) => b.to_json(),
            Self::Array(b) => b.to_json(),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Value(v) => v,
            Self::Object(b) => b.into_value(),
            Self::Array(b) => b.into_value(),
        }
    }

    /// Borrows the nested builder a fresh node was created with.
    fn nested<B: Nested>(&mut self) -> &mut B {
        let Some(child) = B::from_node(self) else {
            unreachable!("node was created holding this builder")
        };
        child
    }
}

trait Nested {
    fn into_node(self) -> Node;
    fn from_node(node: &mut Node) -> Option<&mut Self>;
}

impl Nested for ObjectBuilder {
    fn into_node(self) -> Node {
        Node::Object(self)
    }

    fn from_node(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::Object(b) => Some(b),
            _ => None,
        }
    }
}

impl Nested for ArrayBuilder {
    fn into_node(self) -> Node {
        Node::Array(self)
    }

    fn from_node(node: &mut Node) -> Option<&mut Self> {
        match node {
            Node::Array(b) => Some(b),
            _ => None,
        }
    }
}

/// Builds a JSON object. Keys keep the position of their first insertion.
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    entries: IndexMap<String, Node>,
    snapshot: OnceCell<Value>,
}

impl ObjectBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: impl Into<String>, node: Node) -> &mut Node {
        self.snapshot.take();
        let (index, _) = self.entries.insert_full(key.into(), node);
        &mut self.entries[index]
    }

    /// Sets `key` to a scalar or a finished value. Putting
    /// [`Value::Unknown`] stores `null`.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.insert(key, Node::scalar(value.into()));
        self
    }

    pub fn put_null(&mut self, key: impl Into<String>) -> &mut Self {
        self.put(key, Value::Null)
    }

    /// Sets `key` to a new empty object and returns its builder.
    pub fn put_object(&mut self, key: impl Into<String>) -> &mut ObjectBuilder {
        self.insert(key, ObjectBuilder::default().into_node()).nested()
    }

    /// Sets `key` to a new empty array and returns its builder.
    pub fn put_array(&mut self, key: impl Into<String>) -> &mut ArrayBuilder {
        self.insert(key, ArrayBuilder::default().into_node()).nested()
    }

    /// Sets `key` to a prebuilt object, or to `null`.
    ///
    /// # Errors
    ///
    /// [`BuildError::VariantMismatch`] if `value` is neither.
    pub fn put_object_value(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<&mut Self, BuildError> {
        let node = Node::container(value, ValueType::Object)?;
        self.insert(key, node);
        Ok(self)
    }

    /// Sets `key` to a prebuilt array, or to `null`.
    ///
    /// # Errors
    ///
    /// [`BuildError::VariantMismatch`] if `value` is neither.
    pub fn put_array_value(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<&mut Self, BuildError> {
        let node = Node::container(value, ValueType::Array)?;
        self.insert(key, node);
        Ok(self)
    }

    /// Removes `key`. Removing an absent key does nothing.
    pub fn delete(&mut self, key: &str) -> &mut Self {
        if self.entries.shift_remove(key).is_some() {
            self.snapshot.take();
        }
        self
    }

    /// The current value at `key`; nested builders are snapshotted.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(Node::snapshot)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the snapshot, assembling it first if anything changed since
    /// the last call.
    pub fn to_json(&self) -> &Value {
        self.snapshot.get_or_init(|| {
            log::trace!("rebuilding object snapshot ({} entries)", self.entries.len());
            Value::Object(
                self.entries
                    .iter()
                    .map(|(k, node)| (k.clone(), node.snapshot().clone()))
                    .collect(),
            )
        })
    }

    /// Consumes the builder without cloning finished entries.
    #[must_use]
    pub fn into_value(mut self) -> Value {
        if let Some(snapshot) = self.snapshot.take() {
            return snapshot;
        }
        Value::Object(
            self.entries
                .into_iter()
                .map(|(k, node)| (k, node.into_value()))
                .collect(),
        )
    }
}

impl From<Map> for ObjectBuilder {
    fn from(map: Map) -> Self {
        Self {
            entries: map.into_iter().map(|(k, v)| (k, Node::Value(v))).collect(),
            snapshot: OnceCell::new(),
        }
    }
}

impl fmt::Display for ObjectBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_json(), f)
    }
}

/// Builds a JSON array.
#[derive(Debug, Clone, Default)]
pub struct ArrayBuilder {
    items: Vec<Node>,
    snapshot: OnceCell<Value>,
}

impl ArrayBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> &mut Node {
        self.snapshot.take();
        self.items.push(node);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Appends a scalar or a finished value. Adding [`Value::Unknown`]
    /// appends `null`.
    pub fn add(&mut self, value: impl Into<Value>) -> &mut Self {
        self.push(Node::scalar(value.into()));
        self
    }

    pub fn add_null(&mut self) -> &mut Self {
        self.add(Value::Null)
    }

    /// Appends a new empty object and returns its builder.
    pub fn add_object(&mut self) -> &mut ObjectBuilder {
        self.push(ObjectBuilder::default().into_node()).nested()
    }

    /// Appends a new empty array and returns its builder.
    pub fn add_array(&mut self) -> &mut ArrayBuilder {
        self.push(ArrayBuilder::default().into_node()).nested()
    }

    /// Appends a prebuilt object, or `null`.
    ///
    /// # Errors
    ///
    /// [`BuildError::VariantMismatch`] if `value` is neither.
    pub fn add_object_value(&mut self, value: Value) -> Result<&mut Self, BuildError> {
        let node = Node::container(value, ValueType::Object)?;
        self.push(node);
        Ok(self)
    }

    /// Appends a prebuilt array, or `null`.
    ///
    /// # Errors
    ///
    /// [`BuildError::VariantMismatch`] if `value` is neither.
    pub fn add_array_value(&mut self, value: Value) -> Result<&mut Self, BuildError> {
        let node = Node::container(value, ValueType::Array)?;
        self.push(node);
        Ok(self)
    }

    /// Removes the element at `index`, shifting later elements down.
    ///
    /// # Errors
    ///
    /// [`BuildError::IndexOutOfRange`] if there is no such element.
    pub fn delete(&mut self, index: usize) -> Result<&mut Self, BuildError> {
        let len = self.items.len();
        if index >= len {
            return Err(BuildError::IndexOutOfRange { index, len });
        }
        self.snapshot.take();
        self.items.remove(index);
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index).map(Node::snapshot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the snapshot, assembling it first if anything changed since
    /// the last call.
    pub fn to_json(&self) -> &Value {
        self.snapshot.get_or_init(|| {
            log::trace!("rebuilding array snapshot ({} items)", self.items.len());
            Value::Array(self.items.iter().map(|node| node.snapshot().clone()).collect())
        })
    }

    #[must_use]
    pub fn into_value(mut self) -> Value {
        if let Some(snapshot) = self.snapshot.take() {
            return snapshot;
        }
        Value::Array(self.items.into_iter().map(Node::into_value).collect())
    }
}

impl From<Array> for ArrayBuilder {
    fn from(items: Array) -> Self {
        Self {
            items: items.into_iter().map(Node::Value).collect(),
            snapshot: OnceCell::new(),
        }
    }
}

impl fmt::Display for ArrayBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_json(), f)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::{ArrayBuilder, Builder, ObjectBuilder};
    use crate::{BuildError, Value, ValueType, parse};

    #[test]
    fn nested_builders_render_in_place() {
        let mut doc = ObjectBuilder::new();
        doc.put("a", 1);
        doc.put_array("b").add(1).add("x");
        doc.put_object("c").put_null("d").put("e", true);
        doc.put("f", 2.5);
        assert_snapshot!(doc.to_string(), @r#"{"a":1,"b":[1,"x"],"c":{"d":null,"e":true},"f":2.5}"#);
    }

    #[test]
    fn nested_builders_in_arrays_and_replaced_keys() {
        let mut list = ArrayBuilder::new();
        list.add_object().put("k", 1);
        list.add_array().add_array().add_null();
        assert_eq!(list.to_json().write(), r#"[{"k":1},[[null]]]"#);

        let mut doc = ObjectBuilder::new();
        doc.put("x", 1).put("y", 2);
        doc.put_array("x").add(true);
        doc.put_object("y").put_array("z");
        assert_eq!(doc.to_json().write(), r#"{"x":[true],"y":{"z":[]}}"#);
    }

    #[test]
    fn reput_keeps_first_position() {
        let mut doc = Builder::object();
        doc.put("a", 1).put("b", 2).put("a", 3);
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(doc.to_json().write(), r#"{"a":3,"b":2}"#);
        doc.delete("a").delete("zzz");
        assert_eq!(doc.to_json().write(), r#"{"b":2}"#);
    }

    #[test]
    fn snapshot_is_cached_until_mutation() {
        let mut doc = Builder::object();
        doc.put("a", 1);
        let first: *const Value = doc.to_json();
        let second: *const Value = doc.to_json();
        assert_eq!(first, second);

        let frozen = doc.to_json().clone();
        doc.put("b", 2);
        assert_eq!(frozen.write(), r#"{"a":1}"#);
        assert_eq!(doc.to_json().write(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn container_values_reject_other_variants() {
        let mut doc = Builder::object();
        assert_eq!(
            doc.put_object_value("o", Value::from(1)).unwrap_err(),
            BuildError::VariantMismatch {
                expected: ValueType::Object,
                found: ValueType::Number,
            }
        );
        doc.put_object_value("o", Value::Null).unwrap();
        doc.put_array_value("a", parse("[1,2]").unwrap()).unwrap();
        assert!(doc.put_array_value("x", parse("{}").unwrap()).is_err());
        assert_eq!(doc.to_json().write(), r#"{"o":null,"a":[1,2]}"#);

        let mut list = Builder::array();
        list.add_object_value(parse(r#"{"k":"v"}"#).unwrap()).unwrap();
        assert!(list.add_array_value(Value::from("s")).is_err());
        list.add_array_value(Value::Null).unwrap();
        assert_eq!(list.to_string(), r#"[{"k":"v"},null]"#);
    }

    #[test]
    fn array_delete_checks_range() {
        let mut list = ArrayBuilder::new();
        list.add(1).add(2).add_null();
        list.add_array().add(3);
        list.add_object().put("k", Value::Unknown);
        assert_eq!(list.to_string(), r#"[1,2,null,[3],{"k":null}]"#);
        list.delete(0).unwrap();
        assert_eq!(
            list.delete(9).unwrap_err(),
            BuildError::IndexOutOfRange { index: 9, len: 4 }
        );
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(2), Some(&parse("[3]").unwrap()));
        assert_eq!(list.into_value().write(), r#"[2,null,[3],{"k":null}]"#);
    }

    #[test]
    fn modify_existing_document() {
        let doc = parse(r#"{"a":1,"b":2}"#).unwrap();
        let Ok(Builder::Object(mut b)) = Builder::from_value(doc.clone()) else {
            panic!("expected object builder");
        };
        b.delete("a").put("c", 3);
        assert_eq!(b.to_string(), r#"{"b":2,"c":3}"#);
        assert_eq!(doc.write(), r#"{"a":1,"b":2}"#);
        assert_eq!(
            Builder::from_value(Value::from("s")).unwrap_err(),
            BuildError::NotAContainer(ValueType::String)
        );
    }
}
