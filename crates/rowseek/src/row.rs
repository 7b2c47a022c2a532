//! The [`Row`] trait: field access for anything the table can show.
//!
//! The pipeline is generic over row shape. It only ever asks a row for the
//! value of a named field, or for all of its values when a search has no
//! configured field set.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value as JsonValue};

use crate::value::{Cell, Number, Value};

/// Trait for types that can flow through the query pipeline.
///
/// Implemented here for JSON objects and string-keyed maps of [`Cell`]s.
/// Typed structs implement it by hand:
///
/// ```
/// use rowseek::{Number, Row, Value};
///
/// struct User {
///     name: String,
///     age: u32,
///     manager: Option<String>,
/// }
///
/// impl Row for User {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::String(&self.name),
///             "age" => Value::Number(Number::from(self.age)),
///             "manager" => self.manager.as_deref().map_or(Value::None, Value::String),
///             _ => Value::None,
///         }
///     }
///
///     fn values(&self) -> Vec<Value<'_>> {
///         ["name", "age", "manager"].iter().map(|f| self.field(f)).collect()
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value of a field, or [`Value::None`] when the row has no
    /// such field or it is null.
    fn field(&self, name: &str) -> Value<'_>;

    /// Returns every field value of the row, in the row's own field order.
    ///
    /// Used by free-text search when no searchable fields are configured.
    fn values(&self) -> Vec<Value<'_>>;
}

/// Maps a JSON value onto the pipeline's value model.
pub fn json_value(value: &JsonValue) -> Value<'_> {
    match value {
        JsonValue::Null => Value::None,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => json_number(n).map_or(Value::Other, Value::Number),
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(_) | JsonValue::Object(_) => Value::Other,
    }
}

fn json_number(n: &serde_json::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Some(Number::U64(u))
    } else {
        n.as_f64().map(Number::F64)
    }
}

impl Row for Map<String, JsonValue> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, json_value)
    }

    fn values(&self) -> Vec<Value<'_>> {
        self.values().map(json_value).collect()
    }
}

/// Non-object JSON values behave as rows without fields.
impl Row for JsonValue {
    fn field(&self, name: &str) -> Value<'_> {
        match self {
            JsonValue::Object(map) => map.field(name),
            _ => Value::None,
        }
    }

    fn values(&self) -> Vec<Value<'_>> {
        match self {
            JsonValue::Object(map) => Row::values(map),
            _ => Vec::new(),
        }
    }
}

impl Row for BTreeMap<String, Cell> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, Cell::value)
    }

    fn values(&self) -> Vec<Value<'_>> {
        self.values().map(Cell::value).collect()
    }
}

impl<S: BuildHasher> Row for HashMap<String, Cell, S> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, Cell::value)
    }

    fn values(&self) -> Vec<Value<'_>> {
        self.values().map(Cell::value).collect()
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }

    fn values(&self) -> Vec<Value<'_>> {
        (**self).values()
    }
}
