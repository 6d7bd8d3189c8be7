use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "json")]
use crate::error::{Result, TraversalError};
use crate::value_type::ValueType;

/// A value found on the object graph while walking a property path.
///
/// Absent values are modelled as `Option::None` by the callers, never as a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Opaque(OpaqueValue),
}

impl Value {
    /// Wrap an arbitrary Rust value, keeping its `TypeId` for later downcasts.
    pub fn opaque<T: Any>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }

    /// Runtime type of this value.
    ///
    /// Containers report their element type when every element agrees, `Any` otherwise.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::List(items) => ValueType::list_of(common_type(items.iter())),
            Value::Map(entries) => ValueType::map_of(common_type(entries.values())),
            Value::Opaque(opaque) => opaque.value_type(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Downcast an opaque payload to `T`.
    pub fn as_opaque<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(opaque) => opaque.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Build a value from a JSON document.
    ///
    /// `null` maps to `None` and `null` object members are left out, as an absent member
    /// reads the same to a walker. A `null` array element has no place in a list without
    /// shifting the indices after it, so it fails with [`TraversalError::NullListElement`].
    #[cfg(feature = "json")]
    pub fn from_json(json: serde_json::Value) -> Result<Option<Value>> {
        use serde_json::Value as Json;

        let value = match json {
            Json::Null => return Ok(None),
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => match n.as_f64() {
                    Some(f) => Value::Float(f),
                    None => return Ok(None),
                },
            },
            Json::String(s) => Value::Text(s),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        Value::from_json(item)?.ok_or(TraversalError::NullListElement { index })
                    })
                    .collect::<Result<_>>()?,
            ),
            Json::Object(members) => {
                let mut entries = BTreeMap::new();
                for (key, member) in members {
                    if let Some(value) = Value::from_json(member)? {
                        entries.insert(key, value);
                    }
                }
                Value::Map(entries)
            }
        };
        Ok(Some(value))
    }
}

fn common_type<'a>(mut values: impl Iterator<Item = &'a Value>) -> ValueType {
    let Some(first) = values.next().map(Value::value_type) else {
        return ValueType::Any;
    };
    if values.all(|v| v.value_type() == first) {
        first
    } else {
        ValueType::Any
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Type-tagged payload for values the built-in variants don't cover.
///
/// Clones share the payload. Equality is identity of the payload.
#[derive(Clone)]
pub struct OpaqueValue {
    inner: Rc<dyn Any>,
    type_id: TypeId,
    type_name: &'static str,
}

impl OpaqueValue {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        ValueType::Opaque {
            id: self.type_id,
            name: self.type_name,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if self.type_id == TypeId::of::<T>() {
            self.inner.downcast_ref::<T>()
        } else {
            None
        }
    }

    pub(crate) fn downcast_rc<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.inner).downcast::<T>().ok()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}
