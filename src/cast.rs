//! Runtime-checked casts from [`Value`] into the parameter type of a handler.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;
use std::rc::Rc;

use crate::error::{Result, TraversalError};
use crate::value::Value;
use crate::value_type::ValueType;

/// Types a handler can be registered for.
///
/// `value_type` is the type token checked against the property's declared type at
/// registration, `from_value` the cast applied to every value before the handler runs.
pub trait FromValue: Sized {
    fn value_type() -> ValueType;

    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T: FromValue>(value: &Value) -> TraversalError {
    TraversalError::cast(T::value_type(), value.value_type())
}

impl FromValue for Value {
    fn value_type() -> ValueType {
        ValueType::Any
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(&value))
    }
}

impl FromValue for i64 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_int().ok_or_else(|| mismatch::<Self>(&value))
    }
}

impl FromValue for f64 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_float().ok_or_else(|| mismatch::<Self>(&value))
    }
}

impl FromValue for String {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::list_of(T::value_type())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn value_type() -> ValueType {
        ValueType::map_of(T::value_type())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn value_type() -> ValueType {
        ValueType::map_of(T::value_type())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Handler parameter for an arbitrary Rust type stored as [`Value::Opaque`].
///
/// Shares the payload with the value it was cast from.
#[derive(Debug)]
pub struct Opaque<T>(pub Rc<T>);

impl<T> Deref for Opaque<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Any> FromValue for Opaque<T> {
    fn value_type() -> ValueType {
        ValueType::opaque::<T>()
    }

    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Opaque(opaque) => opaque
                .downcast_rc::<T>()
                .map(Opaque)
                .ok_or_else(|| mismatch::<Self>(&value)),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Street(String);

    #[test]
    fn test_scalar_casts() {
        assert_eq!(i64::from_value(Value::Int(7)), Ok(7));
        assert_eq!(String::from_value(Value::from("Ada")), Ok("Ada".to_string()));
        assert_eq!(
            bool::from_value(Value::Int(1)),
            Err(TraversalError::InvalidCast {
                expected: ValueType::Bool,
                found: ValueType::Int,
            })
        );
    }

    #[test]
    fn test_list_cast_checks_elements() {
        let words = Value::from(vec!["a", "b"]);
        assert_eq!(Vec::<String>::from_value(words), Ok(vec!["a".to_string(), "b".to_string()]));

        let mixed = Value::List(vec![Value::from("a"), Value::Int(1)]);
        assert_eq!(
            Vec::<String>::from_value(mixed),
            Err(TraversalError::InvalidCast {
                expected: ValueType::Text,
                found: ValueType::Int,
            })
        );
    }

    #[test]
    fn test_map_casts() {
        let scores = Value::from(BTreeMap::from([("math".to_string(), 90), ("art".to_string(), 70)]));

        let as_hash = HashMap::<String, i64>::from_value(scores.clone()).unwrap();
        assert_eq!(as_hash.get("math"), Some(&90));

        assert!(Vec::<Value>::from_value(scores).is_err());
    }

    #[test]
    fn test_opaque_cast_shares_payload() {
        let value = Value::opaque(Street("Main St".to_string()));
        let street = Opaque::<Street>::from_value(value.clone()).unwrap();
        let Street(name) = &*street;
        assert_eq!(name, "Main St");

        assert!(Opaque::<String>::from_value(value).is_err());
        assert!(Opaque::<Street>::from_value(Value::Int(1)).is_err());
    }
}
