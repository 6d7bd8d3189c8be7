use std::any::{Any, TypeId};
use std::fmt;

/// Declared type of a property, and the type token a handler is registered for.
///
/// The only question ever asked of a `ValueType` is [`ValueType::is_assignable_from`]:
/// can a value of one type be handed to something expecting the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Top type, accepts every value.
    Any,
    Bool,
    Int,
    Float,
    Text,
    /// Ordered container of elements.
    List(Box<ValueType>),
    /// Text-keyed mapping to values.
    Map(Box<ValueType>),
    /// Arbitrary Rust type carried as an [`OpaqueValue`](crate::OpaqueValue).
    Opaque { id: TypeId, name: &'static str },
}

impl ValueType {
    /// Token accepting any list, whatever its element type.
    pub fn collection() -> Self {
        ValueType::List(Box::new(ValueType::Any))
    }

    /// Token accepting any map, whatever its value type.
    pub fn map() -> Self {
        ValueType::Map(Box::new(ValueType::Any))
    }

    pub fn list_of(element: ValueType) -> Self {
        ValueType::List(Box::new(element))
    }

    pub fn map_of(value: ValueType) -> Self {
        ValueType::Map(Box::new(value))
    }

    pub fn opaque<T: Any>() -> Self {
        ValueType::Opaque {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns true when a value declared as `source` may be used where `self` is expected,
    /// i.e. `self` is `source` or one of its supertypes.
    pub fn is_assignable_from(&self, source: &ValueType) -> bool {
        match (self, source) {
            (ValueType::Any, _) => true,
            (ValueType::List(target), ValueType::List(source)) => target.is_assignable_from(source),
            (ValueType::Map(target), ValueType::Map(source)) => target.is_assignable_from(source),
            (ValueType::Opaque { id: target, .. }, ValueType::Opaque { id: source, .. }) => {
                target == source
            }
            (target, source) => target == source,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ValueType::Map(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => f.write_str("Any"),
            ValueType::Bool => f.write_str("Bool"),
            ValueType::Int => f.write_str("Int"),
            ValueType::Float => f.write_str("Float"),
            ValueType::Text => f.write_str("Text"),
            ValueType::List(element) => write!(f, "List<{}>", element),
            ValueType::Map(value) => write!(f, "Map<Text, {}>", value),
            ValueType::Opaque { name, .. } => f.write_str(name),
        }
    }
}
