//! Per-traversal property handlers for walking property paths.
//!
//! A [`TraversalContext`] maps properties to handlers that replace the raw value found
//! at that property before a path walk continues. The typical use is getting past a
//! list- or map-valued property by choosing one element or entry:
//!
//! ```
//! use std::collections::BTreeMap;
//! use traversal_context::{PropertyDescriptor, TraversalContext, Value, ValueType};
//!
//! let address = PropertyDescriptor::new("Person", "address", ValueType::list_of(ValueType::Text));
//! let scores = PropertyDescriptor::new("Person", "scores", ValueType::map_of(ValueType::Int));
//!
//! let mut context = TraversalContext::new();
//! context
//!     .register_collection_handler(&address, |list| list.and_then(|l| l.into_iter().next()))?
//!     .register_map_handler(&scores, |map| map.and_then(|mut m| m.remove("math")))?;
//!
//! let raw = Value::from(BTreeMap::from([("math".to_string(), 90), ("art".to_string(), 70)]));
//! assert_eq!(context.post_process(&scores, Some(raw))?, Some(Value::Int(90)));
//! # Ok::<(), traversal_context::TraversalError>(())
//! ```
//!
//! Handlers are type-checked against the property's declared [`ValueType`] when
//! registered; walking the properties and reading values stays with the caller.

mod cast;
mod context;
mod error;
mod property;
mod value;
mod value_type;

pub use cast::{FromValue, Opaque};
pub use context::TraversalContext;
pub use error::{Result, TraversalError};
pub use property::{Property, PropertyDescriptor};
pub use value::{OpaqueValue, Value};
pub use value_type::ValueType;
