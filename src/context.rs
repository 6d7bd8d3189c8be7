use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::cast::FromValue;
use crate::error::{Result, TraversalError};
use crate::property::{Property, PropertyDescriptor};
use crate::value::Value;

type Handler = Rc<dyn Fn(Option<Value>) -> Result<Option<Value>>>;

/// Post-processing handlers for the values found at individual properties while a
/// property path is walked.
///
/// A walker calls [`post_process`](Self::post_process) once per property per step and
/// continues with whatever it returns. Registering a handler is how callers get past
/// properties that hold a list or a map, which can't be navigated further without an
/// index or a key.
///
/// Every handler is checked once, when registered: its parameter type must accept the
/// property's declared type. After that it is stored type-erased and invoked as
/// `Option<Value> -> Option<Value>`, with a runtime cast in front of it.
///
/// The context is meant to be filled completely and then handed to a single traversal.
/// It is neither `Send` nor `Sync`; registration needs `&mut self`, lookups `&self`.
///
/// # Example
/// ```
/// use traversal_context::{PropertyDescriptor, TraversalContext, Value, ValueType};
///
/// let tags = PropertyDescriptor::new("Post", "tags", ValueType::list_of(ValueType::Text));
///
/// let mut context = TraversalContext::new();
/// context.register_collection_handler(&tags, |tags| tags.and_then(|t| t.into_iter().next()))?;
///
/// let first = context.post_process(&tags, Some(Value::from(vec!["rust", "paths"])))?;
/// assert_eq!(first, Some(Value::from("rust")));
/// # Ok::<(), traversal_context::TraversalError>(())
/// ```
#[derive(Clone)]
pub struct TraversalContext<P: Property = PropertyDescriptor> {
    handlers: HashMap<P, Handler>,
}

impl<P: Property> TraversalContext<P> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `property`, receiving values cast to `T`.
    ///
    /// Fails with [`TraversalError::InvalidRegistration`] unless `T`'s type accepts the
    /// property's declared type; the context is unchanged in that case. A handler
    /// already registered for the property is replaced.
    pub fn register_handler<T, F>(&mut self, property: &P, handler: F) -> Result<&mut Self>
    where
        T: FromValue + 'static,
        F: Fn(Option<T>) -> Option<Value> + 'static,
    {
        self.register_fallible_handler::<T, _>(property, move |value| Ok(handler(value)))
    }

    /// Like [`register_handler`](Self::register_handler), for handlers that can fail.
    ///
    /// An error returned by `handler` is passed through [`post_process`](Self::post_process)
    /// as is, e.g. [`TraversalError::handler`] for an index that is out of range.
    pub fn register_fallible_handler<T, F>(&mut self, property: &P, handler: F) -> Result<&mut Self>
    where
        T: FromValue + 'static,
        F: Fn(Option<T>) -> Result<Option<Value>> + 'static,
    {
        let declared = property.value_type();
        let requested = T::value_type();

        if !requested.is_assignable_from(&declared) {
            debug!(
                property = property.name(),
                %declared,
                %requested,
                "rejected property handler"
            );
            return Err(TraversalError::InvalidRegistration {
                property: property.name().to_string(),
                declared,
                requested,
            });
        }

        let caster = move |value: Option<Value>| -> Result<Option<Value>> {
            let typed = value.map(T::from_value).transpose()?;
            handler(typed)
        };

        if self.handlers.insert(property.clone(), Rc::new(caster)).is_some() {
            debug!(property = property.name(), %requested, "replaced property handler");
        } else {
            trace!(property = property.name(), %requested, "registered property handler");
        }

        Ok(self)
    }

    /// Register a handler for a list-valued property, e.g. to pick one element by index.
    pub fn register_collection_handler<F>(&mut self, property: &P, handler: F) -> Result<&mut Self>
    where
        F: Fn(Option<Vec<Value>>) -> Option<Value> + 'static,
    {
        self.register_handler::<Vec<Value>, F>(property, handler)
    }

    /// Register a handler for a map-valued property, e.g. to pick one value by key.
    pub fn register_map_handler<F>(&mut self, property: &P, handler: F) -> Result<&mut Self>
    where
        F: Fn(Option<BTreeMap<String, Value>>) -> Option<Value> + 'static,
    {
        self.register_handler::<BTreeMap<String, Value>, F>(property, handler)
    }

    /// Register a handler on the raw value; accepted for every property.
    pub fn register_untyped_handler<F>(&mut self, property: &P, handler: F) -> Result<&mut Self>
    where
        F: Fn(Option<Value>) -> Option<Value> + 'static,
    {
        self.register_handler::<Value, F>(property, handler)
    }

    /// Apply the handler registered for `property` to `value`, or return `value` as is.
    ///
    /// Errors come from the handler's cast, when `value` does not conform to the type the
    /// handler was registered for, or from a handler registered with
    /// [`register_fallible_handler`](Self::register_fallible_handler).
    pub fn post_process(&self, property: &P, value: Option<Value>) -> Result<Option<Value>> {
        match self.handlers.get(property) {
            Some(handler) => handler(value),
            None => Ok(value),
        }
    }

    pub fn has_handler(&self, property: &P) -> bool {
        self.handlers.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<P: Property> Default for TraversalContext<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Property> fmt::Debug for TraversalContext<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut properties: Vec<_> = self.handlers.keys().map(|p| p.name()).collect();
        properties.sort_unstable();
        f.debug_struct("TraversalContext")
            .field("properties", &properties)
            .finish()
    }
}
