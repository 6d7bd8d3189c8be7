use thiserror::Error;

use crate::value_type::ValueType;

/// Errors raised while registering or applying property handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraversalError {
    /// The handler's type token does not accept the property's declared type.
    #[error("cannot register a property handler for {requested} on property `{property}` of type {declared}")]
    InvalidRegistration {
        property: String,
        declared: ValueType,
        requested: ValueType,
    },

    /// A value reaching a handler does not conform to the handler's type.
    #[error("cannot cast value of type {found} to {expected}")]
    InvalidCast { expected: ValueType, found: ValueType },

    /// Raised by a fallible handler and returned from `post_process` unchanged.
    #[error("property handler failed: {0}")]
    Handler(String),

    /// A JSON array holds `null`, which a list can't represent without shifting indices.
    #[error("JSON array element {index} is null")]
    NullListElement { index: usize },
}

impl TraversalError {
    pub(crate) fn cast(expected: ValueType, found: ValueType) -> Self {
        TraversalError::InvalidCast { expected, found }
    }

    /// Failure reported by a handler, e.g. an index or key that isn't there.
    pub fn handler(message: impl Into<String>) -> Self {
        TraversalError::Handler(message.into())
    }
}

pub type Result<T, E = TraversalError> = std::result::Result<T, E>;
