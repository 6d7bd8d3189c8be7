use std::hash::{Hash, Hasher};

use crate::value_type::ValueType;

/// A named, typed attribute of a structured object, used as a lookup key by
/// [`TraversalContext`](crate::TraversalContext).
///
/// Implementations come from whatever mapping layer describes the object graph;
/// equality and hashing must identify the property, `value_type` its declared type.
pub trait Property: Hash + Eq + Clone {
    fn name(&self) -> &str;

    fn value_type(&self) -> ValueType;
}

/// Plain property metadata: the owning type's name, the property name and its declared type.
///
/// Two descriptors are the same property when owner and name match.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    owner: String,
    name: String,
    value_type: ValueType,
}

impl PropertyDescriptor {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            value_type,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for PropertyDescriptor {}

impl Hash for PropertyDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

impl Property for PropertyDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn value_type(&self) -> ValueType {
        self.value_type.clone()
    }
}
