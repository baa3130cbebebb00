use std::fmt;

use super::{types::Type, value::Value};

/// A local constant or variable declared by a lambda.
///
/// The value's kind is not checked against the declared type.
#[derive(Debug, Clone)]
pub struct Local {
    pub name: String,
    pub ty: Type,
    pub value: Value,
}

impl Local {
    pub fn new(name: impl Into<String>, ty: Type, value: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
        }
    }
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {} = {}]", self.name, self.ty, self.value)
    }
}

/// A by-position reference to a slot of the owning lambda.
///
/// Slots number the lambda's arguments first, then its locals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalHandle {
    pub index: usize,
}

impl LocalHandle {
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl fmt::Display for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.index)
    }
}
