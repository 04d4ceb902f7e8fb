//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with the value an engine returned for it.

use crate::oid::Oid;
use crate::value::Value;

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: impl Into<Value>) -> Self {
        Self {
            oid,
            value: value.into(),
        }
    }

    /// Create a VarBind with a NULL value.
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::Null,
        }
    }

    /// Whether this binding lies strictly below `root`.
    pub fn is_under(&self, root: &Oid) -> bool {
        self.oid.is_descendant_of(root)
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

impl From<(Oid, Value)> for VarBind {
    fn from((oid, value): (Oid, Value)) -> Self {
        Self { oid, value }
    }
}
