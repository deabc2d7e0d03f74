//! Runtime-mutable executor metadata.
//!
//! Every registered executor carries attributes addressed by `(kind, name)`:
//! the kind groups related attributes (`"priority"`, `"limit"`, or anything a
//! host defines), the name picks one of them. The engine only interprets the
//! two reserved attributes listed in [`attr`]; everything else is stored and
//! returned untouched.

use crate::{error::MetadataError, value::Value};
use std::fmt;

/// Reserved attribute names.
pub mod attr {
    /// Kind of the priority attribute. Higher priorities run earlier.
    pub const PRIORITY: &str = "priority";
    /// Kind of the invocation limit attribute. `Null` means unlimited.
    pub const LIMIT: &str = "limit";
    /// Name of the single value carried by the reserved kinds.
    pub const VALUE: &str = "value";
}

/// Address of one metadata attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaKey {
    kind: String,
    name: String,
}

impl MetaKey {
    /// Create a key.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// The attribute kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The attribute name within its kind.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

/// Generic read/write access to an executor's attributes.
///
/// Implementations must make each read and write atomic with respect to
/// concurrent invocations, so nobody ever observes a half-applied change.
pub trait Metadata {
    /// Read an attribute. `None` if it is not set.
    fn metadata(&self, kind: &str, name: &str) -> Option<Value>;

    /// Write an attribute.
    ///
    /// Reserved attributes reject values of the wrong shape; other attributes
    /// accept anything.
    fn set_metadata(&self, kind: &str, name: &str, value: Value) -> Result<(), MetadataError>;
}
