//! Error types for hookline.
//!
//! - [`FunctionError`] - the single error type surfaced by function calls and
//!   registry mutation
//! - [`MetadataError`] - rejected writes to reserved executor attributes
//!
//! `Skip` and `Halt` are control signals, not errors, and never show up here.

use crate::schema::SchemaMismatch;
use thiserror::Error;

/// A boxed error type for executor failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all function operations.
#[derive(Error, Debug)]
pub enum FunctionError {
    /// The arguments did not match the parameter schema. No executor ran.
    #[error("invalid arguments for function `{function}`: {mismatch}")]
    InvalidArguments {
        /// The function that was called.
        function: String,
        /// What did not match.
        #[source]
        mismatch: SchemaMismatch,
    },

    /// The function is sealed and its structure can no longer change.
    #[error("cannot {action} on sealed function `{function}`")]
    StructuralModification {
        /// The sealed function.
        function: String,
        /// What was attempted.
        action: &'static str,
    },

    /// An executor failed. Executors that ran before it keep their side effects.
    #[error("executor `{executor}` of function `{function}` failed: {source}")]
    HandlerFailure {
        /// The function that was called.
        function: String,
        /// The failing executor's slot name.
        executor: String,
        /// The executor's own error.
        #[source]
        source: BoxError,
    },

    /// An executor with this name is already registered.
    #[error("function `{function}` already has an executor named `{name}`")]
    DuplicateExecutor {
        /// The function.
        function: String,
        /// The taken name.
        name: String,
    },

    /// No executor with this name is registered.
    #[error("function `{function}` has no executor named `{name}`")]
    UnknownExecutor {
        /// The function.
        function: String,
        /// The missing name.
        name: String,
    },

    /// Registration metadata was rejected.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl FunctionError {
    /// The executor slot involved, for errors that concern one.
    pub fn executor(&self) -> Option<&str> {
        match self {
            FunctionError::HandlerFailure { executor, .. } => Some(executor),
            FunctionError::DuplicateExecutor { name, .. }
            | FunctionError::UnknownExecutor { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Errors from writing executor metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The value has the wrong type for a reserved attribute.
    #[error("`{kind}.{name}` expects {expected}, found {found}")]
    TypeMismatch {
        /// Attribute kind.
        kind: String,
        /// Attribute name.
        name: String,
        /// What the attribute accepts.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
    },

    /// The integer does not fit the reserved attribute.
    #[error("`{kind}.{name}` cannot hold {value}")]
    OutOfRange {
        /// Attribute kind.
        kind: String,
        /// Attribute name.
        name: String,
        /// The rejected value.
        value: i64,
    },
}
