//! # hookline-core
//!
//! Core contracts for the hookline extension-point dispatch engine.
//!
//! This crate has minimal dependencies and is meant to be imported by code that
//! only *authors* executors and does not need the registry or engine from
//! `hookline-std`.
//!
//! # Layers
//!
//! Hookline composes the behavior of a host object's operation ("function")
//! from independently registered executors. The pieces are layered:
//!
//! ## Layer 1: Values ([`Value`], [`ParamType`])
//!
//! Functions are called with dynamically typed argument lists. A [`ParamType`]
//! describes what a declared parameter accepts, including widening
//! (`Int` into `Float`) and lists.
//!
//! ## Layer 2: Shape ([`ParameterSchema`])
//!
//! A fixed prefix of parameter types plus an optional variadic tail. An empty
//! schema accepts anything.
//!
//! ## Layer 3: Behavior ([`Executor`], [`Outcome`])
//!
//! An executor is invoked with the caller's context and the arguments and
//! answers with an [`Outcome`]: a value, a `Skip` (do not use my value, keep
//! going), a `Halt` (stop the chain, keep what was decided) or a `Failure`.
//!
//! ## Layer 4: Reconfiguration ([`Metadata`])
//!
//! A type-erased `(kind, name) -> Value` accessor so an executor's declared
//! attributes (priority, limit, anything else) can be read and rewritten live.
//!
//! # Error Types
//!
//! - [`FunctionError`] - everything `invoke` and registry mutation can raise
//! - [`SchemaMismatch`] - why an argument list was rejected
//! - [`MetadataError`] - rejected metadata writes

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod executor;
mod macros;
mod metadata;
mod outcome;
mod schema;
mod value;

// Re-exports
pub use error::{BoxError, FunctionError, MetadataError};
pub use executor::Executor;
pub use metadata::{MetaKey, Metadata, attr};
pub use outcome::Outcome;
pub use schema::{ParameterSchema, SchemaMismatch};
pub use value::{Opaque, ParamType, Value};
