//! # hookline-std
//!
//! Standard implementations for the hookline dispatch engine.
//!
//! This crate provides:
//! - **Slots**: [`ExecutorSlot`] pairs an executor with live metadata
//!   (priority, limit, lock, custom attributes)
//! - **Registry**: [`SlotRegistry`] keeps named slots and resolves them in
//!   execution order
//! - **Engine**: [`InvocationEngine`] validates arguments and runs eligible slots
//! - **Standard executors**: Guard, Map, Tracing
//! - **Testing utilities**: scripted recording and counting executors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hookline_core;

// Modules
pub mod engine;
pub mod executors;
pub mod registry;
pub mod slot;
pub mod testing;

pub use engine::{HaltRecord, Invocation, InvocationEngine};
pub use registry::{RegistryError, SlotProvider, SlotRegistry};
pub use slot::{DEFAULT_PRIORITY, ExecutorOptions, ExecutorSlot};
