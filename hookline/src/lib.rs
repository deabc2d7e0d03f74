//! # hookline - Extension-Point Dispatch
//!
//! `hookline` lets a host object expose named operations ([`Function`]s) whose
//! behavior is composed at runtime from independently registered executors.
//!
//! Each call:
//! 1. validates the arguments against the function's [`ParameterSchema`],
//! 2. runs every eligible executor in priority order (higher first, ties in
//!    registration order),
//! 3. returns the first value produced, or every result with
//!    [`Function::invoke_all`].
//!
//! Executors steer the chain with their [`Outcome`]: `Skip` passes the turn on,
//! `Halt` ends the chain keeping what was decided, `Failure` aborts the call.
//! Each executor's priority, invocation limit and lock can be changed live
//! through its [`ExecutorSlot`], even after the function is sealed.
//!
//! ## Quick Start
//!
//! ```rust
//! use hookline::prelude::*;
//!
//! struct Unit {
//!     hit_points: i64,
//! }
//!
//! let damage = Function::<Unit, i64>::builder("damage")
//!     .parameter(ParamType::Int)
//!     .executor(
//!         "armor",
//!         |_: &Unit, arguments: &[Value]| {
//!             let amount = arguments[0].as_int().unwrap_or(0);
//!             if amount < 5 { Outcome::halt("absorbed") } else { Outcome::Skip }
//!         },
//!         ExecutorOptions::new().with_priority(10),
//!     )
//!     .executor(
//!         "apply",
//!         |unit: &Unit, arguments: &[Value]| {
//!             Outcome::Value(unit.hit_points - arguments[0].as_int().unwrap_or(0))
//!         },
//!         ExecutorOptions::new(),
//!     )
//!     .build()?;
//!
//! let unit = Unit { hit_points: 20 };
//! assert_eq!(damage.invoke(&unit, &args![3])?, None);
//! assert_eq!(damage.invoke(&unit, &args![8])?, Some(12));
//! # Ok::<(), FunctionError>(())
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod function;

pub use function::{Function, FunctionBuilder};

pub use hookline_core::{
    // Values
    BoxError,
    // Core traits
    Executor,
    // Errors
    FunctionError,
    MetaKey,
    Metadata,
    MetadataError,
    Opaque,
    Outcome,
    ParamType,
    // Schema
    ParameterSchema,
    SchemaMismatch,
    Value,
    args,
    attr,
};

pub use hookline_std::{
    DEFAULT_PRIORITY, ExecutorOptions, ExecutorSlot, HaltRecord, Invocation, InvocationEngine,
    RegistryError, SlotProvider, SlotRegistry,
};

/// Standard executor adapters.
pub mod executors {
    pub use hookline_std::executors::{GuardExecutor, MapExecutor, TracingExecutor};
}

/// Testing utilities.
pub mod testing {
    pub use hookline_std::testing::{CountingExecutor, RecordingExecutor, Script};
}

/// Prelude module - common imports for hookline.
///
/// # Usage
///
/// ```rust
/// use hookline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Registration
        ExecutorOptions,
        ExecutorSlot,
        // Core traits
        Executor,
        // Facade
        Function,
        // Errors
        FunctionError,
        Metadata,
        Outcome,
        ParamType,
        ParameterSchema,
        Value,
        args,
    };
}
