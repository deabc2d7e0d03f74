//! # Executors
//!
//! An executor is one pluggable piece of a function's behavior. It receives
//! the caller's context (the host object the function is invoked on) and the
//! validated arguments, and answers with an [`Outcome`].
//!
//! Executors never see their own metadata (priority, limit, lock); that lives
//! in the slot the registry wraps around them.
//!
//! # Usage Patterns
//!
//! 1. **Closure**: `|host: &Host, args: &[Value]| Outcome::Value(..)`
//! 2. **Struct implementation**: `impl Executor<Host, i64> for MyExecutor`

use crate::{outcome::Outcome, value::Value};

/// A handler registered against a function.
///
/// `C` is the context type threaded through every call, `R` the type of the
/// values executors produce.
///
/// # Example
///
/// ```rust
/// use hookline_core::{Executor, Outcome, Value};
///
/// struct Doubler;
///
/// impl Executor<(), i64> for Doubler {
///     fn invoke(&self, _context: &(), arguments: &[Value]) -> Outcome<i64> {
///         match arguments.first().and_then(Value::as_int) {
///             Some(n) => Outcome::Value(n * 2),
///             None => Outcome::Skip,
///         }
///     }
/// }
///
/// assert_eq!(Doubler.invoke(&(), &[Value::from(21)]).into_value(), Some(42));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Executor<{C}, {R}>`",
    label = "missing `Executor` implementation",
    note = "Executors implement `invoke(&self, &{C}, &[Value]) -> Outcome<{R}>`, or are closures with that signature."
)]
pub trait Executor<C: ?Sized, R>: Send + Sync {
    /// Run the executor for one call.
    fn invoke(&self, context: &C, arguments: &[Value]) -> Outcome<R>;
}

// Blanket impl for closures
impl<C, R, F> Executor<C, R> for F
where
    C: ?Sized,
    F: Fn(&C, &[Value]) -> Outcome<R> + Send + Sync,
{
    fn invoke(&self, context: &C, arguments: &[Value]) -> Outcome<R> {
        (self)(context, arguments)
    }
}
