//! Guard executor for conditional participation.

use hookline_core::{Executor, Outcome, Value};

/// An executor that only runs its inner executor when a predicate accepts the arguments.
///
/// Rejected calls answer `Skip`, so the chain moves on to the next executor.
pub struct GuardExecutor<E, F> {
    inner: E,
    predicate: F,
}

impl<E, F> GuardExecutor<E, F> {
    /// Create a new guard.
    pub fn new(inner: E, predicate: F) -> Self {
        Self { inner, predicate }
    }
}

impl<C, R, E, F> Executor<C, R> for GuardExecutor<E, F>
where
    C: ?Sized,
    E: Executor<C, R>,
    F: Fn(&[Value]) -> bool + Send + Sync,
{
    fn invoke(&self, context: &C, arguments: &[Value]) -> Outcome<R> {
        if (self.predicate)(arguments) {
            self.inner.invoke(context, arguments)
        } else {
            Outcome::Skip
        }
    }
}
