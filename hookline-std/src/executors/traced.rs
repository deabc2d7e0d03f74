//! Tracing executor for call observation.

use hookline_core::{Executor, Outcome, Value};

/// An executor that wraps every call of its inner executor in a span.
pub struct TracingExecutor<E> {
    inner: E,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    name: &'static str,
}

impl<E> TracingExecutor<E> {
    /// Create a new tracing executor. `name` labels the span.
    pub fn new(inner: E, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<C, R, E> Executor<C, R> for TracingExecutor<E>
where
    C: ?Sized,
    E: Executor<C, R>,
{
    fn invoke(&self, context: &C, arguments: &[Value]) -> Outcome<R> {
        #[cfg(feature = "tracing")]
        {
            let span = tracing::info_span!("executor", name = self.name);
            let _entered = span.enter();
            let outcome = self.inner.invoke(context, arguments);
            tracing::info!(
                arguments = arguments.len(),
                outcome = outcome.label(),
                "executor finished"
            );
            outcome
        }
        #[cfg(not(feature = "tracing"))]
        {
            self.inner.invoke(context, arguments)
        }
    }
}
