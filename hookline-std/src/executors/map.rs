//! Map executor for result transformation.

use hookline_core::{Executor, Outcome, Value};
use std::marker::PhantomData;

/// An executor that transforms the values produced by its inner executor.
///
/// `Skip`, `Halt` and `Failure` pass through unchanged.
pub struct MapExecutor<E, F, R> {
    inner: E,
    mapper: F,
    _inner_result: PhantomData<fn() -> R>,
}

impl<E, F, R> MapExecutor<E, F, R> {
    /// Create a new map executor.
    pub fn new(inner: E, mapper: F) -> Self {
        Self {
            inner,
            mapper,
            _inner_result: PhantomData,
        }
    }
}

impl<C, R, U, E, F> Executor<C, U> for MapExecutor<E, F, R>
where
    C: ?Sized,
    E: Executor<C, R>,
    F: Fn(R) -> U + Send + Sync,
{
    fn invoke(&self, context: &C, arguments: &[Value]) -> Outcome<U> {
        self.inner.invoke(context, arguments).map(&self.mapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_transforms_values_only() {
        let doubled = MapExecutor::new(|_: &(), _: &[Value]| Outcome::Value(21), |v: i32| v * 2);
        assert_eq!(doubled.invoke(&(), &[]).into_value(), Some(42));

        let halted = MapExecutor::new(
            |_: &(), _: &[Value]| Outcome::<i32>::halt("done"),
            |v: i32| v.to_string(),
        );
        assert!(halted.invoke(&(), &[]).is_halt());
    }
}
