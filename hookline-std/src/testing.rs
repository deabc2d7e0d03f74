//! Testing utilities for hookline.
//!
//! This module provides executors whose behavior is scripted and whose calls
//! can be inspected afterwards.
//!
//! # Features
//!
//! - [`Script`]: A cloneable description of the outcome to return
//! - [`RecordingExecutor`]: An executor that records every argument list it receives
//! - [`CountingExecutor`]: An executor that counts invocations

use hookline_core::{Executor, Outcome, Value};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Script
// ============================================================================

/// The outcome a test executor answers with.
///
/// Unlike [`Outcome`], a script can be cloned and replayed on every call.
#[derive(Debug, Clone, PartialEq)]
pub enum Script<R> {
    /// Answer `Outcome::Value`.
    Value(R),
    /// Answer `Outcome::Skip`.
    Skip,
    /// Answer `Outcome::Halt` with this reason.
    Halt(String),
    /// Answer `Outcome::Failure` with this message.
    Fail(String),
}

impl<R: Clone> Script<R> {
    /// Produce a fresh outcome.
    pub fn to_outcome(&self) -> Outcome<R> {
        match self {
            Script::Value(value) => Outcome::Value(value.clone()),
            Script::Skip => Outcome::Skip,
            Script::Halt(reason) => Outcome::Halt(reason.clone()),
            Script::Fail(message) => Outcome::fail(message.clone()),
        }
    }
}

// ============================================================================
// Recording Executor
// ============================================================================

/// An executor that records all argument lists it receives.
///
/// Clones share the same record, so keep one clone for assertions and
/// register the other.
///
/// # Example
///
/// ```rust
/// use hookline_core::{Executor, Value};
/// use hookline_std::testing::{RecordingExecutor, Script};
///
/// let recorder = RecordingExecutor::new(Script::Value(1));
/// let observer = recorder.clone();
///
/// recorder.invoke(&(), &[Value::from("hello")]);
/// assert_eq!(observer.calls(), vec![vec![Value::from("hello")]]);
/// ```
pub struct RecordingExecutor<R> {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
    script: Script<R>,
}

impl<R> RecordingExecutor<R> {
    /// Create a recording executor that answers with `script`.
    pub fn new(script: Script<R>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            script,
        }
    }

    /// Get a clone of the recorded argument lists.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl<R: Clone> Clone for RecordingExecutor<R> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            script: self.script.clone(),
        }
    }
}

impl<C, R> Executor<C, R> for RecordingExecutor<R>
where
    C: ?Sized,
    R: Clone + Send + Sync + 'static,
{
    fn invoke(&self, _context: &C, arguments: &[Value]) -> Outcome<R> {
        self.calls.lock().push(arguments.to_vec());
        self.script.to_outcome()
    }
}

// ============================================================================
// Counting Executor
// ============================================================================

/// An executor that counts invocations.
pub struct CountingExecutor<R> {
    count: Arc<AtomicUsize>,
    script: Script<R>,
}

impl<R> CountingExecutor<R> {
    /// Create a counting executor that answers with `script`.
    pub fn new(script: Script<R>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            script,
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<R: Clone> Clone for CountingExecutor<R> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            script: self.script.clone(),
        }
    }
}

impl<C, R> Executor<C, R> for CountingExecutor<R>
where
    C: ?Sized,
    R: Clone + Send + Sync + 'static,
{
    fn invoke(&self, _context: &C, _arguments: &[Value]) -> Outcome<R> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.script.to_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_executor_shares_count_across_clones() {
        let counter = CountingExecutor::new(Script::<()>::Skip);
        let observer = counter.clone();

        assert!(Executor::<(), ()>::invoke(&counter, &(), &[]).is_skip());
        assert!(Executor::<(), ()>::invoke(&counter, &(), &[]).is_skip());
        assert_eq!(observer.count(), 2);

        observer.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_script_fail_becomes_failure() {
        let outcome = Script::<i32>::Fail("nope".into()).to_outcome();
        match outcome {
            Outcome::Failure(err) => assert_eq!(err.to_string(), "nope"),
            other => panic!("expected failure, got {}", other.label()),
        }
    }
}
