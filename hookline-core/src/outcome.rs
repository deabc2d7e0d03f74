//! The result of invoking a single executor.

use crate::error::BoxError;

/// What one executor answered for one invocation.
///
/// The engine turns a chain of outcomes into the function's results:
///
/// | Outcome      | Result list     | Primary result          | Chain    |
/// |--------------|-----------------|-------------------------|----------|
/// | `Value(v)`   | `Some(v)`       | set if not yet set      | continue |
/// | `Skip`       | `None`          | untouched               | continue |
/// | `Halt(_)`    | nothing         | untouched               | stop     |
/// | `Failure(_)` | discarded       | discarded               | abort    |
#[derive(Debug)]
pub enum Outcome<R> {
    /// The executor produced a value.
    Value(R),
    /// Do not use this executor's value; continue with the next one.
    Skip,
    /// Stop the chain now, keeping whatever was already decided.
    Halt(String),
    /// The executor failed; the whole call fails.
    Failure(BoxError),
}

impl<R> Outcome<R> {
    /// Stop the chain with a reason.
    pub fn halt(reason: impl Into<String>) -> Self {
        Outcome::Halt(reason.into())
    }

    /// Fail the call with an error.
    pub fn fail(error: impl Into<BoxError>) -> Self {
        Outcome::Failure(error.into())
    }

    /// Returns `true` for `Value`.
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Returns `true` for `Skip`.
    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip)
    }

    /// Returns `true` for `Halt`.
    pub fn is_halt(&self) -> bool {
        matches!(self, Outcome::Halt(_))
    }

    /// Returns `true` for `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Whether this outcome counts against an executor's invocation limit.
    ///
    /// Only invocations that let the chain continue are counted.
    pub fn counts_toward_limit(&self) -> bool {
        matches!(self, Outcome::Value(_) | Outcome::Skip)
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Value(_) => "value",
            Outcome::Skip => "skip",
            Outcome::Halt(_) => "halt",
            Outcome::Failure(_) => "failure",
        }
    }

    /// Transform a produced value, leaving signals untouched.
    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(value) => Outcome::Value(f(value)),
            Outcome::Skip => Outcome::Skip,
            Outcome::Halt(reason) => Outcome::Halt(reason),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// The produced value, if any.
    pub fn into_value(self) -> Option<R> {
        match self {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<R, E> From<Result<R, E>> for Outcome<R>
where
    E: Into<BoxError>,
{
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(value) => Outcome::Value(value),
            Err(error) => Outcome::Failure(error.into()),
        }
    }
}
