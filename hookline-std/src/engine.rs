//! The invocation engine: validate, then run eligible slots in order.

use crate::registry::SlotProvider;
use hookline_core::{FunctionError, Outcome, ParameterSchema, Value};

/// Why and where a chain was halted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaltRecord {
    /// Name of the slot that halted.
    pub executor: String,
    /// The reason it gave.
    pub reason: String,
}

/// Everything one call produced.
///
/// `results` holds one entry per executor that returned `Value` or `Skip`, in
/// execution order. A halting executor contributes no entry.
#[derive(Debug)]
pub struct Invocation<R> {
    results: Vec<Option<R>>,
    primary: Option<usize>,
    halt: Option<HaltRecord>,
    executed: usize,
}

impl<R> Invocation<R> {
    fn new() -> Self {
        Self {
            results: Vec::new(),
            primary: None,
            halt: None,
            executed: 0,
        }
    }

    /// The first value produced, if any executor produced one.
    pub fn primary(&self) -> Option<&R> {
        self.primary
            .and_then(|index| self.results.get(index))
            .and_then(Option::as_ref)
    }

    /// Consume into the primary result.
    pub fn into_primary(self) -> Option<R> {
        let index = self.primary?;
        self.results.into_iter().nth(index).flatten()
    }

    /// Per-executor results in execution order; `None` marks a skip.
    pub fn results(&self) -> &[Option<R>] {
        &self.results
    }

    /// Consume into the per-executor results.
    pub fn into_results(self) -> Vec<Option<R>> {
        self.results
    }

    /// The halt that ended the chain early, if one did.
    pub fn halted(&self) -> Option<&HaltRecord> {
        self.halt.as_ref()
    }

    /// How many executors actually ran, the halting one included.
    pub fn executed(&self) -> usize {
        self.executed
    }
}

/// Runs one call against a [`SlotProvider`].
///
/// Executors run one after another on the caller's thread. A `Halt` ends the
/// chain and keeps what was decided so far; a `Failure` aborts the whole call.
#[derive(Debug, Default, Clone, Copy)]
pub struct InvocationEngine;

impl InvocationEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Validate `arguments` against `schema`, then invoke every eligible slot.
    ///
    /// Eligibility is checked for each slot just before it would run, so an
    /// executor that locks or exhausts a later slot affects this same call.
    pub fn run<C, R, P>(
        &self,
        function: &str,
        schema: &ParameterSchema,
        provider: &P,
        context: &C,
        arguments: &[Value],
    ) -> Result<Invocation<R>, FunctionError>
    where
        C: ?Sized,
        P: SlotProvider<C, R> + ?Sized,
    {
        schema
            .check(arguments)
            .map_err(|mismatch| FunctionError::InvalidArguments {
                function: function.to_owned(),
                mismatch,
            })?;

        let slots = provider.resolve();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            function,
            arguments = arguments.len(),
            slots = slots.len(),
            "invoking function"
        );

        let mut invocation = Invocation::new();
        for slot in slots {
            let Some(admission) = slot.admit() else {
                #[cfg(feature = "tracing")]
                tracing::trace!(function, executor = slot.name(), "slot not eligible");
                continue;
            };

            let outcome = slot.invoke_admitted(admission, context, arguments);
            invocation.executed += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(
                function,
                executor = slot.name(),
                outcome = outcome.label(),
                "executor returned"
            );

            match outcome {
                Outcome::Value(value) => {
                    if invocation.primary.is_none() {
                        invocation.primary = Some(invocation.results.len());
                    }
                    invocation.results.push(Some(value));
                }
                Outcome::Skip => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(function, executor = slot.name(), "executor skipped");
                    invocation.results.push(None);
                }
                Outcome::Halt(reason) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(function, executor = slot.name(), %reason, "chain halted");
                    invocation.halt = Some(HaltRecord {
                        executor: slot.name().to_owned(),
                        reason,
                    });
                    break;
                }
                Outcome::Failure(source) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        function,
                        executor = slot.name(),
                        error = %source,
                        "executor failed"
                    );
                    return Err(FunctionError::HandlerFailure {
                        function: function.to_owned(),
                        executor: slot.name().to_owned(),
                        source,
                    });
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function,
            executed = invocation.executed,
            halted = invocation.halt.is_some(),
            "function returned"
        );
        Ok(invocation)
    }
}
