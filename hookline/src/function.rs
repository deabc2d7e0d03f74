//! The operation facade: one named, extensible function of a host.

use hookline_core::{Executor, FunctionError, ParamType, ParameterSchema, Value};
use hookline_std::{
    ExecutorOptions, ExecutorSlot, Invocation, InvocationEngine, RegistryError, SlotProvider,
    SlotRegistry,
};
use parking_lot::RwLock;
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

struct Definition<C: ?Sized, R> {
    parameters: ParameterSchema,
    slots: SlotRegistry<C, R>,
}

/// A named operation whose behavior is composed from registered executors.
///
/// Calling the function validates the arguments against its parameter schema,
/// then runs every eligible executor in priority order on the caller's thread.
/// The first value produced is the call's primary result.
///
/// Once [sealed](Self::seal), the set of executors and the schema are frozen.
/// Each executor's metadata (priority, limit, lock, custom attributes) stays
/// adjustable through the slot handle.
///
/// # Example
///
/// ```rust
/// use hookline::{ExecutorOptions, Function, Outcome, ParamType, Value, args};
///
/// let greet = Function::<(), String>::builder("greet")
///     .parameter(ParamType::Str)
///     .executor(
///         "polite",
///         |_: &(), arguments: &[Value]| {
///             Outcome::Value(format!("Hello, {}", arguments[0].as_str().unwrap_or_default()))
///         },
///         ExecutorOptions::new(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(greet.invoke(&(), &args!["Ada"]).unwrap(), Some("Hello, Ada".to_string()));
/// ```
///
/// # Re-entrancy
///
/// An executor may invoke any function, this one included, and may look up
/// or reconfigure slots of the function calling it, even while another thread
/// waits to add an executor. It must not add or remove executors of, or seal,
/// the function that is currently calling it: the call holds a read lock for
/// its whole duration and the mutation would wait on it forever.
pub struct Function<C: ?Sized, R> {
    name: String,
    definition: RwLock<Definition<C, R>>,
    sealed: AtomicBool,
    seal_on_first_invoke: bool,
    engine: InvocationEngine,
}

impl<C: ?Sized, R> Function<C, R> {
    /// Create an unsealed function with no executors.
    pub fn new(name: impl Into<String>, parameters: ParameterSchema) -> Self {
        Self {
            name: name.into(),
            definition: RwLock::new(Definition {
                parameters,
                slots: SlotRegistry::new(),
            }),
            sealed: AtomicBool::new(false),
            seal_on_first_invoke: false,
            engine: InvocationEngine::new(),
        }
    }

    /// Start building a function.
    pub fn builder(name: impl Into<String>) -> FunctionBuilder<C, R> {
        FunctionBuilder::new(name)
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter schema.
    pub fn parameters(&self) -> ParameterSchema {
        self.definition.read_recursive().parameters.clone()
    }

    /// Replace the parameter schema. Fails once sealed.
    pub fn set_parameters(&self, parameters: ParameterSchema) -> Result<(), FunctionError> {
        let mut definition = self.definition.write();
        self.ensure_open("replace the parameter schema")?;
        definition.parameters = parameters;
        #[cfg(feature = "tracing")]
        tracing::debug!(function = %self.name, "parameter schema replaced");
        Ok(())
    }

    /// Register an executor under a name unique within this function.
    ///
    /// Returns the slot handle, through which the executor's metadata can be
    /// changed later.
    pub fn add_executor<E>(
        &self,
        name: impl Into<String>,
        executor: E,
        options: ExecutorOptions,
    ) -> Result<Arc<ExecutorSlot<C, R>>, FunctionError>
    where
        E: Executor<C, R> + 'static,
    {
        self.add_shared_executor(name, Arc::new(executor), options)
    }

    /// Register an executor that is already shared, possibly with other functions.
    pub fn add_shared_executor(
        &self,
        name: impl Into<String>,
        executor: Arc<dyn Executor<C, R>>,
        options: ExecutorOptions,
    ) -> Result<Arc<ExecutorSlot<C, R>>, FunctionError> {
        let mut definition = self.definition.write();
        self.ensure_open("add an executor")?;
        let slot = definition
            .slots
            .register_arc(name, executor, options)
            .map_err(|e| self.registry_error(e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = %self.name,
            executor = slot.name(),
            priority = slot.priority(),
            "executor added"
        );
        Ok(slot)
    }

    /// Unregister an executor. Fails once sealed.
    pub fn remove_executor(&self, name: &str) -> Result<Arc<ExecutorSlot<C, R>>, FunctionError> {
        let mut definition = self.definition.write();
        self.ensure_open("remove an executor")?;
        let slot = definition
            .slots
            .unregister(name)
            .map_err(|e| self.registry_error(e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(function = %self.name, executor = name, "executor removed");
        Ok(slot)
    }

    /// Look up an executor's slot by name.
    pub fn executor(&self, name: &str) -> Option<Arc<ExecutorSlot<C, R>>> {
        self.definition.read_recursive().slots.get(name)
    }

    /// All slots in the order a call would visit them, ineligible ones included.
    pub fn executors(&self) -> Vec<Arc<ExecutorSlot<C, R>>> {
        self.definition.read_recursive().slots.resolve()
    }

    /// Number of registered executors.
    pub fn len(&self) -> usize {
        self.definition.read_recursive().slots.len()
    }

    /// Whether no executors are registered.
    pub fn is_empty(&self) -> bool {
        self.definition.read_recursive().slots.is_empty()
    }

    /// Freeze the executor set and schema. Idempotent.
    pub fn seal(&self) {
        if self.is_sealed() {
            return;
        }
        // Excludes in-flight add/remove.
        let _definition = self.definition.write();
        if !self.sealed.swap(true, Ordering::AcqRel) {
            #[cfg(feature = "tracing")]
            tracing::debug!(function = %self.name, "function sealed");
        }
    }

    /// Whether the function is sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Call the function and return the primary result.
    pub fn invoke(&self, context: &C, arguments: &[Value]) -> Result<Option<R>, FunctionError> {
        self.invocation(context, arguments).map(Invocation::into_primary)
    }

    /// Call the function and return every executor's result in execution order.
    ///
    /// Skipping executors contribute `None`. Results stop at a halt.
    pub fn invoke_all(
        &self,
        context: &C,
        arguments: &[Value],
    ) -> Result<Vec<Option<R>>, FunctionError> {
        self.invocation(context, arguments).map(Invocation::into_results)
    }

    /// Call the function and return the full [`Invocation`] record.
    pub fn invocation(
        &self,
        context: &C,
        arguments: &[Value],
    ) -> Result<Invocation<R>, FunctionError> {
        if self.seal_on_first_invoke {
            self.seal();
        }

        // Recursive so that executors can call back into this function while
        // a writer is queued.
        let definition = self.definition.read_recursive();
        self.engine.run(
            &self.name,
            &definition.parameters,
            &definition.slots,
            context,
            arguments,
        )
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), FunctionError> {
        if self.is_sealed() {
            return Err(FunctionError::StructuralModification {
                function: self.name.clone(),
                action,
            });
        }
        Ok(())
    }

    fn registry_error(&self, error: RegistryError) -> FunctionError {
        match error {
            RegistryError::DuplicateName(name) => FunctionError::DuplicateExecutor {
                function: self.name.clone(),
                name,
            },
            RegistryError::NotFound(name) => FunctionError::UnknownExecutor {
                function: self.name.clone(),
                name,
            },
            RegistryError::Metadata(e) => FunctionError::Metadata(e),
        }
    }
}

impl<C: ?Sized, R> fmt::Debug for Function<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definition = self.definition.read_recursive();
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("parameters", &definition.parameters)
            .field("executors", &definition.slots.len())
            .field("sealed", &self.is_sealed())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`Function`].
pub struct FunctionBuilder<C: ?Sized, R> {
    name: String,
    parameters: ParameterSchema,
    seal_on_first_invoke: bool,
    sealed: bool,
    executors: Vec<(String, Arc<dyn Executor<C, R>>, ExecutorOptions)>,
}

impl<C: ?Sized, R> FunctionBuilder<C, R> {
    /// Create a builder for an unsealed function that accepts any arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: ParameterSchema::new(),
            seal_on_first_invoke: false,
            sealed: false,
            executors: Vec::new(),
        }
    }

    /// Append a fixed parameter.
    pub fn parameter(mut self, ty: ParamType) -> Self {
        self.parameters = self.parameters.param(ty);
        self
    }

    /// Declare the variadic tail.
    pub fn variadic(mut self, element: ParamType) -> Self {
        self.parameters = self.parameters.variadic(element);
        self
    }

    /// Use a prepared schema, replacing any parameters declared so far.
    pub fn parameters(mut self, parameters: ParameterSchema) -> Self {
        self.parameters = parameters;
        self
    }

    /// Seal the function the first time it is invoked.
    pub fn seal_on_first_invoke(mut self, enabled: bool) -> Self {
        self.seal_on_first_invoke = enabled;
        self
    }

    /// Seal the function as soon as it is built.
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// Register an executor.
    pub fn executor<E>(
        mut self,
        name: impl Into<String>,
        executor: E,
        options: ExecutorOptions,
    ) -> Self
    where
        E: Executor<C, R> + 'static,
    {
        let executor: Arc<dyn Executor<C, R>> = Arc::new(executor);
        self.executors.push((name.into(), executor, options));
        self
    }

    /// Build the function, registering executors in the order they were given.
    pub fn build(self) -> Result<Function<C, R>, FunctionError> {
        let mut function = Function::new(self.name, self.parameters);
        function.seal_on_first_invoke = self.seal_on_first_invoke;
        for (name, executor, options) in self.executors {
            function.add_shared_executor(name, executor, options)?;
        }
        if self.sealed {
            function.seal();
        }
        Ok(function)
    }
}
