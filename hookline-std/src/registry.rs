//! Registry of named executor slots.

use crate::slot::{ExecutorOptions, ExecutorSlot};
use hookline_core::{Executor, MetadataError};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;

/// Errors from registry membership changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A slot with this name already exists.
    #[error("duplicate executor name: {0}")]
    DuplicateName(String),

    /// No slot with this name exists.
    #[error("executor not found: {0}")]
    NotFound(String),

    /// The registration options carried an invalid reserved attribute.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// A source of slots for one invocation.
///
/// This trait abstracts where the engine gets its slots from.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid SlotProvider",
    label = "missing `SlotProvider` implementation",
    note = "Implement `SlotProvider<{C}, {R}>` to supply ordered executor slots to the engine."
)]
pub trait SlotProvider<C: ?Sized, R> {
    /// All slots in execution order: priority descending, ties in registration order.
    ///
    /// Eligibility is not filtered here; the engine checks it per slot at the
    /// moment it reaches the slot.
    fn resolve(&self) -> Vec<Arc<ExecutorSlot<C, R>>>;
}

/// The set of executor slots registered under one function, keyed by name.
pub struct SlotRegistry<C: ?Sized, R> {
    slots: HashMap<String, Arc<ExecutorSlot<C, R>>>,
    next_sequence: u64,
}

impl<C: ?Sized, R> SlotRegistry<C, R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Register an executor under a unique name.
    pub fn register<E>(
        &mut self,
        name: impl Into<String>,
        executor: E,
        options: ExecutorOptions,
    ) -> Result<Arc<ExecutorSlot<C, R>>, RegistryError>
    where
        E: Executor<C, R> + 'static,
    {
        self.register_arc(name, Arc::new(executor), options)
    }

    /// Register an already shared executor under a unique name.
    pub fn register_arc(
        &mut self,
        name: impl Into<String>,
        executor: Arc<dyn Executor<C, R>>,
        options: ExecutorOptions,
    ) -> Result<Arc<ExecutorSlot<C, R>>, RegistryError> {
        let name = name.into();
        if self.slots.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let slot = Arc::new(ExecutorSlot::new(
            name.clone(),
            self.next_sequence,
            executor,
            options,
        )?);
        self.next_sequence += 1;
        self.slots.insert(name, Arc::clone(&slot));
        Ok(slot)
    }

    /// Remove a slot. It is never invoked again, though existing handles stay readable.
    pub fn unregister(&mut self, name: &str) -> Result<Arc<ExecutorSlot<C, R>>, RegistryError> {
        self.slots
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    /// Look up a slot by name.
    pub fn get(&self, name: &str) -> Option<Arc<ExecutorSlot<C, R>>> {
        self.slots.get(name).cloned()
    }

    /// Check if a slot exists.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Get the number of registered slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over slot names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

impl<C: ?Sized, R> Default for SlotRegistry<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized, R> SlotProvider<C, R> for SlotRegistry<C, R> {
    fn resolve(&self) -> Vec<Arc<ExecutorSlot<C, R>>> {
        let mut ordered: Vec<_> = self.slots.values().cloned().collect();
        // Each priority is read once, so a concurrent edit cannot make the sort inconsistent.
        ordered.sort_by_cached_key(|slot| slot.ordering_key());
        ordered
    }
}
