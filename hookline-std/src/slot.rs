//! Executor slots: an executor plus its runtime-mutable metadata.

use hookline_core::{Executor, MetaKey, Metadata, MetadataError, Outcome, Value, attr};
use parking_lot::Mutex;
use std::{cmp::Reverse, collections::HashMap, fmt, sync::Arc};

/// Priority given to executors registered without one.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Registration-time configuration of an executor.
#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    /// Priority (higher = executed first). Default is [`DEFAULT_PRIORITY`].
    pub priority: i32,
    /// Maximum number of counted invocations. `None` is unlimited.
    pub limit: Option<u32>,
    /// Initial lock state.
    pub locked: bool,
    extra: Vec<(MetaKey, Value)>,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorOptions {
    /// Unlocked, unlimited, default priority.
    pub fn new() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            limit: None,
            locked: false,
            extra: Vec::new(),
        }
    }

    /// Set priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the invocation limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set initial lock state.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Attach an extra attribute. Reserved attributes are validated at registration.
    pub fn with_metadata(
        mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.extra.push((MetaKey::new(kind, name), value.into()));
        self
    }
}

#[derive(Debug)]
struct SlotState {
    priority: i32,
    invocations: u32,
    generation: u64,
    limit: Option<u32>,
    locked: bool,
    extra: HashMap<MetaKey, Value>,
}

impl SlotState {
    fn is_eligible(&self) -> bool {
        !self.locked && self.limit.is_none_or(|limit| self.invocations < limit)
    }

    fn write(&mut self, kind: &str, name: &str, value: Value) -> Result<(), MetadataError> {
        match (kind, name) {
            (attr::PRIORITY, attr::VALUE) => {
                let raw = value.as_int().ok_or_else(|| MetadataError::TypeMismatch {
                    kind: kind.to_owned(),
                    name: name.to_owned(),
                    expected: "int",
                    found: value.type_name(),
                })?;
                self.priority = i32::try_from(raw).map_err(|_| MetadataError::OutOfRange {
                    kind: kind.to_owned(),
                    name: name.to_owned(),
                    value: raw,
                })?;
            }
            (attr::LIMIT, attr::VALUE) => {
                self.limit = match value {
                    Value::Null => None,
                    Value::Int(raw) => {
                        Some(u32::try_from(raw).map_err(|_| MetadataError::OutOfRange {
                            kind: kind.to_owned(),
                            name: name.to_owned(),
                            value: raw,
                        })?)
                    }
                    other => {
                        return Err(MetadataError::TypeMismatch {
                            kind: kind.to_owned(),
                            name: name.to_owned(),
                            expected: "int or null",
                            found: other.type_name(),
                        });
                    }
                };
            }
            _ => {
                self.extra.insert(MetaKey::new(kind, name), value);
            }
        }
        Ok(())
    }
}

/// A ticket for one admitted invocation.
///
/// Holding it means the slot was eligible and, if limited, one invocation was
/// already reserved against its limit.
#[derive(Debug)]
#[must_use]
pub(crate) struct Admission {
    reservation: Option<u64>,
}

/// Gives a reservation back when dropped, unless the outcome consumed it.
///
/// A reservation taken before the last counter reset is stale and released as
/// a no-op.
struct Release<'a> {
    state: &'a Mutex<SlotState>,
    generation: Option<u64>,
}

impl Release<'_> {
    fn consume(&mut self) {
        self.generation = None;
    }
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        let Some(generation) = self.generation else {
            return;
        };
        let mut state = self.state.lock();
        if state.generation == generation {
            state.invocations = state.invocations.saturating_sub(1);
        }
    }
}

/// A registered executor together with its metadata.
///
/// The slot's flags always win over anything the executor itself might claim:
/// a locked slot is never invoked, whatever the executor.
///
/// All metadata lives behind one mutex per slot. Executors run without that
/// mutex held, so an executor may freely inspect or reconfigure its own slot.
pub struct ExecutorSlot<C: ?Sized, R> {
    name: String,
    sequence: u64,
    executor: Arc<dyn Executor<C, R>>,
    state: Mutex<SlotState>,
}

impl<C: ?Sized, R> ExecutorSlot<C, R> {
    pub(crate) fn new(
        name: String,
        sequence: u64,
        executor: Arc<dyn Executor<C, R>>,
        options: ExecutorOptions,
    ) -> Result<Self, MetadataError> {
        let mut state = SlotState {
            priority: options.priority,
            invocations: 0,
            generation: 0,
            limit: options.limit,
            locked: options.locked,
            extra: HashMap::new(),
        };
        for (key, value) in options.extra {
            state.write(key.kind(), key.name(), value)?;
        }

        Ok(Self {
            name,
            sequence,
            executor,
            state: Mutex::new(state),
        })
    }

    /// The slot's unique name within its function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registration order, used to break priority ties.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The wrapped executor.
    pub fn executor(&self) -> &Arc<dyn Executor<C, R>> {
        &self.executor
    }

    /// Current priority.
    pub fn priority(&self) -> i32 {
        self.state.lock().priority
    }

    /// Change the priority. Takes effect on the next call.
    pub fn set_priority(&self, priority: i32) {
        self.state.lock().priority = priority;
    }

    /// Current invocation limit, `None` if unlimited.
    pub fn limit(&self) -> Option<u32> {
        self.state.lock().limit
    }

    /// Set or clear (`None`) the invocation limit.
    pub fn set_limit(&self, limit: Option<u32>) {
        self.state.lock().limit = limit;
    }

    /// Counted invocations since registration or the last reset.
    pub fn invocation_count(&self) -> u32 {
        self.state.lock().invocations
    }

    /// Set the invocation counter back to zero, making an exhausted slot eligible again.
    ///
    /// Calls already admitted keep running but no longer affect the new count.
    pub fn reset_invocation_counter(&self) {
        let mut state = self.state.lock();
        state.invocations = 0;
        state.generation = state.generation.wrapping_add(1);
    }

    /// Whether the slot is locked.
    pub fn is_locked(&self) -> bool {
        self.state.lock().locked
    }

    /// Lock or unlock. A locked slot is never invoked.
    pub fn set_locked(&self, locked: bool) {
        self.state.lock().locked = locked;
    }

    /// Whether the engine would invoke this slot right now.
    pub fn is_eligible(&self) -> bool {
        self.state.lock().is_eligible()
    }

    /// Invoke the executor directly, bypassing the eligibility check.
    ///
    /// A `Value` or `Skip` outcome increments the invocation counter when a
    /// limit is configured.
    pub fn invoke(&self, context: &C, arguments: &[Value]) -> Outcome<R> {
        let outcome = self.executor.invoke(context, arguments);
        if outcome.counts_toward_limit() {
            let mut state = self.state.lock();
            if state.limit.is_some() {
                state.invocations = state.invocations.saturating_add(1);
            }
        }
        outcome
    }

    /// Check eligibility and reserve one invocation in a single critical section.
    pub(crate) fn admit(&self) -> Option<Admission> {
        let mut state = self.state.lock();
        if !state.is_eligible() {
            return None;
        }
        let reservation = if state.limit.is_some() {
            state.invocations += 1;
            Some(state.generation)
        } else {
            None
        };
        Some(Admission { reservation })
    }

    /// Invoke after [`admit`](Self::admit), giving the reservation back unless
    /// the outcome counts. An executor that panics gives it back too.
    pub(crate) fn invoke_admitted(
        &self,
        admission: Admission,
        context: &C,
        arguments: &[Value],
    ) -> Outcome<R> {
        let mut release = Release {
            state: &self.state,
            generation: admission.reservation,
        };
        let outcome = self.executor.invoke(context, arguments);
        if outcome.counts_toward_limit() {
            release.consume();
        }
        outcome
    }

    /// Execution order key: priority descending, then registration order.
    pub(crate) fn ordering_key(&self) -> (Reverse<i32>, u64) {
        (Reverse(self.priority()), self.sequence)
    }
}

impl<C: ?Sized, R> Metadata for ExecutorSlot<C, R> {
    fn metadata(&self, kind: &str, name: &str) -> Option<Value> {
        let state = self.state.lock();
        match (kind, name) {
            (attr::PRIORITY, attr::VALUE) => Some(Value::Int(i64::from(state.priority))),
            (attr::LIMIT, attr::VALUE) => state.limit.map(|limit| Value::Int(i64::from(limit))),
            _ => state.extra.get(&MetaKey::new(kind, name)).cloned(),
        }
    }

    fn set_metadata(&self, kind: &str, name: &str, value: Value) -> Result<(), MetadataError> {
        self.state.lock().write(kind, name, value)
    }
}

impl<C: ?Sized, R> fmt::Debug for ExecutorSlot<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ExecutorSlot")
            .field("name", &self.name)
            .field("sequence", &self.sequence)
            .field("priority", &state.priority)
            .field("invocations", &state.invocations)
            .field("limit", &state.limit)
            .field("locked", &state.locked)
            .finish_non_exhaustive()
    }
}
