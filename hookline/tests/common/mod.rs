#![allow(dead_code)]

use hookline::{Executor, Outcome, Value};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Host
// ============================================================================

/// The object whose functions are being extended.
#[derive(Debug, Default)]
pub struct Unit {
    pub name: String,
    pub moves: AtomicUsize,
}

impl Unit {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            moves: AtomicUsize::new(0),
        }
    }
}

// ============================================================================
// Test Executors
// ============================================================================

/// Records its id into a shared log, then answers with a fixed outcome.
pub struct OrderRecordingExecutor {
    pub id: i64,
    pub order: Arc<Mutex<Vec<i64>>>,
    pub answer: Answer,
}

/// What an [`OrderRecordingExecutor`] answers.
#[derive(Clone, Copy, Debug)]
pub enum Answer {
    Value,
    Skip,
    Halt,
    Fail,
}

impl Executor<Unit, i64> for OrderRecordingExecutor {
    fn invoke(&self, _unit: &Unit, _arguments: &[Value]) -> Outcome<i64> {
        self.order.lock().unwrap().push(self.id);
        match self.answer {
            Answer::Value => Outcome::Value(self.id),
            Answer::Skip => Outcome::Skip,
            Answer::Halt => Outcome::halt(format!("halted by {}", self.id)),
            Answer::Fail => Outcome::fail(format!("failed in {}", self.id)),
        }
    }
}

pub fn recording(id: i64, order: &Arc<Mutex<Vec<i64>>>, answer: Answer) -> OrderRecordingExecutor {
    OrderRecordingExecutor {
        id,
        order: order.clone(),
        answer,
    }
}

/// Counts calls and answers with the call number.
pub struct Tally {
    pub calls: Arc<AtomicUsize>,
}

impl Executor<Unit, i64> for Tally {
    fn invoke(&self, _unit: &Unit, _arguments: &[Value]) -> Outcome<i64> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Outcome::Value(call as i64)
    }
}

pub fn tally() -> (Tally, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (
        Tally {
            calls: calls.clone(),
        },
        calls,
    )
}
