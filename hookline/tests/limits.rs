use hookline::{
    ExecutorOptions, ExecutorSlot, Function, Metadata, Outcome, ParamType, Value, args, attr,
};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, OnceLock, Weak,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
};

mod common;
use common::{Unit, tally};

fn fallback(function: &Function<Unit, i64>) {
    function
        .add_executor(
            "fallback",
            |_: &Unit, _: &[Value]| Outcome::Value(-1),
            ExecutorOptions::new().with_priority(-10),
        )
        .unwrap();
}

#[test]
fn test_limit_caps_invocations_until_reset() {
    let function = Function::<Unit, i64>::new("heal", Default::default());
    let (executor, calls) = tally();
    let slot = function
        .add_executor("potion", executor, ExecutorOptions::new().with_limit(2))
        .unwrap();
    fallback(&function);
    let unit = Unit::new("cleric");

    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(1));
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(2));
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(-1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(slot.invocation_count(), 2);
    assert!(!slot.is_eligible());

    slot.reset_invocation_counter();
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(3));
    assert_eq!(slot.invocation_count(), 1);
}

#[test]
fn test_skip_counts_toward_limit_but_halt_does_not() {
    let function = Function::<Unit, i64>::new("gate", Default::default());
    let skips = function
        .add_executor(
            "skips",
            |_: &Unit, _: &[Value]| Outcome::Skip,
            ExecutorOptions::new().with_limit(1).with_priority(2),
        )
        .unwrap();
    let halts = function
        .add_executor(
            "halts",
            |_: &Unit, _: &[Value]| Outcome::halt("closed"),
            ExecutorOptions::new().with_limit(1).with_priority(1),
        )
        .unwrap();

    let unit = Unit::new("a");
    function.invoke(&unit, &[]).unwrap();
    function.invoke(&unit, &[]).unwrap();

    assert_eq!(skips.invocation_count(), 1);
    assert_eq!(halts.invocation_count(), 0);
    assert!(halts.is_eligible());
}

#[test]
fn test_unlimited_slots_do_not_count() {
    let function = Function::<Unit, i64>::new("free", Default::default());
    let (executor, calls) = tally();
    let slot = function
        .add_executor("any", executor, ExecutorOptions::new())
        .unwrap();

    for _ in 0..5 {
        function.invoke(&Unit::new("a"), &[]).unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(slot.invocation_count(), 0);
}

#[test]
fn test_lock_and_unlock() {
    let function = Function::<Unit, i64>::new("open", Default::default());
    let (executor, calls) = tally();
    let slot = function
        .add_executor("door", executor, ExecutorOptions::new().with_locked(true))
        .unwrap();
    fallback(&function);
    let unit = Unit::new("rogue");

    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(-1));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    slot.set_locked(false);
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(1));

    slot.set_locked(true);
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(-1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_limit_through_generic_metadata() {
    let function = Function::<Unit, i64>::new("scroll", Default::default());
    let (executor, _calls) = tally();
    let slot = function
        .add_executor("read", executor, ExecutorOptions::new())
        .unwrap();
    fallback(&function);
    let unit = Unit::new("a");

    assert_eq!(slot.metadata(attr::LIMIT, attr::VALUE), None);
    slot.set_metadata(attr::LIMIT, attr::VALUE, Value::from(1)).unwrap();
    assert_eq!(slot.metadata(attr::LIMIT, attr::VALUE), Some(Value::Int(1)));

    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(1));
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(-1));

    slot.set_metadata(attr::LIMIT, attr::VALUE, Value::Null).unwrap();
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(2));
}

#[test]
fn test_limit_of_one_runs_exactly_once() {
    let function = Function::<Unit, i64>::new("once", Default::default());
    let seen = AtomicUsize::new(0);
    let slot = function
        .add_executor(
            "single_use",
            |_: &Unit, _: &[Value]| Outcome::Value(7),
            ExecutorOptions::new().with_limit(1),
        )
        .unwrap();
    fallback(&function);

    let unit = Unit::new("a");
    for _ in 0..3 {
        if function.invoke(&unit, &[]).unwrap() == Some(7) {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    }
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(slot.invocation_count(), 1);
}

#[test]
fn test_limit_holds_under_concurrent_callers() {
    const LIMIT: u32 = 25;
    const THREADS: usize = 8;
    const CALLS_PER_THREAD: usize = 20;

    let function = Function::<Unit, i64>::new("loot", Default::default());
    let (executor, calls) = tally();
    let slot = function
        .add_executor("chest", executor, ExecutorOptions::new().with_limit(LIMIT))
        .unwrap();
    let unit = Unit::new("party");

    let primaries = AtomicUsize::new(0);
    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..CALLS_PER_THREAD {
                    if function.invoke(&unit, &[]).unwrap().is_some() {
                        primaries.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), LIMIT as usize);
    assert_eq!(primaries.load(Ordering::SeqCst), LIMIT as usize);
    assert_eq!(slot.invocation_count(), LIMIT);
}

#[test]
fn test_reset_inside_a_call_keeps_later_counts() {
    let this: Arc<OnceLock<Weak<Function<Unit, i64>>>> = Arc::new(OnceLock::new());
    let own_slot: Arc<OnceLock<Arc<ExecutorSlot<Unit, i64>>>> = Arc::new(OnceLock::new());
    let (function_handle, slot_handle) = (this.clone(), own_slot.clone());
    let function = Arc::new(
        Function::<Unit, i64>::builder("recharge")
            .variadic(ParamType::Int)
            .executor(
                "surge",
                move |unit: &Unit, arguments: &[Value]| {
                    if arguments.is_empty() {
                        return Outcome::Value(1);
                    }
                    let function = function_handle.get().and_then(Weak::upgrade);
                    let (Some(function), Some(slot)) = (function, slot_handle.get()) else {
                        return Outcome::fail("handles unset");
                    };
                    slot.reset_invocation_counter();
                    match function.invoke(unit, &[]) {
                        Ok(Some(_)) => Outcome::halt("recharged"),
                        Ok(None) => Outcome::fail("inner call produced nothing"),
                        Err(e) => Outcome::fail(e),
                    }
                },
                ExecutorOptions::new().with_limit(1),
            )
            .build()
            .unwrap(),
    );
    let slot = function.executor("surge").unwrap();
    this.set(Arc::downgrade(&function)).unwrap();
    own_slot.set(slot.clone()).unwrap();
    fallback(&function);
    let unit = Unit::new("mage");

    // The halting outer call must not hand back the inner call's count.
    assert_eq!(function.invoke(&unit, &args![1]).unwrap(), None);
    assert_eq!(slot.invocation_count(), 1);
    assert!(!slot.is_eligible());
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(-1));
}

#[test]
fn test_panicking_executor_gives_its_invocation_back() {
    let function = Function::<Unit, i64>::new("volatile", Default::default());
    let armed = Arc::new(AtomicBool::new(true));
    let trigger = armed.clone();
    let slot = function
        .add_executor(
            "unstable",
            move |_: &Unit, _: &[Value]| {
                if trigger.load(Ordering::SeqCst) {
                    panic!("unstable executor");
                }
                Outcome::Value(1)
            },
            ExecutorOptions::new().with_limit(1),
        )
        .unwrap();
    let unit = Unit::new("a");

    let result = panic::catch_unwind(AssertUnwindSafe(|| function.invoke(&unit, &[])));
    assert!(result.is_err());
    assert_eq!(slot.invocation_count(), 0);
    assert!(slot.is_eligible());

    armed.store(false, Ordering::SeqCst);
    assert_eq!(function.invoke(&unit, &[]).unwrap(), Some(1));
    assert_eq!(slot.invocation_count(), 1);
}
