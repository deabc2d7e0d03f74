use hookline::{ExecutorOptions, Function, Outcome, ParamType, ParameterSchema, Value};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

mod common;
use common::{Unit, tally};

fn int_arguments() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(any::<i64>().prop_map(Value::Int), 0..8)
}

proptest! {
    /// Property: executors run by descending priority, ties in registration order
    #[test]
    fn execution_order_is_priority_then_registration(priorities in prop::collection::vec(-3i32..3, 0..12)) {
        let order = Arc::new(Mutex::new(Vec::new()));
        let function = Function::<Unit, i64>::new("ordered", ParameterSchema::new());
        for (index, priority) in priorities.iter().copied().enumerate() {
            let log = order.clone();
            function
                .add_executor(
                    format!("e{index}"),
                    move |_: &Unit, _: &[Value]| {
                        log.lock().unwrap().push(index);
                        Outcome::Skip
                    },
                    ExecutorOptions::new().with_priority(priority),
                )
                .unwrap();
        }

        function.invoke(&Unit::new("a"), &[]).unwrap();

        let mut expected: Vec<usize> = (0..priorities.len()).collect();
        expected.sort_by_key(|&index| std::cmp::Reverse(priorities[index]));
        prop_assert_eq!(order.lock().unwrap().clone(), expected);
    }

    /// Property: an empty schema never rejects anything
    #[test]
    fn empty_schema_accepts_everything(arguments in int_arguments(), extra in ".{0,8}") {
        let mut arguments = arguments;
        arguments.push(Value::from(extra));
        arguments.push(Value::Null);
        prop_assert!(ParameterSchema::new().validate(&arguments));
    }

    /// Property: an int tail accepts any number of ints, spread or as one list
    #[test]
    fn variadic_int_tail_accepts_ints(arguments in int_arguments()) {
        let schema = ParameterSchema::new().variadic(ParamType::Int);
        prop_assert!(schema.validate(&arguments));
        prop_assert!(schema.validate(&[Value::List(arguments.clone())]));

        let mut with_str = arguments;
        with_str.push(Value::from("x"));
        prop_assert!(!schema.validate(&with_str));
    }

    /// Property: a limited executor runs exactly min(limit, calls) times
    #[test]
    fn limit_bounds_invocations(limit in 0u32..6, calls in 0usize..10) {
        let function = Function::<Unit, i64>::new("bounded", ParameterSchema::new());
        let (executor, count) = tally();
        function
            .add_executor("limited", executor, ExecutorOptions::new().with_limit(limit))
            .unwrap();

        let unit = Unit::new("a");
        let mut produced = 0;
        for _ in 0..calls {
            if function.invoke(&unit, &[]).unwrap().is_some() {
                produced += 1;
            }
        }

        let expected = calls.min(limit as usize);
        prop_assert_eq!(produced, expected);
        prop_assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), expected);
    }
}
