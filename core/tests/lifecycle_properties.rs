//! Property tests for generated managers.
//!
//! These hold for every resource name and every argument list, not just the
//! handful of fixtures used in the unit tests.

#![allow(clippy::unwrap_used)]

use fetch_lifecycle_core::{
    ManagerDescriptor, Phase, StateSlice, Value, is_truthy, json, make_action_creator,
};
use proptest::prelude::*;

fn resource_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,15}"
}

fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_scalar().prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn slice() -> impl Strategy<Value = StateSlice> {
    prop::collection::btree_map("[a-z]{1,6}", json_value(), 0..5)
        .prop_map(|map| StateSlice::from(map.into_iter().collect::<serde_json::Map<_, _>>()))
}

proptest! {
    #[test]
    fn action_types_follow_name_and_suffix(name in resource_name()) {
        let manager = ManagerDescriptor::new(name.clone()).build().unwrap();

        for (phase, action_type) in manager.action_types().iter() {
            prop_assert_eq!(action_type, &format!("{name}_{}", phase.suffix()));
        }
        prop_assert_eq!(manager.action_type_keys().len(), 4);
    }

    #[test]
    fn creators_without_args_are_bare(name in resource_name()) {
        let manager = ManagerDescriptor::new(name).build().unwrap();

        for (phase, creator) in manager.actions().iter() {
            let action = creator.create(&[]);
            prop_assert!(action.is_bare());
            prop_assert_eq!(action.action_type(), manager.action_types().get(phase));
        }
    }

    #[test]
    fn creators_keep_truthy_and_skip_falsy(args in prop::collection::vec(json_value(), 0..4)) {
        let names = ["a", "b", "c"];
        let manager = ManagerDescriptor::new("P").arg_names(names).build().unwrap();
        let action = manager.success(&args);

        for (index, name) in names.iter().enumerate() {
            match args.get(index) {
                Some(value) if is_truthy(value) => prop_assert_eq!(action.get(name), Some(value)),
                _ => prop_assert_eq!(action.get(name), None),
            }
        }
    }

    #[test]
    fn initial_reducer_is_deterministic(previous in slice()) {
        let manager = ManagerDescriptor::new("R").build().unwrap();
        let action = manager.initial(&[]);

        let once = manager.reducer_methods().initial(&previous, &action);
        let twice = manager.reducer_methods().initial(&once, &action);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, manager.reducer_methods().initial(&previous, &action));
    }

    #[test]
    fn success_round_trips_payload(
        results in "[a-z]{1,8}",
        payload in json_value().prop_filter("payload must survive the falsy rule", is_truthy),
        previous in slice(),
    ) {
        let manager = ManagerDescriptor::new("RT").results_prop_name(results.clone()).build().unwrap();

        let next = manager.reducer_methods().success(&previous, &manager.success(&[payload.clone()]));

        prop_assert_eq!(next.get(&results), Some(&payload));
        prop_assert!(!next.loading());
    }

    #[test]
    fn reducers_never_touch_unrelated_keys(previous in slice(), payload in json_value()) {
        let manager = ManagerDescriptor::new("K").results_prop_name("results").build().unwrap();
        let owned = ["loading", "error", "results"];

        for phase in Phase::ALL {
            let action = manager.actions().get(phase).create(&[payload.clone()]);
            let next = manager.reducer_methods().reduce(phase, &previous, &action);
            for (key, value) in previous.as_map() {
                if !owned.contains(&key.as_str()) {
                    prop_assert_eq!(next.get(key), Some(value));
                }
            }
        }
    }

    #[test]
    fn bare_creator_never_skips(value in json_value()) {
        let creator = make_action_creator("ADD_TODO", ["text"]);
        let action = creator.create(&[value.clone()]);
        prop_assert_eq!(action.get("text"), Some(&value));
        prop_assert_eq!(action.len(), 1);
    }
}

#[test]
fn make_action_creator_example() {
    let add_todo = make_action_creator("ADD_TODO", ["text"]);

    assert_eq!(
        serde_json::to_value(add_todo.create(&[json!("hi")])).unwrap(),
        json!({"type": "ADD_TODO", "text": "hi"})
    );
    assert_eq!(
        serde_json::to_value(add_todo.create(&[json!("")])).unwrap(),
        json!({"type": "ADD_TODO", "text": ""})
    );
}
