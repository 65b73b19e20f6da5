//! Property-based laws of the checking engine.

use proptest::arbitrary::any as arb;
use proptest::prelude::*;
use serde_json::{Map, Value};
// `any` would collide between the two preludes; the builder is imported
// under its module path instead.
use strut::prelude::{
    array_of, exact, number, object_of, one_of, one_of_type, schema, shape, string, Checkable,
    PathSegment,
};

/// Generates arbitrary JSON values a few levels deep.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        arb::<bool>().prop_map(Value::Bool),
        arb::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..5).prop_map(|fields| {
                Value::Object(Map::from_iter(
                    fields.into_iter().map(|(key, value)| (key, value)),
                ))
            }),
        ]
    })
}

/// A small pool of representative types to run the laws against.
fn sample_types() -> Vec<Checkable> {
    vec![
        strut::any(),
        number(),
        string().required(),
        one_of([Value::from(1), Value::from("a"), Value::Null]),
        array_of(number()),
        object_of(string()),
        shape(schema! {
            id => number().required(),
            name => string(),
        }),
        exact(schema! { id => number() }),
        one_of_type([number(), string()]),
    ]
}

proptest! {
    // check(v, t) is a pure function: repeated calls return structurally
    // equal results.
    #[test]
    fn checking_is_pure(value in arb_value()) {
        for ty in sample_types() {
            prop_assert_eq!(ty.check(Some(&value)), ty.check(Some(&value)));
        }
    }

    // Chaining never mutates the original type.
    #[test]
    fn chaining_is_copy_on_write(value in arb_value()) {
        for ty in sample_types() {
            let before = ty.check(Some(&value));
            let names_before: Vec<String> =
                ty.rule_names().iter().map(ToString::to_string).collect();

            let _chained = ty.required().string();

            prop_assert_eq!(ty.rule_names(), names_before);
            prop_assert_eq!(ty.check(Some(&value)), before);
        }
    }

    // A union passes iff at least one branch passes.
    #[test]
    fn union_law(value in arb_value()) {
        let branches = [number(), string()];
        let union = one_of_type(branches.clone());

        let any_branch_passes = branches
            .iter()
            .any(|branch| branch.check(Some(&value)).is_empty());
        prop_assert_eq!(union.check(Some(&value)).is_empty(), any_branch_passes);
    }

    // Absent values pass everything except `required`.
    #[test]
    fn absence_only_trips_required(index in 0usize..9) {
        let types = sample_types();
        let ty = &types[index];
        let expect_required = ty.has_rule("required");
        let issues = ty.check(None);
        prop_assert_eq!(!issues.is_empty(), expect_required);
    }

    // Issue paths always point at a real location inside the value: a
    // shape issue path is either resolvable or names a missing key the
    // schema requires.
    #[test]
    fn array_of_issue_paths_index_the_value(values in prop::collection::vec(arb_value(), 0..6)) {
        let ty = array_of(number());
        let value = Value::Array(values.clone());
        for issue in ty.check(Some(&value)) {
            let PathSegment::Index(index) = &issue.path[0] else {
                panic!("array_of issues must start with an index");
            };
            prop_assert!(*index < values.len());
        }
    }
}
