//! End-to-end integration tests for the filter pipeline
//!
//! These tests drive complete pipelines through `FilterRunner`, the way a
//! request handler would: build a filter once, run it against incoming
//! data, then inspect validity, the cleaned (possibly partial) result and
//! the per-path error report.

use serde_json::{json, Value};
use strainer_core::filters::{Choice, Int, Max, Min, NoOp, NotEmpty, Optional, Required};
use strainer_core::{
    ApplyContext, ErrorCode, Filter, FilterChain, FilterMapper, FilterRepeater, FilterRunner,
    FilterSwitch, KeyPolicy,
};

#[test]
fn test_chain_of_leaf_filters() {
    let chain = FilterChain::of(Required).then(Int).then(Min::new(0)).then(Max::new(100));

    let runner = FilterRunner::new(chain.clone(), json!("42"));
    assert!(runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!(42)));

    let runner = FilterRunner::new(chain, json!("123"));
    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), None);
    assert_eq!(runner.error_codes()[""], vec![ErrorCode::OutOfRange]);
}

#[test]
fn test_chain_reports_only_the_first_failure() {
    // Int fails first; Min never sees the value, so exactly one error is
    // recorded.
    let chain = FilterChain::of(Int).then(Min::new(0));
    let runner = FilterRunner::new(chain, json!("not a number"));

    assert!(!runner.is_valid());
    assert_eq!(runner.messages().len(), 1);
    assert_eq!(runner.messages()[0].code, ErrorCode::FormatInvalid);
}

#[test]
fn test_mapper_best_effort_partial_result() {
    let mapper = FilterMapper::new().field("a", Int).field("b", Int);
    let runner = FilterRunner::new(mapper, json!({"a": "42", "b": "bad"}));

    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!({"a": 42, "b": null})));

    let errors = runner.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["b"][0].code, ErrorCode::FormatInvalid);
}

#[test]
fn test_mapper_missing_key_policies() {
    // Missing keys rejected: the error lands at the key's path.
    let strict = FilterMapper::new()
        .field("a", Int)
        .missing_keys(KeyPolicy::Deny);
    let runner = FilterRunner::new(strict, json!({}));
    assert!(!runner.is_valid());
    assert_eq!(runner.error_codes()["a"], vec![ErrorCode::KeyMissing]);

    // Missing keys allowed: the chain runs on the absent sentinel and the
    // output still carries the key.
    let lenient = FilterMapper::new().field("a", Int);
    let runner = FilterRunner::new(lenient, json!({}));
    assert!(runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!({"a": null})));
}

#[test]
fn test_mapper_missing_key_defaulted_by_chain() {
    // A default-providing stage ahead of the validator turns a missing key
    // into a concrete value instead of an error.
    let mapper = FilterMapper::new().field(
        "page",
        FilterChain::of(Optional::new(json!(1))).then(Int).then(Min::new(1)),
    );
    let runner = FilterRunner::new(mapper, json!({}));

    assert!(runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!({"page": 1})));
}

#[test]
fn test_mapper_extra_key_policies() {
    let input = json!({"a": "1", "note": "hi", "other": true});

    let passthru = FilterMapper::new().field("a", Int);
    let runner = FilterRunner::new(passthru, input.clone());
    assert!(runner.is_valid());
    assert_eq!(
        runner.cleaned_data(),
        Some(&json!({"a": 1, "note": "hi", "other": true}))
    );

    let strict = FilterMapper::new().field("a", Int).extra_keys(KeyPolicy::Deny);
    let runner = FilterRunner::new(strict, input.clone());
    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!({"a": 1})));
    assert_eq!(runner.error_codes()["note"], vec![ErrorCode::KeyNotAllowed]);
    assert_eq!(runner.error_codes()["other"], vec![ErrorCode::KeyNotAllowed]);

    let selective = FilterMapper::new()
        .field("a", Int)
        .extra_keys(KeyPolicy::only(["note"]));
    let runner = FilterRunner::new(selective, input);
    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!({"a": 1, "note": "hi"})));
}

#[test]
fn test_mapper_inside_mapper_qualifies_nested_paths() {
    let filter = FilterMapper::new().field(
        "order",
        FilterMapper::new()
            .field("id", FilterChain::of(Required).then(Int))
            .missing_keys(KeyPolicy::Deny),
    );
    let runner = FilterRunner::new(filter, json!({"order": {}}));

    assert!(!runner.is_valid());
    assert_eq!(runner.error_codes()["order.id"], vec![ErrorCode::KeyMissing]);
    assert_eq!(runner.cleaned_data(), Some(&json!({"order": {"id": null}})));
}

#[test]
fn test_repeater_over_sequence() {
    let repeater = FilterRepeater::new(Int);
    let runner = FilterRunner::new(repeater, json!(["1", "2", "bad"]));

    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!([1, 2, null])));
    assert_eq!(runner.error_codes()["2"], vec![ErrorCode::FormatInvalid]);
}

#[test]
fn test_repeater_over_mapping() {
    let repeater = FilterRepeater::new(Int);
    let runner = FilterRunner::new(repeater, json!({"x": "1", "y": "bad"}));

    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!({"x": 1, "y": null})));
    assert_eq!(runner.error_codes()["y"], vec![ErrorCode::FormatInvalid]);
}

#[test]
fn test_repeater_inside_repeater() {
    let filter = FilterRepeater::new(FilterRepeater::new(Int));
    let runner = FilterRunner::new(filter, json!([["1", "2"], ["3", "oops"]]));

    assert!(!runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!([[1, 2], [3, null]])));
    assert_eq!(runner.error_codes()["1.1"], vec![ErrorCode::FormatInvalid]);
}

#[test]
fn test_mapper_and_repeater_compose() {
    let filter = FilterMapper::new()
        .field("name", FilterChain::of(Required).then(NotEmpty::new()))
        .field("scores", FilterRepeater::new(FilterChain::of(Int).then(Min::new(0))))
        .missing_keys(KeyPolicy::Deny)
        .extra_keys(KeyPolicy::Deny);

    let runner = FilterRunner::new(
        filter,
        json!({"name": "alice", "scores": ["10", "-3", "7"]}),
    );

    assert!(!runner.is_valid());
    assert_eq!(
        runner.cleaned_data(),
        Some(&json!({"name": "alice", "scores": [10, null, 7]}))
    );
    assert_eq!(runner.error_codes()["scores.1"], vec![ErrorCode::OutOfRange]);
}

#[test]
fn test_switch_routes_the_whole_input() {
    let filter = FilterSwitch::by_key("name")
        .case(
            "price",
            FilterMapper::new().field("name", NoOp).field("value", Int),
        )
        .fallback(NoOp);

    // The matched chain sees the whole mapping, not the discriminant.
    let runner = FilterRunner::new(filter, json!({"name": "price", "value": "5"}));
    assert!(runner.is_valid());
    assert_eq!(
        runner.cleaned_data(),
        Some(&json!({"name": "price", "value": 5}))
    );
}

#[test]
fn test_switch_without_fallback_rejects_unknown_discriminants() {
    let filter = FilterSwitch::by_key("name").case("price", NoOp);
    let runner = FilterRunner::new(filter, json!({"name": "color"}));

    assert!(!runner.is_valid());
    assert_eq!(runner.error_codes()[""], vec![ErrorCode::NoMatchingCase]);
}

#[test]
fn test_switch_inside_repeater() {
    let event = FilterSwitch::by_key("kind")
        .case(
            "add",
            FilterMapper::new().field("kind", NoOp).field("amount", Int),
        )
        .case("reset", NoOp);
    let filter = FilterRepeater::new(event);

    let runner = FilterRunner::new(
        filter,
        json!([
            {"kind": "add", "amount": "3"},
            {"kind": "reset"},
            {"kind": "unknown"},
        ]),
    );

    assert!(!runner.is_valid());
    assert_eq!(
        runner.cleaned_data(),
        Some(&json!([
            {"kind": "add", "amount": 3},
            {"kind": "reset"},
            null,
        ]))
    );
    assert_eq!(runner.error_codes()["2"], vec![ErrorCode::NoMatchingCase]);
}

#[test]
fn test_choice_membership() {
    let chain = FilterChain::of(Choice::new(["asc", "desc"]));
    let runner = FilterRunner::new(chain, json!("sideways"));

    assert!(!runner.is_valid());
    assert_eq!(
        runner.error_codes()[""],
        vec![ErrorCode::Custom("not_valid_choice".into())]
    );
}

#[test]
fn test_absent_passes_every_builtin_except_required() {
    let filters: Vec<Box<dyn Filter>> = vec![
        Box::new(NoOp),
        Box::new(NotEmpty::new()),
        Box::new(Int),
        Box::new(Min::new(0)),
        Box::new(Max::new(10)),
        Box::new(Choice::new(["a"])),
        Box::new(strainer_core::filters::ExpectType::new(strainer_core::ValueKind::Integer)),
        Box::new(strainer_core::filters::Length::new(3)),
        Box::new(strainer_core::filters::MinLength::new(1)),
        Box::new(strainer_core::filters::MaxLength::new(3)),
        Box::new(FilterChain::of(Int)),
        Box::new(FilterMapper::new().field("a", Int)),
        Box::new(FilterRepeater::new(Int)),
        Box::new(FilterSwitch::by_key("k").case("a", NoOp)),
    ];

    for filter in &filters {
        let mut ctx = ApplyContext::new();
        let cleaned = filter.apply(None, &mut ctx);
        assert_eq!(cleaned, None, "{:?} transformed the absent sentinel", filter);
        assert!(ctx.is_valid(), "{:?} rejected the absent sentinel", filter);
    }

    let mut ctx = ApplyContext::new();
    assert_eq!(Required.apply(None, &mut ctx), None);
    assert_eq!(ctx.errors().len(), 1);
    assert_eq!(ctx.errors()[0].code, ErrorCode::KeyMissing);
}

#[test]
fn test_runner_error_payload_serializes() {
    let mapper = FilterMapper::new()
        .field("price", FilterChain::of(Required).then(Int))
        .missing_keys(KeyPolicy::Deny);
    let runner = FilterRunner::new(mapper, json!({}));

    let payload = serde_json::to_value(runner.errors()).unwrap();
    assert_eq!(
        payload,
        json!({
            "price": [{
                "code": "key_missing",
                "message": "price is required.",
                "context": "price",
            }],
        })
    );
}

/// A leaf filter written the way downstream crates write them: it derives a
/// sub-value, delegates to another filter through the context, and checks
/// the returned flag before proceeding.
#[derive(Debug)]
struct FirstElement {
    element: FilterChain,
}

impl Filter for FirstElement {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let Value::Array(mut items) = value else {
            ctx.reject(ErrorCode::TypeMismatch, "sequence expected.");
            return None;
        };
        if items.is_empty() {
            ctx.reject(ErrorCode::LengthMismatch, "Non-empty value expected.");
            return None;
        }

        let (first, clean) = ctx.apply(&self.element, Some(items.swap_remove(0)));
        if !clean {
            // The delegated errors are already recorded at this filter's
            // own path; nothing to re-qualify.
            return None;
        }
        first
    }
}

#[test]
fn test_sub_filter_delegation_merges_errors_at_the_callers_path() {
    let filter = FilterMapper::new().field(
        "head",
        FirstElement {
            element: FilterChain::of(Int).then(Min::new(0)),
        },
    );

    let runner = FilterRunner::new(filter, json!({"head": ["-4", "ignored"]}));
    assert!(!runner.is_valid());
    // The delegated Min failure surfaces at "head", not at a deeper path.
    assert_eq!(runner.error_codes()["head"], vec![ErrorCode::OutOfRange]);

    let runner = FilterRunner::new(
        FirstElement {
            element: FilterChain::of(Int),
        },
        json!(["7"]),
    );
    assert!(runner.is_valid());
    assert_eq!(runner.cleaned_data(), Some(&json!(7)));
}

/// Factory function bundling a parametrized chain into a reusable, named
/// filter.
fn bounded_int(min: i64, max: i64) -> FilterChain {
    FilterChain::of(Required).then(Int).then(Min::new(min)).then(Max::new(max))
}

#[test]
fn test_factory_functions_compose_like_any_filter() {
    let filter = FilterMapper::new()
        .field("percent", bounded_int(0, 100))
        .field("port", bounded_int(1, 65535));

    let runner = FilterRunner::new(filter, json!({"percent": "150", "port": "8080"}));
    assert!(!runner.is_valid());
    assert_eq!(
        runner.cleaned_data(),
        Some(&json!({"percent": null, "port": 8080}))
    );
    assert_eq!(runner.error_codes()["percent"], vec![ErrorCode::OutOfRange]);
}
