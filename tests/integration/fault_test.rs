//! Escalated failures seen from a host that catches them.

use crate::common::{load, record, registry};
use serde_json::json;
use sl_error::{classify_error, ErrorCategory, ScriptError};
use sl_rhai::Fault;
use sl_traits::Plugin;
use sl_types::{Packet, Record, Role};
use std::panic::{catch_unwind, AssertUnwindSafe};

fn caught<T>(f: impl FnOnce() -> T) -> ScriptError {
    let payload = match catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("call did not escalate"),
        Err(payload) => payload,
    };
    Fault::from_panic(payload.as_ref())
        .expect("panic payload is not a Fault")
        .error()
        .clone()
}

#[test]
fn test_comparator_script_error_escalates() {
    let registry = registry();
    let Plugin::Comparator(cmp) = load(&registry, Role::Comparator, r#"throw "bad compare";"#)
    else {
        panic!("expected comparator");
    };

    let empty = Record::new();
    let err = caught(|| cmp.compare(&empty, &empty));

    assert!(matches!(err, ScriptError::Runtime { .. }));
    assert_eq!(classify_error(&err), ErrorCategory::Script);
}

#[test]
fn test_fork_non_packet_names_role_and_variable() {
    let registry = registry();
    let Plugin::Fork(splitter) = load(&registry, Role::Fork, r#"a = payload; b = ["text"];"#)
    else {
        panic!("expected fork");
    };

    let err = caught(|| splitter.fork(vec![Packet::new("p", Record::new())]));
    let message = err.to_string();

    assert!(matches!(err, ScriptError::Shape { .. }));
    assert!(message.contains("fork"), "{message}");
    assert!(message.contains("b[0]"), "{message}");
}

#[test]
fn test_remover_non_bool_escalates() {
    let registry = registry();
    let Plugin::Remover(remover) = load(&registry, Role::Remover, "result = data.a;") else {
        panic!("expected remover");
    };

    let err = caught(|| remover.remove(0, &record(json!({"a": "yes"}))));
    assert!(err.to_string().contains("`result`"));
}

#[test]
fn test_host_survives_fault_and_plugin_stays_usable() {
    let registry = registry();
    let Plugin::Fold(reducer) = load(
        &registry,
        Role::Fold,
        r#"if next.bad == true { throw "bad record"; } aggregate.n = next.n;"#,
    ) else {
        panic!("expected fold");
    };

    let bad = record(json!({"bad": true}));
    let err = caught(|| reducer.fold(&Record::new(), &bad));
    assert!(err.to_string().contains("bad record"));

    let good = record(json!({"n": 1}));
    let result = reducer.fold(&Record::new(), &good);
    assert_eq!(result.get("n"), Some(&json!(1)));
}

#[test]
fn test_operation_limit_is_a_fault_not_a_hang() {
    let registry = registry();
    let Plugin::ForkRule(rule) = load(&registry, Role::ForkRule, "while true { } compare = true;")
    else {
        panic!("expected fork rule");
    };

    let err = caught(|| rule.evaluate(&Record::new()));
    assert!(matches!(err, ScriptError::Runtime { .. }));
}
