//! Every role driven through the registry and the host traits.

use crate::common::{load, record, registry};
use serde_json::{json, Value};
use sl_error::ScriptError;
use sl_traits::{CancellationToken, Plugin};
use sl_types::{Packet, PluginDefinition, Record, Role};

#[test]
fn test_subscription_poll() {
    let registry = registry();
    let Plugin::Subscription(source) = load(
        &registry,
        Role::Subscription,
        r#"
        for i in 0..3 {
            a.push(#{ seq: i, source: "generator" });
        }
        "#,
    ) else {
        panic!("expected subscription");
    };

    let token = CancellationToken::new();
    let batch = source.read(&token).unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(batch[2].get("seq"), Some(&json!(2)));
    assert!(source.close().is_ok());
}

#[test]
fn test_applicative_replaces_key_set() {
    let registry = registry();
    let Plugin::Applicative(transform) = load(&registry, Role::Applicative, "a = #{ x: 1 };")
    else {
        panic!("expected applicative");
    };

    let mut data = record(json!({"y": 2}));
    let before = &data as *const Record;
    transform.apply(&mut data).unwrap();

    assert_eq!(Value::Object(data.clone()), json!({"x": 1}));
    assert_eq!(before, &data as *const Record);
}

#[test]
fn test_applicative_error_is_returned() {
    let registry = registry();
    let Plugin::Applicative(transform) = load(
        &registry,
        Role::Applicative,
        r#"if !("id" in data) { throw "missing id"; } a = data;"#,
    ) else {
        panic!("expected applicative");
    };

    let mut data = record(json!({"name": "x"}));
    let err = transform.apply(&mut data).unwrap_err();

    assert!(matches!(err, ScriptError::Runtime { .. }));
    assert!(err.to_string().contains("missing id"));
    assert_eq!(Value::Object(data), json!({"name": "x"}));
}

#[test]
fn test_comparator_returns_script_value_unmodified() {
    let registry = registry();
    let Plugin::Comparator(cmp) = load(&registry, Role::Comparator, "compare = a.n * 10 - b.n;")
    else {
        panic!("expected comparator");
    };

    let one = record(json!({"n": 1}));
    let two = record(json!({"n": 2}));

    assert_eq!(cmp.compare(&one, &two), 8);
    assert_eq!(cmp.compare(&two, &one), 19);
}

#[test]
fn test_comparator_sorts() {
    let registry = registry();
    let Plugin::Comparator(cmp) = load(
        &registry,
        Role::Comparator,
        "compare = a.name.len() - b.name.len();",
    ) else {
        panic!("expected comparator");
    };

    let mut rows: Vec<Record> = ["ccc", "a", "bb"]
        .into_iter()
        .map(|name| record(json!({ "name": name })))
        .collect();
    rows.sort_by(|a, b| cmp.ordering(a, b));

    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["a", "bb", "ccc"]);
}

#[test]
fn test_fold_reduces() {
    let registry = registry();
    let Plugin::Fold(reducer) = load(
        &registry,
        Role::Fold,
        r#"
        aggregate.count = if "count" in aggregate { aggregate.count + 1 } else { 1 };
        aggregate.max = if "max" in aggregate && aggregate.max > next.v { aggregate.max } else { next.v };
        "#,
    ) else {
        panic!("expected fold");
    };

    let result = [3, 9, 4]
        .into_iter()
        .map(|v| record(json!({ "v": v })))
        .fold(Record::new(), |acc, next| reducer.fold(&acc, &next));

    assert_eq!(Value::Object(result), json!({"count": 3, "max": 9}));
}

#[test]
fn test_fork_splits_packets() {
    let registry = registry();
    let Plugin::Fork(splitter) = load(
        &registry,
        Role::Fork,
        r#"
        for p in payload {
            if p.id.starts_with("hot") { a.push(p); } else { b.push(p); }
        }
        "#,
    ) else {
        panic!("expected fork");
    };

    let payload = vec![
        Packet::new("hot-1", record(json!({"t": 90}))),
        Packet::new("cold-1", record(json!({"t": 10}))),
        Packet::new("hot-2", record(json!({"t": 80}))),
    ];
    let (hot, cold) = splitter.fork(payload.clone());

    assert_eq!(hot, vec![payload[0].clone(), payload[2].clone()]);
    assert_eq!(cold, vec![payload[1].clone()]);
}

#[test]
fn test_fork_rule_predicate() {
    let registry = registry();
    let Plugin::ForkRule(rule) = load(&registry, Role::ForkRule, "compare = data.score >= 50;")
    else {
        panic!("expected fork rule");
    };

    assert!(rule.evaluate(&record(json!({"score": 75}))));
    assert!(!rule.evaluate(&record(json!({"score": 25}))));
}

#[test]
fn test_remover_reads_data() {
    let registry = registry();
    let Plugin::Remover(remover) = load(&registry, Role::Remover, "result = data.a;") else {
        panic!("expected remover");
    };

    assert!(remover.remove(0, &record(json!({"a": true}))));
}

#[test]
fn test_publisher_reports_failure_as_value() {
    let registry = registry();
    let Plugin::Publisher(sink) = load(
        &registry,
        Role::Publisher,
        r#"
        for r in data {
            if !("id" in r) { result = error("record without id"); }
        }
        "#,
    ) else {
        panic!("expected publisher");
    };

    assert!(sink.send(&[record(json!({"id": 1}))]).is_ok());

    let err = sink.send(&[record(json!({"id": 1})), Record::new()]).unwrap_err();
    assert!(matches!(err, ScriptError::Rejected { .. }));
    assert!(err.to_string().contains("record without id"));
}

#[test]
fn test_malformed_source_fails_registration_for_every_role() {
    let registry = registry();

    for role in Role::ALL {
        let definition = PluginDefinition::new("unbalanced", role, "a = #{ x: (1 + 2 };");
        let err = registry.load(&definition).unwrap_err();

        assert!(matches!(err, ScriptError::Compile { .. }), "{role}: {err:?}");
        let message = err.to_string();
        assert!(message.contains("unbalanced"), "{message}");
        assert!(message.contains(role.as_str()), "{message}");
    }
}

#[test]
fn test_definition_from_json() {
    let registry = registry();
    let definition: PluginDefinition = serde_json::from_value(json!({
        "name": "errors-left",
        "type": "rhai",
        "symbol": "fork-rule",
        "payload": "compare = data.level == \"ERROR\";"
    }))
    .unwrap();

    let plugin = registry.load(&definition).unwrap();
    assert_eq!(plugin.role(), Role::ForkRule);
}

#[test]
fn test_unknown_provider_and_role() {
    let registry = registry();

    let lua = PluginDefinition::new("x", Role::Applicative, "a = data;").with_provider("lua");
    assert!(matches!(
        registry.load(&lua).unwrap_err(),
        ScriptError::UnknownProvider(ref p) if p == "lua"
    ));

    let mut bogus = PluginDefinition::new("x", Role::Applicative, "a = data;");
    bogus.role = "transformer".to_string();
    assert!(matches!(
        registry.load(&bogus).unwrap_err(),
        ScriptError::UnknownRole(_)
    ));
}
