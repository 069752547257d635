//! One loaded plugin shared by many threads.

use crate::common::{load, record, registry};
use serde_json::{json, Value};
use sl_traits::Plugin;
use sl_types::{Record, Role};
use std::thread;

#[test]
fn test_applicative_calls_do_not_share_state() {
    let registry = registry();
    let Plugin::Applicative(transform) = load(
        &registry,
        Role::Applicative,
        r#"
        a = data;
        a.calls = if "calls" in data { data.calls + 1 } else { 1 };
        "#,
    ) else {
        panic!("expected applicative");
    };

    thread::scope(|s| {
        for worker in 0..8 {
            let transform = &transform;
            s.spawn(move || {
                for i in 0..25 {
                    let id = worker * 100 + i;
                    let mut data = record(json!({ "id": id }));
                    transform.apply(&mut data).unwrap();
                    assert_eq!(Value::Object(data), json!({ "id": id, "calls": 1 }));
                }
            });
        }
    });
}

#[test]
fn test_comparator_sorts_in_parallel() {
    let registry = registry();
    let Plugin::Comparator(cmp) = load(&registry, Role::Comparator, "compare = b.v - a.v;") else {
        panic!("expected comparator");
    };

    let input: Vec<Record> = [5, 1, 4, 2, 3]
        .into_iter()
        .map(|v| record(json!({ "v": v })))
        .collect();

    let sorted: Vec<Vec<i64>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cmp = &cmp;
                let mut rows = input.clone();
                s.spawn(move || {
                    rows.sort_by(|a, b| cmp.ordering(a, b));
                    rows.iter().filter_map(|r| r["v"].as_i64()).collect::<Vec<i64>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for order in sorted {
        assert_eq!(order, vec![5, 4, 3, 2, 1]);
    }
}

#[test]
fn test_fork_rule_is_order_independent() {
    let registry = registry();
    let Plugin::ForkRule(rule) = load(&registry, Role::ForkRule, "compare = data.n % 2 == 0;")
    else {
        panic!("expected fork rule");
    };

    let forward: Vec<bool> = (0..20).map(|n| rule.evaluate(&record(json!({ "n": n })))).collect();
    let mut backward: Vec<bool> = (0..20)
        .rev()
        .map(|n| rule.evaluate(&record(json!({ "n": n }))))
        .collect();
    backward.reverse();

    assert_eq!(forward, backward);
}
