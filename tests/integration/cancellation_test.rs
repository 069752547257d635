//! Subscription cancellation from outside the polling thread.

use crate::common::{init_tracing, load, registry_with};
use sl_rhai::{EngineLimits, ProviderConfig, RhaiProvider};
use sl_traits::{CancellationToken, Plugin, Subscription};
use sl_types::{PluginDefinition, Role};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const ENDLESS: &str = r#"
let n = 0;
while true {
    n += 1;
}
a = [#{ n: n }];
"#;

fn unlimited() -> ProviderConfig {
    ProviderConfig::default().with_limits(EngineLimits {
        max_operations: 0,
        ..EngineLimits::default()
    })
}

fn endless_subscription() -> Arc<dyn Subscription> {
    let registry = registry_with(unlimited());
    match load(&registry, Role::Subscription, ENDLESS) {
        Plugin::Subscription(source) => source,
        other => panic!("expected subscription, got {other:?}"),
    }
}

#[test]
fn test_cancel_mid_poll_from_another_thread() {
    let source = endless_subscription();
    let token = CancellationToken::new();

    let result = thread::scope(|s| {
        let poller = s.spawn(|| source.read(&token));
        thread::sleep(Duration::from_millis(50));
        token.cancel();
        poller.join().unwrap()
    });

    let cancelled = result.unwrap_err();
    assert_eq!(cancelled.origin.role, "subscription");
}

#[test]
fn test_already_cancelled_token() {
    let source = endless_subscription();
    let token = CancellationToken::new();
    token.cancel();

    assert!(source.read(&token).is_err());
}

#[test]
fn test_child_token_cancelled_by_parent() {
    let source = endless_subscription();
    let parent = CancellationToken::new();
    let child = parent.child_token();

    let result = thread::scope(|s| {
        let poller = s.spawn(|| source.read(&child));
        thread::sleep(Duration::from_millis(20));
        parent.cancel();
        poller.join().unwrap()
    });

    assert!(result.is_err());
}

#[test]
fn test_polls_stop_after_cancel() {
    init_tracing();
    let provider = RhaiProvider::default();
    let definition = PluginDefinition::new("ticks", Role::Subscription, "a = [#{ t: timestamp() }];");
    let source = provider.subscription(&definition).unwrap();

    let token = CancellationToken::new();
    let batches: Vec<_> = source.polls(&token).take(3).collect();
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|b| b.len() == 1));

    token.cancel();
    assert_eq!(source.polls(&token).count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_blocking_poll_from_async_host() {
    let source = endless_subscription();
    let token = CancellationToken::new();

    let poll = {
        let source = Arc::clone(&source);
        let token = token.clone();
        tokio::task::spawn_blocking(move || source.read(&token))
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    token.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), poll)
        .await
        .expect("poll did not stop after cancellation")
        .unwrap();
    assert!(result.is_err());
}
