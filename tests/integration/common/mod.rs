//! Common utilities for integration tests.

use serde_json::Value;
use sl_rhai::{ProviderConfig, RhaiProvider};
use sl_traits::{Plugin, ProviderRegistry};
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Registry with the Rhai provider under its default name.
pub fn registry() -> ProviderRegistry {
    registry_with(ProviderConfig::default())
}

pub fn registry_with(config: ProviderConfig) -> ProviderRegistry {
    init_tracing();
    ProviderRegistry::new().with_provider(RhaiProvider::NAME, RhaiProvider::new(config))
}

/// Loads a Rhai plugin for `role`, panicking on load failure.
pub fn load(registry: &ProviderRegistry, role: Role, source: &str) -> Plugin {
    let definition = PluginDefinition::new(format!("it-{role}"), role, source);
    registry
        .load(&definition)
        .unwrap_or_else(|e| panic!("failed to load {role}: {e}"))
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}
