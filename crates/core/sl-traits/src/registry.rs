//! ProviderRegistry - maps provider names to plugin providers.

use crate::plugin::{Plugin, PluginProvider};
use hashbrown::HashMap;
use sl_error::{Result, ScriptError};
use sl_types::PluginDefinition;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registry of plugin providers.
///
/// Built once at startup and shared read-only afterwards; there is no
/// process-global registration.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn PluginProvider>>,
}

impl ProviderRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider under `name`, replacing any previous one.
    pub fn with_provider(
        mut self,
        name: impl Into<String>,
        provider: impl PluginProvider + 'static,
    ) -> Self {
        self.providers.insert(name.into(), Arc::new(provider));
        self
    }

    /// Gets a provider by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn PluginProvider>> {
        self.providers.get(name)
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Loads a definition with the provider it names.
    pub fn load(&self, definition: &PluginDefinition) -> Result<Plugin> {
        let provider = self
            .get(&definition.provider)
            .ok_or_else(|| ScriptError::UnknownProvider(definition.provider.clone()))?;

        let plugin = provider.load(definition)?;

        debug!(
            plugin = %definition.name,
            provider = %definition.provider,
            role = %plugin.role(),
            "Loaded plugin"
        );

        Ok(plugin)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.providers.keys().collect();
        names.sort();
        f.debug_struct("ProviderRegistry")
            .field("providers", &names)
            .finish()
    }
}
