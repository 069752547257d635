//! The `rhai` provider: turns plugin definitions into role implementations.

use crate::config::ProviderConfig;
use crate::roles::{
    RhaiApplicative, RhaiComparator, RhaiFold, RhaiFork, RhaiForkRule, RhaiPublisher,
    RhaiRemover, RhaiSubscription,
};
use crate::runtime::RuntimeFactory;
use sl_error::Result;
use sl_traits::{Plugin, PluginProvider};
use sl_types::{PluginDefinition, Role};
use std::sync::Arc;
use tracing::debug;

/// Loads Rhai plugin definitions for every role.
///
/// All plugins loaded through one provider share its [`RuntimeFactory`], so
/// they run under the same limits and builtins.
#[derive(Debug, Clone)]
pub struct RhaiProvider {
    runtime: Arc<RuntimeFactory>,
}

impl Default for RhaiProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl RhaiProvider {
    /// Provider name used in plugin definitions.
    pub const NAME: &'static str = "rhai";

    pub fn new(config: ProviderConfig) -> Self {
        Self {
            runtime: Arc::new(RuntimeFactory::new(config)),
        }
    }

    pub fn runtime(&self) -> &Arc<RuntimeFactory> {
        &self.runtime
    }

    pub fn subscription(&self, definition: &PluginDefinition) -> Result<RhaiSubscription> {
        RhaiSubscription::new(definition, &self.runtime)
    }

    pub fn applicative(&self, definition: &PluginDefinition) -> Result<RhaiApplicative> {
        RhaiApplicative::new(definition, &self.runtime)
    }

    pub fn comparator(&self, definition: &PluginDefinition) -> Result<RhaiComparator> {
        RhaiComparator::new(definition, &self.runtime)
    }

    pub fn fold(&self, definition: &PluginDefinition) -> Result<RhaiFold> {
        RhaiFold::new(definition, &self.runtime)
    }

    pub fn fork(&self, definition: &PluginDefinition) -> Result<RhaiFork> {
        RhaiFork::new(definition, &self.runtime)
    }

    pub fn fork_rule(&self, definition: &PluginDefinition) -> Result<RhaiForkRule> {
        RhaiForkRule::new(definition, &self.runtime)
    }

    pub fn remover(&self, definition: &PluginDefinition) -> Result<RhaiRemover> {
        RhaiRemover::new(definition, &self.runtime)
    }

    pub fn publisher(&self, definition: &PluginDefinition) -> Result<RhaiPublisher> {
        RhaiPublisher::new(definition, &self.runtime)
    }
}

impl PluginProvider for RhaiProvider {
    fn load(&self, definition: &PluginDefinition) -> Result<Plugin> {
        let role = definition.parse_role()?;

        let plugin = match role {
            Role::Subscription => Plugin::Subscription(Arc::new(self.subscription(definition)?)),
            Role::Applicative => Plugin::Applicative(Arc::new(self.applicative(definition)?)),
            Role::Comparator => Plugin::Comparator(Arc::new(self.comparator(definition)?)),
            Role::Fold => Plugin::Fold(Arc::new(self.fold(definition)?)),
            Role::Fork => Plugin::Fork(Arc::new(self.fork(definition)?)),
            Role::ForkRule => Plugin::ForkRule(Arc::new(self.fork_rule(definition)?)),
            Role::Remover => Plugin::Remover(Arc::new(self.remover(definition)?)),
            Role::Publisher => Plugin::Publisher(Arc::new(self.publisher(definition)?)),
        };

        debug!(plugin = %definition.name, %role, "Loaded Rhai plugin");
        Ok(plugin)
    }
}
