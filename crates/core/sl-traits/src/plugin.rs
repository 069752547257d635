//! Loaded plugins and the provider seam.

use crate::roles::{
    Applicative, Comparator, Fold, Fork, ForkRule, Publisher, Remover, Subscription,
};
use sl_error::Result;
use sl_types::{PluginDefinition, Role};
use std::fmt;
use std::sync::Arc;

/// A loaded plugin, shaped as the trait its role expects.
#[derive(Clone)]
pub enum Plugin {
    Subscription(Arc<dyn Subscription>),
    Applicative(Arc<dyn Applicative>),
    Comparator(Arc<dyn Comparator>),
    Fold(Arc<dyn Fold>),
    Fork(Arc<dyn Fork>),
    ForkRule(Arc<dyn ForkRule>),
    Remover(Arc<dyn Remover>),
    Publisher(Arc<dyn Publisher>),
}

impl Plugin {
    /// Returns the role this plugin implements.
    pub fn role(&self) -> Role {
        match self {
            Plugin::Subscription(_) => Role::Subscription,
            Plugin::Applicative(_) => Role::Applicative,
            Plugin::Comparator(_) => Role::Comparator,
            Plugin::Fold(_) => Role::Fold,
            Plugin::Fork(_) => Role::Fork,
            Plugin::ForkRule(_) => Role::ForkRule,
            Plugin::Remover(_) => Role::Remover,
            Plugin::Publisher(_) => Role::Publisher,
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Plugin").field(&self.role()).finish()
    }
}

/// Turns plugin definitions into loaded plugins.
pub trait PluginProvider: Send + Sync {
    /// Loads a definition.
    ///
    /// Fails with [`UnknownRole`](sl_error::ScriptError::UnknownRole) for an
    /// unrecognized role and with a compile error for bad source. A failed load
    /// must never yield a partially usable plugin.
    fn load(&self, definition: &PluginDefinition) -> Result<Plugin>;
}
