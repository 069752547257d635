//! Role traits for scriptlet plugins.
//!
//! This crate defines the contracts the host framework calls into:
//! - One trait per role ([`Subscription`], [`Applicative`], [`Comparator`], ...)
//! - [`Plugin`] - a loaded plugin, shaped as the trait its role expects
//! - [`PluginProvider`] - turns a [`PluginDefinition`](sl_types::PluginDefinition) into a [`Plugin`]
//! - [`ProviderRegistry`] - looks up the provider named by a definition

mod plugin;
mod registry;
mod roles;

pub use plugin::{Plugin, PluginProvider};
pub use registry::ProviderRegistry;
pub use roles::{
    Applicative, Comparator, Fold, Fork, ForkRule, Publisher, Remover, Subscription,
};

/// Cancellation context accepted by [`Subscription::read`].
pub use tokio_util::sync::CancellationToken;
