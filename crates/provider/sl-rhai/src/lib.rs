//! Rhai script provider for scriptlet plugins.
//!
//! This crate provides [`RhaiProvider`], which loads plugin definitions whose
//! source is a Rhai script and exposes each one as the host trait its role
//! expects.
//!
//! # Features
//!
//! - **Compile once, run many**: a [`CompiledProgram`] is immutable and shared;
//!   every call gets its own [`ExecutionInstance`]
//! - **Eight roles**: subscription, applicative, comparator, fold, fork,
//!   fork_rule, remover, publisher
//! - **Cancellation**: subscription polls stop when their token fires
//! - **Built-in functions**: UUIDs, timestamps, parsing, `error(...)` values
//! - **Engine limits**: operations, call depth, string/array/map sizes
//!
//! # Example
//!
//! ```rust,ignore
//! use sl_rhai::RhaiProvider;
//! use sl_traits::{Plugin, ProviderRegistry};
//! use sl_types::{PluginDefinition, Record, Role};
//!
//! let registry = ProviderRegistry::new().with_provider(RhaiProvider::NAME, RhaiProvider::default());
//!
//! let definition = PluginDefinition::new(
//!     "tag-errors",
//!     Role::Applicative,
//!     r#"
//!         a = data;
//!         a.tagged = data.level == "ERROR";
//!     "#,
//! );
//!
//! if let Plugin::Applicative(tagger) = registry.load(&definition)? {
//!     let mut record = Record::new();
//!     tagger.apply(&mut record)?;
//! }
//! ```

pub mod bridge;
mod builtin;
mod config;
mod fault;
mod instance;
mod program;
mod provider;
mod roles;
mod runtime;

pub use builtin::ScriptFailure;
pub use config::{EngineLimits, Optimization, ProviderConfig};
pub use fault::{escalate, Fault};
pub use instance::{ExecutionInstance, Finished};
pub use program::{CompiledProgram, Variable, VariableSchema};
pub use provider::RhaiProvider;
pub use roles::{
    Polls, RhaiApplicative, RhaiComparator, RhaiFold, RhaiFork, RhaiForkRule, RhaiPublisher,
    RhaiRemover, RhaiSubscription,
};
pub use runtime::RuntimeFactory;
