//! Core types for scriptlet.
//!
//! This crate provides the host-side data model shared by every provider:
//! - [`Record`] / [`Value`] - the host's generic string-keyed record
//! - [`Packet`] - an opaque unit routed by the fork role
//! - [`Role`] - the eight fixed computational roles
//! - [`PluginDefinition`] - role + script source handed to a provider

mod definition;
mod packet;
mod role;

pub use definition::PluginDefinition;
pub use packet::Packet;
pub use role::Role;

/// Dynamically-typed host value.
pub use serde_json::Value;

/// Host record: an order-irrelevant mapping from string keys to values.
pub type Record = serde_json::Map<String, Value>;
