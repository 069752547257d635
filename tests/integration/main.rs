//! Integration tests for scriptlet plugins.
//!
//! These tests load plugins through a [`sl_traits::ProviderRegistry`] exactly
//! as a host would and drive them through the role traits only.
//!
//! Set `RUST_LOG=debug` to see compile, load and cancellation events.

mod common;
mod cancellation_test;
mod concurrency_test;
mod fault_test;
mod roles_test;
