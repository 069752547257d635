//! Role contracts: one Rhai-backed implementation per host role trait.
//!
//! | Role | Binds | Reads | On failure |
//! |---|---|---|---|
//! | subscription | - | `a`: array of maps | escalate (cancel returns `Cancelled`) |
//! | applicative | `data`: map | `a`: map | return error |
//! | comparator | `a`, `b`: maps | `compare`: int | escalate |
//! | fold | `aggregate`, `next`: maps | `aggregate`: map | escalate |
//! | fork | `payload`: packets | `a`, `b`: packets | escalate |
//! | fork_rule | `data`: map | `compare`: bool | escalate |
//! | remover | `index`: int, `data`: map | `result`: bool | escalate |
//! | publisher | `data`: array of maps | `result`: `()` or error | return error |
//!
//! Each role exposes a `try_*` method that keeps every failure as a value;
//! the host trait impl decides whether to return or escalate it.

mod applicative;
mod comparator;
mod fold;
mod fork;
mod fork_rule;
mod publisher;
mod remover;
mod subscription;

pub use applicative::RhaiApplicative;
pub use comparator::RhaiComparator;
pub use fold::RhaiFold;
pub use fork::RhaiFork;
pub use fork_rule::RhaiForkRule;
pub use publisher::RhaiPublisher;
pub use remover::RhaiRemover;
pub use subscription::{Polls, RhaiSubscription};

use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use sl_error::{Origin, Result};
use sl_types::{PluginDefinition, Role};
use std::sync::Arc;

/// Compiles a definition's source against a role's schema.
fn compile_role(
    definition: &PluginDefinition,
    role: Role,
    schema: VariableSchema,
    runtime: &Arc<RuntimeFactory>,
) -> Result<CompiledProgram> {
    let origin = Origin::new(definition.name.clone(), role.as_str());
    CompiledProgram::compile(origin, &definition.source, schema, runtime)
}
