//! Applicative role: per-record transform that rewrites the record in place.

use super::compile_role;
use crate::bridge;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::Map;
use sl_error::Result;
use sl_traits::Applicative;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;
use tracing::debug;

/// Rhai-backed [`Applicative`].
///
/// The script reads the record as `data` and assigns the replacement map to
/// `a`. On success the caller's record holds exactly the keys of `a`; on any
/// failure it is left untouched.
#[derive(Debug, Clone)]
pub struct RhaiApplicative {
    program: CompiledProgram,
}

impl RhaiApplicative {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("data", Map::new())
            .output("a", Map::new());
        let program = compile_role(definition, Role::Applicative, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_apply(&self, record: &mut Record) -> Result<()> {
        let mut instance = self.program.instantiate();
        instance.bind_record("data", record)?;
        let mut finished = instance.run(None)?;

        let output = bridge::to_record(finished.take("a"), "a")
            .map_err(|e| self.program.shape_error(e))?;
        bridge::replace_record(record, output);

        Ok(())
    }
}

impl Applicative for RhaiApplicative {
    fn apply(&self, record: &mut Record) -> Result<()> {
        self.try_apply(record).inspect_err(|e| {
            debug!(plugin = %self.program.origin().plugin, error = %e, "Transform failed");
        })
    }
}
