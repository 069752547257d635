//! Fold role: two-record reducer.

use super::compile_role;
use crate::bridge;
use crate::fault::escalate;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::Map;
use sl_error::Result;
use sl_traits::Fold;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;

/// Rhai-backed [`Fold`].
///
/// The script reads `aggregate` and `next` and leaves the new aggregate in
/// `aggregate`.
#[derive(Debug, Clone)]
pub struct RhaiFold {
    program: CompiledProgram,
}

impl RhaiFold {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("aggregate", Map::new())
            .input("next", Map::new())
            .output("aggregate", Map::new());
        let program = compile_role(definition, Role::Fold, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_fold(&self, aggregate: &Record, next: &Record) -> Result<Record> {
        let mut instance = self.program.instantiate();
        instance.bind_record("aggregate", aggregate)?;
        instance.bind_record("next", next)?;
        let mut finished = instance.run(None)?;

        bridge::to_record(finished.take("aggregate"), "aggregate")
            .map_err(|e| self.program.shape_error(e))
    }
}

impl Fold for RhaiFold {
    fn fold(&self, aggregate: &Record, next: &Record) -> Record {
        self.try_fold(aggregate, next).unwrap_or_else(|e| escalate(e))
    }
}
