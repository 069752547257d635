//! ForkRule role: split predicate.

use super::compile_role;
use crate::bridge;
use crate::fault::escalate;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::Map;
use sl_error::Result;
use sl_traits::ForkRule;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;

/// Rhai-backed [`ForkRule`]: reads `data`, assigns a bool to `compare`.
#[derive(Debug, Clone)]
pub struct RhaiForkRule {
    program: CompiledProgram,
}

impl RhaiForkRule {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("data", Map::new())
            .output("compare", false);
        let program = compile_role(definition, Role::ForkRule, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_evaluate(&self, record: &Record) -> Result<bool> {
        let mut instance = self.program.instantiate();
        instance.bind_record("data", record)?;
        let mut finished = instance.run(None)?;

        bridge::to_bool(finished.take("compare"), "compare")
            .map_err(|e| self.program.shape_error(e))
    }
}

impl ForkRule for RhaiForkRule {
    fn evaluate(&self, record: &Record) -> bool {
        self.try_evaluate(record).unwrap_or_else(|e| escalate(e))
    }
}
