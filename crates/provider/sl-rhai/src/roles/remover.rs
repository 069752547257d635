//! Remover role: deletion predicate over an indexed record.

use super::compile_role;
use crate::bridge;
use crate::fault::escalate;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::{Dynamic, Map};
use sl_error::{Result, ScriptError};
use sl_traits::Remover;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;

/// Rhai-backed [`Remover`]: reads `index` and `data`, assigns a bool to `result`.
#[derive(Debug, Clone)]
pub struct RhaiRemover {
    program: CompiledProgram,
}

impl RhaiRemover {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("index", 0_i64)
            .input("data", Map::new())
            .output("result", false);
        let program = compile_role(definition, Role::Remover, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_remove(&self, index: usize, record: &Record) -> Result<bool> {
        let index = i64::try_from(index).map_err(|_| ScriptError::Bind {
            origin: self.program.origin().clone(),
            variable: "index".to_string(),
            message: format!("{index} does not fit in a script integer"),
        })?;

        let mut instance = self.program.instantiate();
        instance.bind("index", Dynamic::from(index))?;
        instance.bind_record("data", record)?;
        let mut finished = instance.run(None)?;

        bridge::to_bool(finished.take("result"), "result")
            .map_err(|e| self.program.shape_error(e))
    }
}

impl Remover for RhaiRemover {
    fn remove(&self, index: usize, record: &Record) -> bool {
        self.try_remove(index, record).unwrap_or_else(|e| escalate(e))
    }
}
