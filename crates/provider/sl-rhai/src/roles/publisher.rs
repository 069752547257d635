//! Publisher role: sink for batches of records.

use super::compile_role;
use crate::bridge;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::{Array, Dynamic};
use sl_error::{Result, ScriptError};
use sl_traits::Publisher;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;
use tracing::{debug, trace};

/// Rhai-backed [`Publisher`].
///
/// The script reads the batch as `data`. Assigning `error("...")` to `result`
/// reports failure; leaving it `()` or assigning anything else is success.
#[derive(Debug, Clone)]
pub struct RhaiPublisher {
    program: CompiledProgram,
}

impl RhaiPublisher {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("data", Array::new())
            .output("result", Dynamic::UNIT);
        let program = compile_role(definition, Role::Publisher, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_send(&self, records: &[Record]) -> Result<()> {
        trace!(records = records.len(), "Publishing batch");

        let mut instance = self.program.instantiate();
        instance.bind_records("data", records)?;
        let mut finished = instance.run(None)?;

        match bridge::to_failure(finished.take("result")) {
            None => Ok(()),
            Some(message) => Err(ScriptError::Rejected {
                origin: self.program.origin().clone(),
                message,
            }),
        }
    }
}

impl Publisher for RhaiPublisher {
    fn send(&self, records: &[Record]) -> Result<()> {
        self.try_send(records).inspect_err(|e| {
            debug!(plugin = %self.program.origin().plugin, error = %e, "Publish failed");
        })
    }
}
