//! Comparator role.

use super::compile_role;
use crate::bridge;
use crate::fault::escalate;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::Map;
use sl_error::Result;
use sl_traits::Comparator;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;

/// Rhai-backed [`Comparator`].
///
/// The script reads `a` and `b` and assigns an integer to `compare`, which is
/// returned unmodified.
#[derive(Debug, Clone)]
pub struct RhaiComparator {
    program: CompiledProgram,
}

impl RhaiComparator {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("a", Map::new())
            .input("b", Map::new())
            .output("compare", 0_i64);
        let program = compile_role(definition, Role::Comparator, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_compare(&self, a: &Record, b: &Record) -> Result<i64> {
        let mut instance = self.program.instantiate();
        instance.bind_record("a", a)?;
        instance.bind_record("b", b)?;
        let mut finished = instance.run(None)?;

        bridge::to_int(finished.take("compare"), "compare")
            .map_err(|e| self.program.shape_error(e))
    }
}

impl Comparator for RhaiComparator {
    fn compare(&self, a: &Record, b: &Record) -> i64 {
        self.try_compare(a, b).unwrap_or_else(|e| escalate(e))
    }
}
