//! Fork role: binary splitter over opaque packets.

use super::compile_role;
use crate::bridge;
use crate::fault::escalate;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::Array;
use sl_error::Result;
use sl_traits::Fork;
use sl_types::{Packet, PluginDefinition, Role};
use std::sync::Arc;

/// Rhai-backed [`Fork`].
///
/// The script reads the packets as `payload` and assigns the two branches to
/// `a` and `b`. Every element of both branches must still be a `Packet`.
#[derive(Debug, Clone)]
pub struct RhaiFork {
    program: CompiledProgram,
}

impl RhaiFork {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new()
            .input("payload", Array::new())
            .output("a", Array::new())
            .output("b", Array::new());
        let program = compile_role(definition, Role::Fork, schema, runtime)?;
        Ok(Self { program })
    }

    pub fn try_fork(&self, payload: Vec<Packet>) -> Result<(Vec<Packet>, Vec<Packet>)> {
        let mut instance = self.program.instantiate();
        instance.bind("payload", bridge::packets_to_dynamic(payload))?;
        let mut finished = instance.run(None)?;

        let a = bridge::to_packets(finished.take("a"), "a")
            .map_err(|e| self.program.shape_error(e))?;
        let b = bridge::to_packets(finished.take("b"), "b")
            .map_err(|e| self.program.shape_error(e))?;

        Ok((a, b))
    }
}

impl Fork for RhaiFork {
    fn fork(&self, payload: Vec<Packet>) -> (Vec<Packet>, Vec<Packet>) {
        self.try_fork(payload).unwrap_or_else(|e| escalate(e))
    }
}
