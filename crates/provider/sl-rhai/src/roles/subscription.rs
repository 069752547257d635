//! Subscription role: a data source re-run on every poll.

use super::compile_role;
use crate::bridge;
use crate::fault::escalate;
use crate::program::{CompiledProgram, VariableSchema};
use crate::runtime::RuntimeFactory;
use rhai::Array;
use sl_error::{Cancelled, Result, ScriptError};
use sl_traits::Subscription;
use sl_types::{PluginDefinition, Record, Role};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Rhai-backed [`Subscription`].
///
/// The script takes no inputs and assigns an array of maps to `a`.
#[derive(Debug, Clone)]
pub struct RhaiSubscription {
    program: CompiledProgram,
}

impl RhaiSubscription {
    pub fn new(definition: &PluginDefinition, runtime: &Arc<RuntimeFactory>) -> Result<Self> {
        let schema = VariableSchema::new().output("a", Array::new());
        let program = compile_role(definition, Role::Subscription, schema, runtime)?;
        Ok(Self { program })
    }

    /// Runs one poll.
    pub fn try_read(&self, cancel: &CancellationToken) -> Result<Vec<Record>> {
        let mut finished = self.program.instantiate().run(Some(cancel))?;

        bridge::to_records(finished.take("a"), "a").map_err(|e| self.program.shape_error(e))
    }

    /// Returns a lazy sequence of polls that ends once `cancel` fires.
    pub fn polls<'a>(&'a self, cancel: &'a CancellationToken) -> Polls<'a> {
        Polls {
            subscription: self,
            cancel,
        }
    }
}

impl Subscription for RhaiSubscription {
    fn read(&self, cancel: &CancellationToken) -> std::result::Result<Vec<Record>, Cancelled> {
        match self.try_read(cancel) {
            Ok(records) => Ok(records),
            Err(ScriptError::Cancelled { origin }) => {
                debug!(plugin = %origin.plugin, "Subscription poll cancelled");
                Err(Cancelled { origin })
            }
            Err(e) => escalate(e),
        }
    }
}

/// Iterator over successive polls of a [`RhaiSubscription`].
pub struct Polls<'a> {
    subscription: &'a RhaiSubscription,
    cancel: &'a CancellationToken,
}

impl Iterator for Polls<'_> {
    type Item = Vec<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.subscription.read(self.cancel).ok()
    }
}
