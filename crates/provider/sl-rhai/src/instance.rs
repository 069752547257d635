//! ExecutionInstance - disposable per-call state derived from a CompiledProgram.

use crate::bridge;
use crate::program::CompiledProgram;
use crate::runtime::DataSizes;
use rhai::{Dynamic, Scope};
use sl_error::{Result, ScriptError, ShapeError};
use sl_types::Record;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Fresh variable bindings for exactly one run of a program.
///
/// [`run`](Self::run) consumes the instance, so it can never be executed twice
/// or shared with another call.
pub struct ExecutionInstance<'p> {
    program: &'p CompiledProgram,
    scope: Scope<'static>,
    inputs: DataSizes,
}

impl<'p> ExecutionInstance<'p> {
    pub(crate) fn new(program: &'p CompiledProgram) -> Self {
        Self {
            program,
            scope: program.schema().seed_scope(),
            inputs: DataSizes::default(),
        }
    }

    /// Sets a declared input variable.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Bind`] if `name` is not a declared input or the
    /// value's type differs from the input's placeholder type.
    pub fn bind(&mut self, name: &str, value: Dynamic) -> Result<()> {
        let Some(var) = self.program.schema().find_input(name) else {
            return Err(self.bind_error(name, "not a declared input".to_string()));
        };

        if var.placeholder.type_name() != value.type_name() {
            return Err(self.bind_error(
                name,
                format!(
                    "expected {}, found {}",
                    var.placeholder.type_name(),
                    value.type_name()
                ),
            ));
        }

        self.inputs.add(DataSizes::of(&value));
        self.scope.set_value(name, value);
        Ok(())
    }

    /// Converts a host record and binds it.
    ///
    /// Fails with [`ScriptError::Bind`] naming the offending path when a value
    /// has no exact script representation.
    pub fn bind_record(&mut self, name: &str, record: &Record) -> Result<()> {
        let value =
            bridge::record_to_dynamic(record, name).map_err(|e| self.shape_bind_error(e))?;
        self.bind(name, value)
    }

    /// Converts a batch of host records and binds it as an array of maps.
    pub fn bind_records(&mut self, name: &str, records: &[Record]) -> Result<()> {
        let value =
            bridge::records_to_dynamic(records, name).map_err(|e| self.shape_bind_error(e))?;
        self.bind(name, value)
    }

    /// Runs the script to completion.
    ///
    /// # Errors
    ///
    /// - [`ScriptError::Cancelled`] if `cancel` fires before or during the run;
    ///   no output is surfaced even if the script had already finished
    /// - [`ScriptError::Runtime`] for any other evaluation failure
    pub fn run(mut self, cancel: Option<&CancellationToken>) -> Result<Finished> {
        let program = self.program;
        let origin = program.origin();

        if is_cancelled(cancel) {
            return Err(ScriptError::Cancelled {
                origin: origin.clone(),
            });
        }

        trace!(plugin = %origin.plugin, role = origin.role, "Running plugin script");

        let engine = program
            .runtime()
            .run_engine(&origin.plugin, cancel, self.inputs);
        let outcome = engine.run_ast_with_scope(&mut self.scope, program.ast());

        if is_cancelled(cancel) {
            return Err(ScriptError::Cancelled {
                origin: origin.clone(),
            });
        }

        match outcome {
            Ok(()) => Ok(Finished { scope: self.scope }),
            Err(e) => Err(ScriptError::Runtime {
                origin: origin.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn bind_error(&self, name: &str, message: String) -> ScriptError {
        ScriptError::Bind {
            origin: self.program.origin().clone(),
            variable: name.to_string(),
            message,
        }
    }

    fn shape_bind_error(&self, error: ShapeError) -> ScriptError {
        ScriptError::Bind {
            origin: self.program.origin().clone(),
            message: format!("expected {}, found {}", error.expected, error.found),
            variable: error.variable,
        }
    }
}

/// Variable state left behind by a completed run.
#[derive(Debug)]
pub struct Finished {
    scope: Scope<'static>,
}

impl Finished {
    /// Returns a copy of a variable's value.
    ///
    /// Outputs the script never assigned read as their zero value; names the
    /// script never saw read as `()`.
    pub fn read(&self, name: &str) -> Dynamic {
        self.scope
            .get_value::<Dynamic>(name)
            .unwrap_or(Dynamic::UNIT)
    }

    /// Moves a variable's value out, leaving `()` behind.
    pub fn take(&mut self, name: &str) -> Dynamic {
        self.scope
            .get_mut(name)
            .map(std::mem::take)
            .map(Dynamic::flatten)
            .unwrap_or(Dynamic::UNIT)
    }
}

fn is_cancelled(cancel: Option<&CancellationToken>) -> bool {
    cancel.is_some_and(CancellationToken::is_cancelled)
}
