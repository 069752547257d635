//! CompiledProgram - a script compiled once against a role's variable schema.

use crate::instance::ExecutionInstance;
use crate::runtime::RuntimeFactory;
use rhai::{Dynamic, Scope, AST};
use sl_error::{Origin, Result, ScriptError, ShapeError};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A variable declared by a role, with the placeholder that fixes its type.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: &'static str,
    pub placeholder: Dynamic,
}

/// The variables a role binds before a run and reads after it.
#[derive(Debug, Clone, Default)]
pub struct VariableSchema {
    inputs: Vec<Variable>,
    outputs: Vec<Variable>,
}

impl VariableSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an input bound by the host before each run.
    pub fn input(mut self, name: &'static str, placeholder: impl Into<Dynamic>) -> Self {
        self.inputs.push(Variable {
            name,
            placeholder: placeholder.into(),
        });
        self
    }

    /// Declares an output read after each run; `zero` is what a script that
    /// never assigns it yields.
    pub fn output(mut self, name: &'static str, zero: impl Into<Dynamic>) -> Self {
        self.outputs.push(Variable {
            name,
            placeholder: zero.into(),
        });
        self
    }

    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }

    /// Finds a declared input.
    pub fn find_input(&self, name: &str) -> Option<&Variable> {
        self.inputs.iter().find(|v| v.name == name)
    }

    /// Builds a scope holding every declared variable at its placeholder.
    ///
    /// Variables are pushed as non-constants so the optimizer cannot fold
    /// placeholder values into the AST. A name declared as both input and
    /// output is pushed once.
    pub(crate) fn seed_scope(&self) -> Scope<'static> {
        let mut scope = Scope::new();
        for var in &self.inputs {
            scope.push_dynamic(var.name, var.placeholder.clone());
        }
        for var in &self.outputs {
            if !scope.contains(var.name) {
                scope.push_dynamic(var.name, var.placeholder.clone());
            }
        }
        scope
    }
}

struct ProgramInner {
    origin: Origin,
    ast: AST,
    schema: VariableSchema,
    runtime: Arc<RuntimeFactory>,
}

/// An immutable compiled script.
///
/// Cloning is a cheap handle copy. All per-call state lives in the
/// [`ExecutionInstance`] returned by [`instantiate`](Self::instantiate).
#[derive(Clone)]
pub struct CompiledProgram {
    inner: Arc<ProgramInner>,
}

impl fmt::Debug for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledProgram")
            .field("origin", &self.inner.origin)
            .field("schema", &self.inner.schema)
            .finish_non_exhaustive()
    }
}

impl CompiledProgram {
    /// Compiles `source` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Compile`] on a syntax error or, with strict
    /// variables on, a reference to a variable the schema does not declare.
    pub fn compile(
        origin: Origin,
        source: &str,
        schema: VariableSchema,
        runtime: &Arc<RuntimeFactory>,
    ) -> Result<Self> {
        let engine = runtime.engine(&origin.plugin, None);
        let scope = schema.seed_scope();

        let ast = engine
            .compile_with_scope(&scope, source)
            .map_err(|e| ScriptError::Compile {
                origin: origin.clone(),
                message: e.to_string(),
            })?;

        debug!(
            plugin = %origin.plugin,
            role = origin.role,
            inputs = schema.inputs.len(),
            outputs = schema.outputs.len(),
            "Compiled plugin script"
        );

        Ok(Self {
            inner: Arc::new(ProgramInner {
                origin,
                ast,
                schema,
                runtime: Arc::clone(runtime),
            }),
        })
    }

    /// Creates a fresh, independent execution instance.
    pub fn instantiate(&self) -> ExecutionInstance<'_> {
        ExecutionInstance::new(self)
    }

    pub fn origin(&self) -> &Origin {
        &self.inner.origin
    }

    pub fn schema(&self) -> &VariableSchema {
        &self.inner.schema
    }

    pub(crate) fn ast(&self) -> &AST {
        &self.inner.ast
    }

    pub(crate) fn runtime(&self) -> &RuntimeFactory {
        &self.inner.runtime
    }

    /// Attaches this program's origin to a shape error.
    pub fn shape_error(&self, source: ShapeError) -> ScriptError {
        ScriptError::Shape {
            origin: self.inner.origin.clone(),
            source,
        }
    }
}
