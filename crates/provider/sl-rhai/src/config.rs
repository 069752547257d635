//! Configuration types for the Rhai provider.

use serde::{Deserialize, Serialize};
use sl_error::{Result, ScriptError};

/// Configuration for a [`RhaiProvider`](crate::RhaiProvider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Engine resource limits applied to every execution.
    pub limits: EngineLimits,

    /// AST optimization level used at compile time.
    pub optimization: Optimization,

    /// Reject scripts that reference variables the role does not declare.
    pub strict_variables: bool,
}

impl ProviderConfig {
    /// Creates a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ScriptError::Config(format!("Invalid provider config: {e}")))
    }

    /// Sets the engine limits.
    pub fn with_limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the optimization level.
    pub fn with_optimization(mut self, optimization: Optimization) -> Self {
        self.optimization = optimization;
        self
    }

    /// Enables or disables strict variable checking.
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            limits: EngineLimits::default(),
            optimization: Optimization::default(),
            strict_variables: true,
        }
    }
}

/// Engine limits for safety.
///
/// A value of zero means unlimited, as in Rhai itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLimits {
    /// Maximum expression nesting depth at global level.
    pub max_expr_depth: usize,

    /// Maximum expression nesting depth inside functions.
    pub max_function_expr_depth: usize,

    /// Maximum number of operations per execution.
    pub max_operations: u64,

    /// Maximum string length in bytes.
    pub max_string_size: usize,

    /// Maximum array length.
    pub max_array_size: usize,

    /// Maximum number of map properties.
    pub max_map_size: usize,

    /// Maximum function call depth.
    pub max_call_levels: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_expr_depth: 64,
            max_function_expr_depth: 64,
            max_operations: 100_000,
            max_string_size: 1_000_000,
            max_array_size: 10_000,
            max_map_size: 10_000,
            max_call_levels: 16,
        }
    }
}

/// AST optimization levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Optimization {
    /// No optimization.
    None,

    /// Constant folding and dead-code removal.
    #[default]
    Simple,

    /// Also evaluates functions with constant arguments at compile time.
    ///
    /// Unsafe with volatile built-ins such as `uuid()` or `timestamp()`.
    Full,
}

impl From<Optimization> for rhai::OptimizationLevel {
    fn from(level: Optimization) -> Self {
        match level {
            Optimization::None => rhai::OptimizationLevel::None,
            Optimization::Simple => rhai::OptimizationLevel::Simple,
            Optimization::Full => rhai::OptimizationLevel::Full,
        }
    }
}
