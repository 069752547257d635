//! Error types and classification for scriptlet.
//!
//! This crate provides:
//! - [`ScriptError`] - Top-level error enum for every plugin failure
//! - [`ShapeError`] - A script value that does not match the expected host shape
//! - [`Cancelled`] - An in-flight subscription poll was cancelled by the host
//! - [`ErrorCategory`] for host-side retry/alert decisions

use std::fmt;
use thiserror::Error;

/// Identifies which plugin and role produced an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Plugin name from the definition.
    pub plugin: String,

    /// Canonical role name (`applicative`, `fork`, ...).
    pub role: &'static str,
}

impl Origin {
    /// Creates a new origin.
    pub fn new(plugin: impl Into<String>, role: &'static str) -> Self {
        Self {
            plugin: plugin.into(),
            role,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plugin `{}` ({})", self.plugin, self.role)
    }
}

/// Top-level error type for scriptlet.
#[derive(Error, Debug, Clone)]
pub enum ScriptError {
    /// Script source is malformed or references undeclared variables.
    #[error("{origin}: script compilation failed: {message}")]
    Compile { origin: Origin, message: String },

    /// A declared input variable could not be set.
    #[error("{origin}: cannot bind `{variable}`: {message}")]
    Bind {
        origin: Origin,
        variable: String,
        message: String,
    },

    /// A value returned by the script has the wrong shape.
    #[error("{origin}: {source}")]
    Shape {
        origin: Origin,
        #[source]
        source: ShapeError,
    },

    /// The script raised an error or failed during execution.
    #[error("{origin}: script execution failed: {message}")]
    Runtime { origin: Origin, message: String },

    /// The script ran to completion but reported a failure value.
    #[error("{origin}: script reported failure: {message}")]
    Rejected { origin: Origin, message: String },

    /// The host cancelled the call while it was in flight.
    #[error("{origin}: cancelled")]
    Cancelled { origin: Origin },

    /// No role with this name exists.
    #[error("Unknown plugin role: {0}")]
    UnknownRole(String),

    /// No provider is registered under this name.
    #[error("Unknown plugin provider: {0}")]
    UnknownProvider(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScriptError {
    /// Returns the plugin/role this error came from, if any.
    pub fn origin(&self) -> Option<&Origin> {
        match self {
            ScriptError::Compile { origin, .. }
            | ScriptError::Bind { origin, .. }
            | ScriptError::Shape { origin, .. }
            | ScriptError::Runtime { origin, .. }
            | ScriptError::Rejected { origin, .. }
            | ScriptError::Cancelled { origin } => Some(origin),
            ScriptError::UnknownRole(_)
            | ScriptError::UnknownProvider(_)
            | ScriptError::Config(_) => None,
        }
    }

    /// Returns true if this error is a host-initiated cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScriptError::Cancelled { .. })
    }
}

/// A script value that does not match the shape the host expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("variable `{variable}`: expected {expected}, found {found}")]
pub struct ShapeError {
    /// Variable path, e.g. `a[2].name`.
    pub variable: String,

    /// Expected host shape.
    pub expected: &'static str,

    /// Script type actually found.
    pub found: String,
}

impl ShapeError {
    /// Creates a new shape error.
    pub fn new(
        variable: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            expected,
            found: found.into(),
        }
    }
}

/// A subscription poll was cancelled before it produced output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{origin}: poll cancelled")]
pub struct Cancelled {
    pub origin: Origin,
}

impl From<Cancelled> for ScriptError {
    fn from(c: Cancelled) -> Self {
        ScriptError::Cancelled { origin: c.origin }
    }
}

/// Error classification for host-side decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad plugin definition - fix the configuration, never retry
    ///
    /// Examples: syntax error, unknown role, unknown provider
    Configuration,

    /// Host/script contract violation - indicates a defect
    ///
    /// Examples: bind type mismatch, script returned a non-packet in `a`
    Defect,

    /// The script itself failed or reported failure
    ///
    /// Examples: `throw`, operation limit exceeded, publisher `result = error(..)`
    Script,

    /// Host-initiated cancellation - not a script defect
    Cancelled,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "Configuration"),
            ErrorCategory::Defect => write!(f, "Defect"),
            ErrorCategory::Script => write!(f, "Script"),
            ErrorCategory::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Classifies an error.
pub fn classify_error(error: &ScriptError) -> ErrorCategory {
    match error {
        ScriptError::Compile { .. } => ErrorCategory::Configuration,
        ScriptError::UnknownRole(_) => ErrorCategory::Configuration,
        ScriptError::UnknownProvider(_) => ErrorCategory::Configuration,
        ScriptError::Config(_) => ErrorCategory::Configuration,
        ScriptError::Bind { .. } => ErrorCategory::Defect,
        ScriptError::Shape { .. } => ErrorCategory::Defect,
        ScriptError::Runtime { .. } => ErrorCategory::Script,
        ScriptError::Rejected { .. } => ErrorCategory::Script,
        ScriptError::Cancelled { .. } => ErrorCategory::Cancelled,
    }
}

/// Result type alias using ScriptError.
pub type Result<T> = std::result::Result<T, ScriptError>;
