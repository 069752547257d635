//! Plugin definition handed to a provider.

use crate::Role;
use serde::{Deserialize, Serialize};
use sl_error::Result;

/// A plugin definition: which role to implement and the script that does it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDefinition {
    /// Plugin name used in logs and error messages.
    #[serde(default = "default_name")]
    pub name: String,

    /// Provider that should load this definition.
    #[serde(default = "default_provider", alias = "type")]
    pub provider: String,

    /// Role name (`applicative`, `fork_rule`, ...).
    #[serde(alias = "symbol")]
    pub role: String,

    /// Script source text.
    #[serde(alias = "payload")]
    pub source: String,
}

impl PluginDefinition {
    /// Creates a definition for the default provider.
    pub fn new(name: impl Into<String>, role: Role, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: default_provider(),
            role: role.as_str().to_string(),
            source: source.into(),
        }
    }

    /// Sets the provider.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Parses the role name.
    pub fn parse_role(&self) -> Result<Role> {
        self.role.parse()
    }
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_provider() -> String {
    "rhai".to_string()
}
