//! The fixed set of computational roles a script can implement.

use serde::{Deserialize, Serialize};
use sl_error::ScriptError;
use std::fmt;
use std::str::FromStr;

/// A computational role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Data source polled for batches of records.
    Subscription,

    /// Per-record transform that rewrites a record in place.
    Applicative,

    /// Two-record comparator returning an integer.
    Comparator,

    /// Two-record reducer.
    Fold,

    /// Binary splitter over packets.
    Fork,

    /// Split predicate over a single record.
    ForkRule,

    /// Deletion predicate over an indexed record.
    Remover,

    /// Sink for batches of records.
    Publisher,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 8] = [
        Role::Subscription,
        Role::Applicative,
        Role::Comparator,
        Role::Fold,
        Role::Fork,
        Role::ForkRule,
        Role::Remover,
        Role::Publisher,
    ];

    /// Returns the canonical role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subscription => "subscription",
            Role::Applicative => "applicative",
            Role::Comparator => "comparator",
            Role::Fold => "fold",
            Role::Fork => "fork",
            Role::ForkRule => "fork_rule",
            Role::Remover => "remover",
            Role::Publisher => "publisher",
        }
    }

    /// Returns true if the role's host contract carries an error channel.
    ///
    /// Script failures in roles without one are escalated instead of returned.
    pub fn has_error_channel(&self) -> bool {
        matches!(self, Role::Applicative | Role::Publisher)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ScriptError::UnknownRole(s.to_string()))
    }
}
