//! Opaque packet type passed through the fork role.

use crate::Record;
use serde::{Deserialize, Serialize};

/// A host-owned unit of work.
///
/// Providers never interpret a packet's contents; they only route packets
/// and verify that what comes back is still a packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    /// Packet identifier.
    pub id: String,

    /// Packet payload.
    #[serde(default)]
    pub data: Record,
}

impl Packet {
    /// Creates a new packet.
    pub fn new(id: impl Into<String>, data: Record) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}
