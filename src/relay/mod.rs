//! Relay core - presence registry, lifecycle state machine and fan-out
//!
//! Everything in here is synchronous and owned by a single dispatcher. The
//! server module feeds it inbound events one at a time, so a registry change
//! and the broadcast that announces it can never be observed apart.

mod lifecycle;
mod message;
mod registry;
mod router;
mod typing;

pub use lifecycle::{Rejection, SessionLifecycleManager};
pub use message::{Message, MessageFactory};
pub use registry::{ConnectionRegistry, RegistryError, Session};
pub use router::{Audience, BroadcastRouter};
pub use typing::{TypingCoordinator, TypingSignal};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Server-assigned identifier for one live transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Transport open, no session yet
    Pending,
    /// Session registered
    Joined,
    /// Transport closed (or never known)
    Terminated,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T12:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_timestamp_uses_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-01-01T12:00:00.000Z");
    }

    #[test]
    fn test_connection_ids_are_unique() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }
}
