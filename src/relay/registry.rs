//! Connection registry - the single source of truth for who is online

use super::ConnectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Joined identity bound to one live connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Connection {0} has already joined")]
    AlreadyJoined(ConnectionId),

    #[error("Connection {0} never joined")]
    NotJoined(ConnectionId),
}

/// Map of connection -> session, remembering insertion order for the roster
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    /// Sessions by connection
    sessions: HashMap<ConnectionId, Session>,

    /// Join order
    order: Vec<ConnectionId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a display name to a connection
    pub fn register(
        &mut self,
        connection_id: ConnectionId,
        name: impl Into<String>,
    ) -> Result<Session, RegistryError> {
        if self.sessions.contains_key(&connection_id) {
            return Err(RegistryError::AlreadyJoined(connection_id));
        }

        let session = Session {
            connection_id,
            display_name: name.into(),
            joined_at: Utc::now(),
        };
        self.sessions.insert(connection_id, session.clone());
        self.order.push(connection_id);

        Ok(session)
    }

    /// Remove a connection's session, if it ever joined
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Result<Session, RegistryError> {
        let session = self
            .sessions
            .remove(connection_id)
            .ok_or(RegistryError::NotJoined(*connection_id))?;
        self.order.retain(|id| id != connection_id);
        Ok(session)
    }

    /// Display names of every joined connection, in join order
    pub fn snapshot(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .map(|s| s.display_name.clone())
            .collect()
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.sessions.get(connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.sessions.contains_key(connection_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
