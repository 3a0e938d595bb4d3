//! Chat message construction

use super::{iso_timestamp, ConnectionId, Session};
use crate::protocol::ServerEvent;
use chrono::{DateTime, Utc};

/// An accepted chat message. Never stored once broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub sender_name: String,
    pub sender_id: ConnectionId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn to_event(&self) -> ServerEvent {
        ServerEvent::NewMessage {
            id: self.id,
            username: self.sender_name.clone(),
            message: self.body.clone(),
            timestamp: iso_timestamp(self.created_at),
            user_id: self.sender_id.to_string(),
        }
    }
}

/// Stamps messages with process-unique, increasing ids
#[derive(Debug)]
pub struct MessageFactory {
    next_id: u64,
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Build a message, or `None` when the body is blank
    ///
    /// The body is kept exactly as sent; trimming only decides acceptance.
    pub fn create(&mut self, sender: &Session, raw_body: &str) -> Option<Message> {
        if raw_body.trim().is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;

        Some(Message {
            id,
            sender_name: sender.display_name.clone(),
            sender_id: sender.connection_id,
            body: raw_body.to_string(),
            created_at: Utc::now(),
        })
    }
}
