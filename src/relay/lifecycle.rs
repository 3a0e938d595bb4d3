//! Session lifecycle - Pending -> Joined -> Terminated per connection

use super::{
    iso_timestamp, BroadcastRouter, ConnectionId, ConnectionRegistry, ConnectionState, Message,
    MessageFactory, RegistryError, Session, TypingCoordinator,
};
use crate::protocol::{ClientEvent, ServerEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Why an inbound request had no effect.
///
/// Rejections are never reported to the client; the request is dropped and
/// the connection stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("display name is empty")]
    EmptyName,

    #[error("connection has already joined")]
    AlreadyJoined,

    #[error("message body is empty")]
    EmptyMessage,

    #[error("connection has not joined")]
    NotJoined,

    #[error("connection is not open")]
    UnknownConnection,
}

impl From<RegistryError> for Rejection {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::AlreadyJoined(_) => Rejection::AlreadyJoined,
            RegistryError::NotJoined(_) => Rejection::NotJoined,
        }
    }
}

/// Owns the registry and the router and applies every inbound event to both
#[derive(Debug, Default)]
pub struct SessionLifecycleManager {
    registry: ConnectionRegistry,
    router: BroadcastRouter,
    messages: MessageFactory,
    typing: TypingCoordinator,
}

impl SessionLifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport accepted a connection; it starts out `Pending`
    pub fn connect(&mut self, id: ConnectionId, outlet: mpsc::Sender<ServerEvent>) {
        self.router.attach(id, outlet);
        tracing::debug!(connection = %id, "Connection pending");
    }

    /// Apply one decoded client event
    pub fn handle(&mut self, id: ConnectionId, event: ClientEvent) -> Result<(), Rejection> {
        match event {
            ClientEvent::Join(name) => self.join(id, &name).map(|_| ()),
            ClientEvent::SendMessage(payload) => {
                self.send_message(id, &payload.message).map(|_| ())
            }
            ClientEvent::Typing(is_typing) => self.typing(id, is_typing).map(|_| ()),
        }
    }

    /// `Pending --join(name)--> Joined`
    ///
    /// Announces the newcomer to everyone, then hands the joiner a roster that
    /// already lists it.
    pub fn join(&mut self, id: ConnectionId, name: &str) -> Result<Session, Rejection> {
        if !self.router.is_attached(&id) {
            return Err(Rejection::UnknownConnection);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }

        let session = self.registry.register(id, name)?;

        self.router.send_to_all(ServerEvent::UserJoined {
            username: session.display_name.clone(),
            user_id: id.to_string(),
            timestamp: iso_timestamp(session.joined_at),
        });
        self.router
            .send_to_sender(id, ServerEvent::UsersList(self.registry.snapshot()));

        tracing::info!(connection = %id, "{} joined the chat", session.display_name);
        Ok(session)
    }

    /// Relay a chat message to every connection, the sender included
    pub fn send_message(&mut self, id: ConnectionId, body: &str) -> Result<Message, Rejection> {
        let session = self.registry.get(&id).ok_or(Rejection::NotJoined)?;
        let message = self
            .messages
            .create(session, body)
            .ok_or(Rejection::EmptyMessage)?;

        self.router.send_to_all(message.to_event());

        tracing::info!(
            connection = %id,
            id = message.id,
            "Message from {}: {}",
            message.sender_name,
            message.body
        );
        Ok(message)
    }

    /// Relay a typing indicator to everyone but the sender
    pub fn typing(&mut self, id: ConnectionId, is_typing: bool) -> Result<usize, Rejection> {
        let session = self.registry.get(&id).ok_or(Rejection::NotJoined)?;
        Ok(self
            .typing
            .relay(&self.router, id, &session.display_name, is_typing))
    }

    /// Transport closed, gracefully or not
    ///
    /// Returns the ended session when the connection had joined; only then is
    /// `userLeft` broadcast.
    pub fn disconnect(&mut self, id: ConnectionId) -> Option<Session> {
        self.router.detach(&id);

        match self.registry.unregister(&id) {
            Ok(session) => {
                self.router.send_to_all(ServerEvent::UserLeft {
                    username: session.display_name.clone(),
                    user_id: id.to_string(),
                    timestamp: iso_timestamp(chrono::Utc::now()),
                });
                tracing::info!(connection = %id, "{} left the chat", session.display_name);
                Some(session)
            }
            Err(_) => {
                tracing::debug!(connection = %id, "Connection closed before joining");
                None
            }
        }
    }

    pub fn state(&self, id: &ConnectionId) -> ConnectionState {
        if self.registry.contains(id) {
            ConnectionState::Joined
        } else if self.router.is_attached(id) {
            ConnectionState::Pending
        } else {
            ConnectionState::Terminated
        }
    }

    /// Current roster in join order
    pub fn roster(&self) -> Vec<String> {
        self.registry.snapshot()
    }
}
