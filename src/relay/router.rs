//! Broadcast router - fans events out to per-connection outbound queues

use super::ConnectionId;
use crate::protocol::ServerEvent;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Who receives an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every live connection
    All,
    /// Every live connection except the originator
    AllExcept(ConnectionId),
    /// Only the originator
    Only(ConnectionId),
}

impl Audience {
    fn includes(&self, id: &ConnectionId) -> bool {
        match self {
            Audience::All => true,
            Audience::AllExcept(sender) => sender != id,
            Audience::Only(sender) => sender == id,
        }
    }
}

/// Outbound queues of every live connection
///
/// Delivery never waits: a queue that is closed or full loses the event.
#[derive(Debug, Default)]
pub struct BroadcastRouter {
    /// Live connections in accept order
    outlets: Vec<(ConnectionId, mpsc::Sender<ServerEvent>)>,
}

impl BroadcastRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the outbound queue of a newly accepted connection
    pub fn attach(&mut self, id: ConnectionId, outlet: mpsc::Sender<ServerEvent>) {
        self.outlets.retain(|(existing, _)| *existing != id);
        self.outlets.push((id, outlet));
    }

    /// Detach a connection; returns false if it was not attached
    pub fn detach(&mut self, id: &ConnectionId) -> bool {
        let before = self.outlets.len();
        self.outlets.retain(|(existing, _)| existing != id);
        self.outlets.len() != before
    }

    pub fn is_attached(&self, id: &ConnectionId) -> bool {
        self.outlets.iter().any(|(existing, _)| existing == id)
    }

    pub fn send_to_all(&self, event: ServerEvent) -> usize {
        self.route(Audience::All, event)
    }

    pub fn send_except_sender(&self, sender: ConnectionId, event: ServerEvent) -> usize {
        self.route(Audience::AllExcept(sender), event)
    }

    pub fn send_to_sender(&self, sender: ConnectionId, event: ServerEvent) -> usize {
        self.route(Audience::Only(sender), event)
    }

    /// Enqueue `event` for every connection in `audience`; returns how many accepted it
    pub fn route(&self, audience: Audience, event: ServerEvent) -> usize {
        let mut delivered = 0;
        for (id, outlet) in self.outlets.iter().filter(|(id, _)| audience.includes(id)) {
            match outlet.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        connection = %id,
                        event = event.name(),
                        "Outbound queue full, dropping event"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(
                        connection = %id,
                        event = event.name(),
                        "Connection closed mid-broadcast, dropping event"
                    );
                }
            }
        }

        tracing::trace!(event = event.name(), ?audience, delivered, "Routed event");
        delivered
    }
}
