//! Typing indicator relay

use super::{BroadcastRouter, ConnectionId};
use crate::protocol::ServerEvent;

/// One typing indicator, alive only for the duration of a relay call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSignal {
    pub sender_name: String,
    pub is_typing: bool,
}

impl From<TypingSignal> for ServerEvent {
    fn from(signal: TypingSignal) -> Self {
        ServerEvent::UserTyping {
            username: signal.sender_name,
            is_typing: signal.is_typing,
        }
    }
}

/// Forwards typing indicators to everyone but their originator.
///
/// Debouncing is the client's job; every signal is relayed as received.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypingCoordinator;

impl TypingCoordinator {
    pub fn relay(
        &self,
        router: &BroadcastRouter,
        sender: ConnectionId,
        sender_name: &str,
        is_typing: bool,
    ) -> usize {
        let signal = TypingSignal {
            sender_name: sender_name.to_string(),
            is_typing,
        };
        router.send_except_sender(sender, signal.into())
    }
}
