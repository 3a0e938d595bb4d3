//! Event types for the parley protocol

use serde::{Deserialize, Serialize};

/// Payload of a `sendMessage` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub message: String,
}

/// Events sent from client to server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientEvent {
    /// Claim a display name on this connection
    Join(String),

    /// Post a chat message to everyone
    SendMessage(OutgoingMessage),

    /// Typing indicator on/off
    Typing(bool),
}

impl ClientEvent {
    pub fn join(name: impl Into<String>) -> Self {
        ClientEvent::Join(name.into())
    }

    pub fn send_message(message: impl Into<String>) -> Self {
        ClientEvent::SendMessage(OutgoingMessage {
            message: message.into(),
        })
    }

    /// Wire name of the event, used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Join(_) => "join",
            ClientEvent::SendMessage(_) => "sendMessage",
            ClientEvent::Typing(_) => "typing",
        }
    }
}

/// Events sent from server to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerEvent {
    /// Someone joined; delivered to every connection including the joiner
    #[serde(rename_all = "camelCase")]
    UserJoined {
        username: String,
        user_id: String,
        timestamp: String,
    },

    /// A joined connection went away
    #[serde(rename_all = "camelCase")]
    UserLeft {
        username: String,
        user_id: String,
        timestamp: String,
    },

    /// Roster snapshot, sent only to a connection that just joined
    UsersList(Vec<String>),

    /// Chat message, echoed to the sender as well
    #[serde(rename_all = "camelCase")]
    NewMessage {
        id: u64,
        username: String,
        message: String,
        timestamp: String,
        user_id: String,
    },

    /// Typing indicator from another participant
    #[serde(rename_all = "camelCase")]
    UserTyping { username: String, is_typing: bool },
}

impl ServerEvent {
    /// Wire name of the event, used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::UserJoined { .. } => "userJoined",
            ServerEvent::UserLeft { .. } => "userLeft",
            ServerEvent::UsersList(_) => "usersList",
            ServerEvent::NewMessage { .. } => "newMessage",
            ServerEvent::UserTyping { .. } => "userTyping",
        }
    }
}
