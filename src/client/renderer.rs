//! Plain-text rendering of server events

use crate::protocol::ServerEvent;
use chrono::{DateTime, Local};

/// Render an event as one line of terminal output
pub fn render_event(event: &ServerEvent) -> String {
    match event {
        ServerEvent::UserJoined {
            username,
            timestamp,
            ..
        } => format!("[{}] * {} joined the chat", clock(timestamp), username),
        ServerEvent::UserLeft {
            username,
            timestamp,
            ..
        } => format!("[{}] * {} left the chat", clock(timestamp), username),
        ServerEvent::UsersList(users) if users.is_empty() => "* Nobody is online".to_string(),
        ServerEvent::UsersList(users) => format!("* Online: {}", users.join(", ")),
        ServerEvent::NewMessage {
            username,
            message,
            timestamp,
            ..
        } => format!("[{}] {}: {}", clock(timestamp), username, message),
        ServerEvent::UserTyping {
            username,
            is_typing: true,
        } => format!("* {} is typing...", username),
        ServerEvent::UserTyping {
            username,
            is_typing: false,
        } => format!("* {} stopped typing", username),
    }
}

/// Local wall-clock time of an ISO-8601 timestamp; falls back to the raw text
fn clock(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        let line = render_event(&ServerEvent::NewMessage {
            id: 1,
            username: "Alice".to_string(),
            message: "hi".to_string(),
            timestamp: "not a time".to_string(),
            user_id: "a".to_string(),
        });
        assert_eq!(line, "[not a time] Alice: hi");
    }

    #[test]
    fn test_render_roster() {
        let line = render_event(&ServerEvent::UsersList(vec![
            "Alice".to_string(),
            "Bob".to_string(),
        ]));
        assert_eq!(line, "* Online: Alice, Bob");
    }

    #[test]
    fn test_render_typing() {
        let line = render_event(&ServerEvent::UserTyping {
            username: "Bob".to_string(),
            is_typing: true,
        });
        assert!(line.contains("Bob is typing"));
    }
}
