//! Integration tests for the wire format

use parley::protocol::{deserialize, serialize, ClientEvent, OutgoingMessage, ServerEvent};
use serde_json::{json, Value};

#[test]
fn test_server_events_use_wire_field_names() {
    let joined = ServerEvent::UserJoined {
        username: "Bob".to_string(),
        user_id: "abc".to_string(),
        timestamp: "2024-01-01T12:00:00.000Z".to_string(),
    };
    let value: Value = deserialize(&serialize(&joined).unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "userJoined": {
                "username": "Bob",
                "userId": "abc",
                "timestamp": "2024-01-01T12:00:00.000Z"
            }
        })
    );

    let message = ServerEvent::NewMessage {
        id: 7,
        username: "Alice".to_string(),
        message: "hi".to_string(),
        timestamp: "2024-01-01T12:00:00.000Z".to_string(),
        user_id: "xyz".to_string(),
    };
    let value: Value = deserialize(&serialize(&message).unwrap()).unwrap();
    assert_eq!(value["newMessage"]["id"], 7);
    assert_eq!(value["newMessage"]["userId"], "xyz");
    assert_eq!(value["newMessage"]["message"], "hi");

    let typing = ServerEvent::UserTyping {
        username: "Alice".to_string(),
        is_typing: true,
    };
    let value: Value = deserialize(&serialize(&typing).unwrap()).unwrap();
    assert_eq!(value, json!({"userTyping": {"username": "Alice", "isTyping": true}}));

    let roster = ServerEvent::UsersList(vec!["Alice".to_string(), "Bob".to_string()]);
    let value: Value = deserialize(&serialize(&roster).unwrap()).unwrap();
    assert_eq!(value, json!({"usersList": ["Alice", "Bob"]}));
}

#[test]
fn test_client_events_decode_from_wire_shape() {
    let cases = vec![
        (json!({"join": "Alice"}), ClientEvent::join("Alice")),
        (
            json!({"sendMessage": {"message": "hi"}}),
            ClientEvent::SendMessage(OutgoingMessage {
                message: "hi".to_string(),
            }),
        ),
        (json!({"typing": false}), ClientEvent::Typing(false)),
    ];

    for (wire, expected) in cases {
        let bytes = serialize(&wire).unwrap();
        let decoded: ClientEvent = deserialize(&bytes).unwrap();
        assert_eq!(decoded, expected);
    }
}

#[test]
fn test_unknown_client_event_is_malformed() {
    let bytes = serialize(&json!({"shout": "hi"})).unwrap();
    let err = deserialize::<ClientEvent>(&bytes).unwrap_err();
    assert!(err.to_string().contains("Malformed message"));
}
