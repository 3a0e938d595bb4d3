//! Protocol definitions for client-server communication
//!
//! Events are MessagePack-encoded with named fields and carried in
//! length-prefixed frames.

mod message;

pub use message::{ClientEvent, OutgoingMessage, ServerEvent};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol-specific errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: u32, max: u32 },
}

/// Default upper bound for a single frame payload (64 KiB)
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 64 * 1024;

/// Default bound for frames a client accepts from the relay (16 MiB)
///
/// Must stay above `DEFAULT_MAX_FRAME_SIZE`: a `newMessage` echo is the body
/// plus sender fields, and `usersList` grows with the roster.
pub const DEFAULT_CLIENT_MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;

/// Serialize an event to MessagePack bytes, keeping field names
pub fn serialize<T: Serialize>(msg: &T) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(msg)?)
}

/// Deserialize an event from MessagePack bytes
pub fn deserialize<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    rmp_serde::from_slice(bytes).map_err(|e| {
        anyhow!(ProtocolError::MalformedMessage(format!(
            "Failed to deserialize: {}",
            e
        )))
    })
}

/// Frame a payload with its length prefix
///
/// Frame format: [4-byte length BE][payload]
pub fn frame_message(payload: &[u8]) -> Vec<u8> {
    let len = payload.len() as u32;
    let mut framed = Vec::with_capacity(4 + payload.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(payload);
    framed
}
