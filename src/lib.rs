//! parley - A real-time group chat relay
//!
//! This crate provides the core functionality for parley, including:
//! - The relay core (presence registry, session lifecycle, fan-out routing)
//! - Client-server protocol
//! - The relay server and its HTTP status surface
//! - A line-oriented client
//! - Configuration management
//!
//! # Architecture
//!
//! Clients hold a TCP connection carrying length-prefixed MessagePack frames.
//! Each connection gets a reader task and a writer task; all inbound events are
//! funneled into one dispatcher task that owns the relay core, so presence
//! changes and the broadcasts announcing them are applied one at a time.

pub mod client;
pub mod config;
pub mod protocol;
pub mod relay;
pub mod server;
