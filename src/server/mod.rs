//! Server module - TCP listener, connection tasks, dispatcher and HTTP status

mod connection;
mod dispatcher;
mod http;
mod listener;

pub use connection::{parse_client_event, read_message, write_message};
pub use dispatcher::{run_dispatcher, spawn_dispatcher, DispatcherHandle, Inbound, RosterSnapshot};
pub use http::{router as http_router, StatusResponse};
pub use listener::RelayServer;
