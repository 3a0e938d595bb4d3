//! Client module - connects to a relay and drives a line-oriented chat

mod input;
mod renderer;

pub use input::{parse_input, ParsedInput};
pub use renderer::render_event;

use crate::protocol::{serialize, ClientEvent, ServerEvent, DEFAULT_CLIENT_MAX_FRAME_SIZE};
use crate::server::{read_message, write_message};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Receiving half of a relay connection
pub struct EventReader {
    reader: OwnedReadHalf,
    max_frame_size: u32,
}

impl EventReader {
    /// Wait for the next server event; `None` once the server closes the connection
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>> {
        match read_message(&mut self.reader, self.max_frame_size).await? {
            Some(bytes) => Ok(Some(crate::protocol::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }
}

/// Sending half of a relay connection
pub struct EventWriter {
    writer: OwnedWriteHalf,
}

impl EventWriter {
    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let payload = serialize(event)?;
        write_message(&mut self.writer, &payload).await
    }

    pub async fn join(&mut self, name: &str) -> Result<()> {
        self.send(&ClientEvent::join(name)).await
    }

    pub async fn send_message(&mut self, message: &str) -> Result<()> {
        self.send(&ClientEvent::send_message(message)).await
    }

    pub async fn typing(&mut self, is_typing: bool) -> Result<()> {
        self.send(&ClientEvent::Typing(is_typing)).await
    }
}

/// A connection to a relay server
pub struct RelayClient {
    reader: EventReader,
    writer: EventWriter,
}

impl RelayClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        Self::connect_with_limit(addr, DEFAULT_CLIENT_MAX_FRAME_SIZE).await
    }

    /// Connect, accepting server frames up to `max_frame_size` bytes
    pub async fn connect_with_limit(addr: SocketAddr, max_frame_size: u32) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to relay at {}", addr))?;
        stream.set_nodelay(true)?;
        let (reader, writer) = stream.into_split();

        Ok(Self {
            reader: EventReader {
                reader,
                max_frame_size,
            },
            writer: EventWriter { writer },
        })
    }

    pub async fn join(&mut self, name: &str) -> Result<()> {
        self.writer.join(name).await
    }

    pub async fn send_message(&mut self, message: &str) -> Result<()> {
        self.writer.send_message(message).await
    }

    pub async fn typing(&mut self, is_typing: bool) -> Result<()> {
        self.writer.typing(is_typing).await
    }

    /// Send a raw client event
    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        self.writer.send(event).await
    }

    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>> {
        self.reader.next_event().await
    }

    pub fn split(self) -> (EventReader, EventWriter) {
        (self.reader, self.writer)
    }
}

/// Join the relay at `addr` as `name` and chat over stdin/stdout
pub async fn run_chat(addr: SocketAddr, name: &str, max_frame_size: u32) -> Result<()> {
    let mut client = RelayClient::connect_with_limit(addr, max_frame_size).await?;
    client.join(name).await?;

    let (mut events, mut writer) = client.split();

    let printer = tokio::spawn(async move {
        loop {
            match events.next_event().await {
                Ok(Some(event)) => println!("{}", render_event(&event)),
                Ok(None) => {
                    println!("* Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read from server: {}", e);
                    break;
                }
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if printer.is_finished() {
            break;
        }

        match parse_input(&line) {
            Ok(ParsedInput::Text(text)) => writer.send_message(&text).await?,
            Ok(ParsedInput::Typing(is_typing)) => writer.typing(is_typing).await?,
            Ok(ParsedInput::Quit) => break,
            Ok(ParsedInput::Empty) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    printer.abort();
    Ok(())
}
