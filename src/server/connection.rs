//! Per-connection socket handling

use super::dispatcher::{DispatcherHandle, Inbound};
use crate::protocol::{
    deserialize, frame_message, serialize, ClientEvent, ProtocolError, ServerEvent,
};
use crate::relay::ConnectionId;
use anyhow::Result;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Read a length-prefixed frame from a stream
///
/// Returns `Ok(None)` on a clean end of stream.
pub async fn read_message<R: AsyncRead + Unpin>(
    reader: &mut R,
    max_size: u32,
) -> Result<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 4];

    match reader.read_exact(&mut len_bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(len_bytes);
    if len > max_size {
        return Err(ProtocolError::MessageTooLarge {
            size: len,
            max: max_size,
        }
        .into());
    }

    let mut buffer = vec![0u8; len as usize];
    reader.read_exact(&mut buffer).await?;

    Ok(Some(buffer))
}

/// Write a length-prefixed frame to a stream
pub async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let framed = frame_message(payload);
    writer.write_all(&framed).await?;
    writer.flush().await?;
    Ok(())
}

/// Drains a connection's outbound queue onto its socket
pub async fn client_writer_task<W: AsyncWrite + Unpin>(
    mut writer: W,
    mut receiver: mpsc::Receiver<ServerEvent>,
) {
    while let Some(event) = receiver.recv().await {
        match serialize(&event) {
            Ok(payload) => {
                if let Err(e) = write_message(&mut writer, &payload).await {
                    tracing::debug!("Failed to write event to client: {}", e);
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize {}: {}", event.name(), e);
            }
        }
    }

    tracing::trace!("Client writer task finished");
}

/// Parse a client event from bytes
pub fn parse_client_event(bytes: &[u8]) -> Result<ClientEvent> {
    deserialize(bytes)
}

/// Serve one accepted socket until it closes
///
/// Every decoded event is forwarded to the dispatcher; undecodable frames are
/// dropped and the connection stays open. Any read failure counts as a
/// disconnect.
pub async fn handle_client(
    stream: TcpStream,
    dispatcher: DispatcherHandle,
    max_frame_size: u32,
    outbound_capacity: usize,
) -> Result<()> {
    let peer = stream.peer_addr().ok();
    let (mut reader, writer) = stream.into_split();

    let (tx, rx) = mpsc::channel::<ServerEvent>(outbound_capacity);
    let id = ConnectionId::new();

    tracing::info!(connection = %id, ?peer, "A user connected");

    dispatcher
        .send(Inbound::Connected { id, outlet: tx })
        .await?;

    let writer_handle = tokio::spawn(client_writer_task(writer, rx));

    loop {
        match read_message(&mut reader, max_frame_size).await {
            Ok(Some(bytes)) => match parse_client_event(&bytes) {
                Ok(event) => {
                    if dispatcher.send(Inbound::Event { id, event }).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(connection = %id, "Dropping undecodable frame: {}", e);
                }
            },
            Ok(None) => {
                tracing::info!(connection = %id, "Client disconnected");
                break;
            }
            Err(e) => {
                tracing::warn!(connection = %id, "Error reading from client: {}", e);
                break;
            }
        }
    }

    // Dispatcher may already be gone during shutdown
    let _ = dispatcher.send(Inbound::Disconnected { id }).await;

    writer_handle.abort();

    tracing::debug!(connection = %id, "Client handler finished");

    Ok(())
}
