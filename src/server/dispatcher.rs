//! Single dispatcher task that owns the relay core
//!
//! Connection tasks never touch the registry; they post `Inbound` events
//! here and the dispatcher applies them strictly in arrival order.

use crate::protocol::{ClientEvent, ServerEvent};
use crate::relay::{ConnectionId, SessionLifecycleManager};
use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Work item for the dispatcher
#[derive(Debug)]
pub enum Inbound {
    /// Transport accepted a connection
    Connected {
        id: ConnectionId,
        outlet: mpsc::Sender<ServerEvent>,
    },
    /// Decoded client event
    Event { id: ConnectionId, event: ClientEvent },
    /// Transport closed, gracefully or not
    Disconnected { id: ConnectionId },
    /// Read-only roster query
    Roster { reply: oneshot::Sender<RosterSnapshot> },
}

/// Point-in-time view of presence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// Joined display names in join order
    pub users: Vec<String>,
}

/// Cloneable sender side of the dispatcher queue
#[derive(Debug, Clone)]
pub struct DispatcherHandle {
    tx: mpsc::Sender<Inbound>,
}

impl DispatcherHandle {
    pub async fn send(&self, inbound: Inbound) -> Result<()> {
        self.tx
            .send(inbound)
            .await
            .map_err(|_| anyhow!("Dispatcher is not running"))
    }

    /// Ask the dispatcher for the current roster
    pub async fn roster(&self) -> Result<RosterSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Inbound::Roster { reply }).await?;
        rx.await.map_err(|_| anyhow!("Dispatcher dropped roster query"))
    }
}

/// Spawn the dispatcher task around a fresh lifecycle manager
pub fn spawn_dispatcher(
    capacity: usize,
) -> (DispatcherHandle, JoinHandle<SessionLifecycleManager>) {
    let (tx, rx) = mpsc::channel(capacity);
    let task = tokio::spawn(run_dispatcher(rx, SessionLifecycleManager::new()));
    (DispatcherHandle { tx }, task)
}

/// Process inbound events until every handle is dropped
pub async fn run_dispatcher(
    mut rx: mpsc::Receiver<Inbound>,
    mut relay: SessionLifecycleManager,
) -> SessionLifecycleManager {
    while let Some(inbound) = rx.recv().await {
        dispatch(&mut relay, inbound);
    }

    tracing::info!("Dispatcher loop finished");
    relay
}

fn dispatch(relay: &mut SessionLifecycleManager, inbound: Inbound) {
    match inbound {
        Inbound::Connected { id, outlet } => relay.connect(id, outlet),
        Inbound::Event { id, event } => {
            let name = event.name();
            if let Err(rejection) = relay.handle(id, event) {
                tracing::debug!(
                    connection = %id,
                    event = name,
                    "Dropped request: {}",
                    rejection
                );
            }
        }
        Inbound::Disconnected { id } => {
            relay.disconnect(id);
        }
        Inbound::Roster { reply } => {
            let snapshot = RosterSnapshot {
                users: relay.roster(),
            };
            // Caller may have given up waiting
            let _ = reply.send(snapshot);
        }
    }
}
