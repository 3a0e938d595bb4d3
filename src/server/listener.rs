//! TCP listener and server main loop

use super::connection::handle_client;
use super::dispatcher::{spawn_dispatcher, DispatcherHandle};
use super::http;
use crate::config::{Config, LimitsConfig};
use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

/// Relay server with its sockets already bound
pub struct RelayServer {
    config: Config,
    listener: TcpListener,
    http_listener: Option<TcpListener>,
}

impl RelayServer {
    /// Bind the relay socket and, when enabled, the HTTP status socket
    pub async fn bind(config: Config) -> Result<Self> {
        let listener = TcpListener::bind(config.server.listen).await?;
        let http_listener = if config.server.http_enabled {
            Some(TcpListener::bind(config.server.http_listen).await?)
        } else {
            None
        };

        Ok(Self {
            config,
            listener,
            http_listener,
        })
    }

    /// Address of the relay socket
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Address of the HTTP status socket, if enabled
    pub fn http_addr(&self) -> Result<Option<SocketAddr>> {
        Ok(self
            .http_listener
            .as_ref()
            .map(|l| l.local_addr())
            .transpose()?)
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self, mut shutdown_rx: mpsc::Receiver<()>) -> Result<()> {
        let limits = self.config.limits.clone();
        let (dispatcher, _dispatcher_task) = spawn_dispatcher(limits.inbound_queue_capacity);

        tracing::info!("Server running on {}", self.listener.local_addr()?);

        let (http_stop_tx, http_stop_rx) = oneshot::channel::<()>();
        let http_task = match self.http_listener {
            Some(http_listener) => {
                tracing::info!("Status endpoint on http://{}", http_listener.local_addr()?);
                let app = http::router(dispatcher.clone());
                Some(tokio::spawn(async move {
                    let served = axum::serve(http_listener, app)
                        .with_graceful_shutdown(async move {
                            let _ = http_stop_rx.await;
                        })
                        .await;
                    if let Err(e) = served {
                        tracing::error!("HTTP server error: {}", e);
                    }
                }))
            }
            None => None,
        };

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }

                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, _addr)) => {
                            spawn_client(stream, dispatcher.clone(), &limits);
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {}", e);
                        }
                    }
                }
            }
        }

        let _ = http_stop_tx.send(());
        if let Some(task) = http_task {
            let _ = task.await;
        }

        // Live connections keep their own handles; the dispatcher winds down
        // once the last of them closes.
        Ok(())
    }
}

fn spawn_client(stream: TcpStream, dispatcher: DispatcherHandle, limits: &LimitsConfig) {
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("Failed to set TCP_NODELAY: {}", e);
    }

    let max_frame_size = limits.max_frame_size;
    let outbound_capacity = limits.outbound_queue_capacity;
    tokio::spawn(async move {
        if let Err(e) = handle_client(stream, dispatcher, max_frame_size, outbound_capacity).await
        {
            tracing::error!("Client error: {}", e);
        }
    });
}
