use super::MAX_FRAME_LENGTH;
use crate::{
    Error, Result,
    llm::LanguageModelHandler,
    schema::{LanguageModelService, WeatherMonitorService},
    weather::WeatherMonitorHandler,
};
use futures::{StreamExt, future};
use std::net::SocketAddr;
use tarpc::{
    serde_transport::tcp,
    server::{BaseChannel, Channel},
    tokio_serde::formats::Bincode,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// An accept loop running on its own task.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections. Connections already accepted keep
    /// running until their peer hangs up.
    pub fn shutdown(self) {
        self.handle.abort();
    }

    pub async fn wait(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| Error::internal(format!("RPC server task failed: {e}")))
    }
}

/// Serves [`WeatherMonitorService`] on `addr`. Port 0 picks a free port.
pub async fn spawn_weather_server(
    addr: SocketAddr,
    handler: WeatherMonitorHandler,
) -> Result<RunningServer> {
    let mut listener = tcp::listen(addr, Bincode::default).await?;
    listener.config_mut().max_frame_length(MAX_FRAME_LENGTH);
    let local_addr = listener.local_addr();
    info!("Starting Weather Monitor server on {}", local_addr);

    let handle = tokio::spawn(
        listener
            .filter_map(|conn| {
                future::ready(conn.inspect_err(|e| warn!("Failed to accept connection: {}", e)).ok())
            })
            .map(BaseChannel::with_defaults)
            .for_each(move |channel| {
                debug!("Accepted connection from {:?}", channel.transport().peer_addr());
                // Calls on one connection are answered in order, one at a time.
                tokio::spawn(
                    channel
                        .execute(handler.clone().serve())
                        .for_each(|response| response),
                );
                future::ready(())
            }),
    );

    Ok(RunningServer { local_addr, handle })
}

/// Serves [`LanguageModelService`] on `addr`. Port 0 picks a free port.
pub async fn spawn_language_model_server(
    addr: SocketAddr,
    handler: LanguageModelHandler,
) -> Result<RunningServer> {
    let mut listener = tcp::listen(addr, Bincode::default).await?;
    listener.config_mut().max_frame_length(MAX_FRAME_LENGTH);
    let local_addr = listener.local_addr();
    info!("Starting Language Model server on {}", local_addr);

    let handle = tokio::spawn(
        listener
            .filter_map(|conn| {
                future::ready(conn.inspect_err(|e| warn!("Failed to accept connection: {}", e)).ok())
            })
            .map(BaseChannel::with_defaults)
            .for_each(move |channel| {
                debug!("Accepted connection from {:?}", channel.transport().peer_addr());
                tokio::spawn(
                    channel
                        .execute(handler.clone().serve())
                        .for_each(|response| response),
                );
                future::ready(())
            }),
    );

    Ok(RunningServer { local_addr, handle })
}
