use super::MAX_FRAME_LENGTH;
use crate::{
    Error, Result,
    config::RpcClientConfig,
    schema::{LanguageModelServiceClient, WeatherMonitorServiceClient},
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};
use tarpc::{
    client,
    serde_transport::{Transport, tcp},
    tokio_serde::formats::Bincode,
};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

/// Connection establishment policy. Applies to opening the TCP connection
/// only; RPC calls themselves are never retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub connect_retries: u32,
    pub retry_backoff: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from(&RpcClientConfig::default())
    }
}

impl From<&RpcClientConfig> for ClientSettings {
    fn from(config: &RpcClientConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            connect_retries: config.connect_retries,
            retry_backoff: config.retry_backoff(),
        }
    }
}

pub async fn connect_weather(
    addr: SocketAddr,
    settings: &ClientSettings,
) -> Result<WeatherMonitorServiceClient> {
    let transport = connect_transport(addr, settings).await?;
    Ok(WeatherMonitorServiceClient::new(client::Config::default(), transport).spawn())
}

pub async fn connect_language_model(
    addr: SocketAddr,
    settings: &ClientSettings,
) -> Result<LanguageModelServiceClient> {
    let transport = connect_transport(addr, settings).await?;
    Ok(LanguageModelServiceClient::new(client::Config::default(), transport).spawn())
}

async fn connect_transport<Item, SinkItem>(
    addr: SocketAddr,
    settings: &ClientSettings,
) -> Result<Transport<TcpStream, Item, SinkItem, Bincode<Item, SinkItem>>>
where
    Item: for<'de> Deserialize<'de>,
    SinkItem: Serialize,
{
    let attempts = settings.connect_retries.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        debug!("Connecting to {} (attempt {}/{})", addr, attempt, attempts);

        let mut connect = tcp::connect(addr, Bincode::default);
        connect.config_mut().max_frame_length(MAX_FRAME_LENGTH);

        match tokio::time::timeout(settings.connect_timeout, connect).await {
            Ok(Ok(transport)) => {
                info!("Connected to RPC server at {}", addr);
                return Ok(transport);
            }
            Ok(Err(e)) => {
                warn!("Connection attempt {} to {} failed: {}", attempt, addr, e);
                last_error = e.to_string();
            }
            Err(_) => {
                warn!(
                    "Connection attempt {} to {} timed out after {:?}",
                    attempt, addr, settings.connect_timeout
                );
                last_error = format!("timed out after {:?}", settings.connect_timeout);
            }
        }

        if attempt < attempts {
            tokio::time::sleep(settings.retry_backoff).await;
        }
    }

    Err(Error::connect(addr, attempts, last_error))
}
