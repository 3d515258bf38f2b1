//! Owned replacement for a process-wide cached RPC client.
//!
//! A [`ConnectionPool`] keeps at most one client. `acquire` hands out a clone
//! of it, connecting first if nothing is cached; `invalidate` drops it so the
//! next `acquire` reconnects. Each connection gets a generation number, and
//! `invalidate` only acts on the generation it is given. tarpc clients multiplex calls over a single
//! connection, so a cached clone can be used by overlapping requests.

use crate::{
    Result,
    rpc::{self, ClientSettings},
    schema::{LanguageModelServiceClient, WeatherMonitorServiceClient},
};
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Opens a fresh RPC client.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Client: Clone + Send + Sync + 'static;

    fn endpoint(&self) -> SocketAddr;

    async fn connect(&self) -> Result<Self::Client>;
}

#[derive(Debug, Clone)]
pub struct WeatherConnector {
    addr: SocketAddr,
    settings: ClientSettings,
}

impl WeatherConnector {
    pub fn new(addr: SocketAddr, settings: ClientSettings) -> Self {
        Self { addr, settings }
    }
}

#[async_trait]
impl Connector for WeatherConnector {
    type Client = WeatherMonitorServiceClient;

    fn endpoint(&self) -> SocketAddr {
        self.addr
    }

    async fn connect(&self) -> Result<Self::Client> {
        rpc::connect_weather(self.addr, &self.settings).await
    }
}

#[derive(Debug, Clone)]
pub struct LanguageModelConnector {
    addr: SocketAddr,
    settings: ClientSettings,
}

impl LanguageModelConnector {
    pub fn new(addr: SocketAddr, settings: ClientSettings) -> Self {
        Self { addr, settings }
    }
}

#[async_trait]
impl Connector for LanguageModelConnector {
    type Client = LanguageModelServiceClient;

    fn endpoint(&self) -> SocketAddr {
        self.addr
    }

    async fn connect(&self) -> Result<Self::Client> {
        rpc::connect_language_model(self.addr, &self.settings).await
    }
}

/// A client handed out by [`ConnectionPool::acquire`], tagged with the
/// connection it came from.
#[derive(Debug, Clone)]
pub struct Pooled<T> {
    pub client: T,
    generation: u64,
}

impl<T> Pooled<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Slot<T> {
    generation: u64,
    client: Option<T>,
}

pub struct ConnectionPool<C: Connector> {
    connector: C,
    reuse: bool,
    slot: Mutex<Slot<C::Client>>,
}

impl<C: Connector> ConnectionPool<C> {
    /// Pool that caches its client between requests.
    pub fn new(connector: C) -> Self {
        Self::with_reuse(connector, true)
    }

    /// With `reuse` off, every `acquire` opens a new connection.
    pub fn with_reuse(connector: C, reuse: bool) -> Self {
        Self {
            connector,
            reuse,
            slot: Mutex::new(Slot {
                generation: 0,
                client: None,
            }),
        }
    }

    pub fn endpoint(&self) -> SocketAddr {
        self.connector.endpoint()
    }

    pub async fn acquire(&self) -> Result<Pooled<C::Client>> {
        if !self.reuse {
            debug!("Opening dedicated connection to {}", self.endpoint());
            let client = self.connector.connect().await?;
            return Ok(Pooled {
                client,
                generation: 0,
            });
        }

        // Held across the connect so concurrent callers share one connection.
        let mut slot = self.slot.lock().await;
        if let Some(client) = slot.client.as_ref() {
            debug!("Reusing cached connection to {}", self.endpoint());
            return Ok(Pooled {
                client: client.clone(),
                generation: slot.generation,
            });
        }

        let client = self.connector.connect().await?;
        slot.generation += 1;
        slot.client = Some(client.clone());
        Ok(Pooled {
            client,
            generation: slot.generation,
        })
    }

    /// Drops the cached client if it is still the one `pooled` came from.
    /// A failure on an older connection leaves a newer one in place.
    pub async fn invalidate(&self, pooled: &Pooled<C::Client>) -> bool {
        let mut slot = self.slot.lock().await;
        if slot.client.is_none() || slot.generation != pooled.generation {
            debug!(
                "Ignoring stale invalidation of connection {} to {}",
                pooled.generation,
                self.endpoint()
            );
            return false;
        }

        slot.client = None;
        info!("Dropped cached connection to {}", self.endpoint());
        true
    }

    /// Drops whatever client is cached.
    pub async fn clear(&self) {
        if self.slot.lock().await.client.take().is_some() {
            info!("Dropped cached connection to {}", self.endpoint());
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.slot.lock().await.client.is_some()
    }
}
