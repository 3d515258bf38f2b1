use crate::schema::{ModelError, WeatherServiceError};
use std::net::SocketAddr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("RPC error: {0}")]
    Rpc(#[from] tarpc::client::RpcError),

    #[error("Failed to connect to {addr} after {attempts} attempt(s): {reason}")]
    Connect {
        addr: SocketAddr,
        attempts: u32,
        reason: String,
    },

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherServiceError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn connect(addr: SocketAddr, attempts: u32, reason: impl Into<String>) -> Self {
        Self::Connect {
            addr,
            attempts,
            reason: reason.into(),
        }
    }

    /// Failed below the service layer; the connection is suspect.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::Connect { .. } | Self::Io(_))
    }

    /// A service rejected the request itself. The connection is fine.
    pub fn is_invalid_request(&self) -> bool {
        match self {
            Self::Weather(e) => e.is_invalid_request(),
            Self::Model(e) => e.is_invalid_request(),
            _ => false,
        }
    }

    /// Flattens the two layers of a tarpc call result.
    pub fn from_call<T, E>(
        result: std::result::Result<std::result::Result<T, E>, tarpc::client::RpcError>,
    ) -> Result<T>
    where
        E: Into<Error>,
    {
        result?.map_err(Into::into)
    }
}
