use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_weather_server")]
    pub weather_server: EndpointConfig,
    #[serde(default = "default_language_server")]
    pub language_server: EndpointConfig,
    #[serde(default)]
    pub weather_api: WeatherApiConfig,
    #[serde(default)]
    pub rpc_client: RpcClientConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Where an RPC server listens, and where clients find it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_rpc_host")]
    pub host: String,
    /// No default: the two servers differ, so a listed section must name it.
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcClientConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_bridge_host")]
    pub host: String,
    #[serde(default = "default_bridge_port")]
    pub port: u16,
    #[serde(default = "default_reuse_connections")]
    pub reuse_connections: bool,
}

impl BridgeConfig {
    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_server: default_weather_server(),
            language_server: default_language_server(),
            weather_api: WeatherApiConfig::default(),
            rpc_client: RpcClientConfig::default(),
            bridge: BridgeConfig::default(),
            logs: LogsConfig::default(),
        }
    }
}

impl EndpointConfig {
    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_connect_timeout(),
            connect_retries: default_connect_retries(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

impl RpcClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_bridge_host(),
            port: default_bridge_port(),
            reuse_connections: default_reuse_connections(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_weather_server() -> EndpointConfig {
    EndpointConfig {
        host: default_rpc_host(),
        port: 9091,
    }
}

fn default_language_server() -> EndpointConfig {
    EndpointConfig {
        host: default_rpc_host(),
        port: 9090,
    }
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_connect_retries() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    500
}

fn default_bridge_host() -> String {
    "0.0.0.0".to_string()
}

fn default_bridge_port() -> u16 {
    8080
}

fn default_reuse_connections() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
