pub mod bridge;
pub mod config;
pub mod error;
pub mod llm;
pub mod rpc;
pub mod schema;
pub mod telemetry;
pub mod weather;

pub use error::{Error, Result};
