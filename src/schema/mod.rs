//! Service definitions shared by servers, clients and the bridge.
//!
//! These records are what travels over the RPC connection. Field order is
//! part of the binary encoding, so existing fields must never be reordered
//! or removed.

mod llm;
mod weather;

pub use llm::*;
pub use weather::*;

/// `message` of a typed error raised by request validation.
pub const INVALID_REQUEST: &str = "Invalid request";
