//! TCP plumbing for the two services: length-delimited frames carrying
//! bincode payloads.

mod client;
mod server;

pub use client::{ClientSettings, connect_language_model, connect_weather};
pub use server::{RunningServer, spawn_language_model_server, spawn_weather_server};

/// Upper bound on a single encoded frame.
pub const MAX_FRAME_LENGTH: usize = 16 * 1024 * 1024;
