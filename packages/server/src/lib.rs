//! Broadcast relay server: connection registry, bounded history, and the
//! fan-out engine, behind an axum WebSocket transport.

pub mod engine;
pub mod handler;
pub mod history;
pub mod registry;
pub mod runner;
pub mod signal;
pub mod state;

pub use runner::{ServerError, app, run_server};
