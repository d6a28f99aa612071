//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection could not be established or was lost
    #[error("Connection error: {0}")]
    Connection(String),
}
