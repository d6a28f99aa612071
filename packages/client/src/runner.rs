//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{error::ClientError, session::run_client_session};

const RECONNECT_DELAY_SECS: u64 = 3;

/// Run the chat client, reconnecting after a fixed delay whenever the
/// connection is lost. A clean exit at the prompt ends the loop; there is
/// no upper retry limit otherwise.
pub async fn run_client(url: String, name: String) -> Result<(), ClientError> {
    loop {
        tracing::info!("Connecting to {} as '{}'", url, name);

        match run_client_session(&url, &name).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                tracing::info!("Reconnecting in {} seconds...", RECONNECT_DELAY_SECS);
                tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
            }
        }
    }

    Ok(())
}
