//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use hearth_shared::protocol::{ClientEvent, ServerEvent};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one client session over a single connection.
///
/// Returns `Ok(())` when the user ends the session at the prompt (Ctrl+C /
/// Ctrl+D); returns `Err` when the connection is lost, so the caller can
/// decide to reconnect.
pub async fn run_client_session(url: &str, name: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;

    tracing::info!("Connected to chat relay");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        name
    );

    let (mut write, mut read) = ws_stream.split();

    // Announce ourselves; the relay answers with a join notice for everyone.
    let join = serde_json::to_string(&ClientEvent::Join {
        name: Some(name.to_string()),
    })
    .unwrap();
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;

    // Spawn a task to render incoming records
    let prompt_name = name.to_string();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => print!("{}", MessageFormatter::format_event(&event)),
                        // Not a known record; display as raw text
                        Err(_) => print!("{}", MessageFormatter::format_raw(&text)),
                    }
                    redisplay_prompt(&prompt_name);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary(data.len()));
                    redisplay_prompt(&prompt_name);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_owner = name.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_owner);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to wrap typed lines as message records and send them
    let display_name = name.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let record = ClientEvent::Message {
                name: Some(display_name.clone()),
                text: Some(line),
            };

            let json = match serde_json::to_string(&record) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::Connection("connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::Connection("connection lost".to_string()));
            }
        }
    }

    Ok(())
}
