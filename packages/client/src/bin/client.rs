//! WebSocket chat client for the hearth relay.
//!
//! Connects to the relay, announces the chosen display name, and sends each
//! line typed at the prompt as a chat message. Automatically reconnects 3
//! seconds after the connection drops.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-client -- --name Ana
//! cargo run --bin hearth-client -- -n Ana -u ws://chat.example.org:3000/ws
//! ```

use clap::Parser;

use hearth_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hearth-client")]
#[command(about = "Chat client for the hearth broadcast relay", long_about = None)]
struct Args {
    /// Display name attached to join notices and messages
    #[arg(short = 'n', long, default_value = "Guest")]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hearth_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
