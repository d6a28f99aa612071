//! WebSocket broadcast chat relay server.
//!
//! Tracks live connections, fans every chat record out to all of them, and
//! replays the last 50 records to each newcomer.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server
//! cargo run --bin hearth-server -- --host 0.0.0.0 --port 3000
//! PORT=8080 cargo run --bin hearth-server
//! ```

use clap::Parser;

use hearth_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hearth-server")]
#[command(about = "Broadcast chat relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    if let Err(e) = hearth_server::run_server(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
