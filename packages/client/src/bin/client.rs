//! Roomcast CLI chat client with reconnection support.
//!
//! Joins a password-protected room through the control API, attaches over
//! WebSocket and sends each line typed at the prompt. Reconnects on
//! connection loss (max 5 attempts with 5 second interval), each time as a
//! new session with a newly generated client id unless `--client-id` is given.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-client -- --room alpha --password secret --create
//! cargo run --bin roomcast-client -- -r alpha -P secret
//! ```

use clap::Parser;

use roomcast_client::{ClientOptions, run_client};
use roomcast_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomcast-client")]
#[command(about = "Chat client for password-protected Roomcast rooms", long_about = None)]
struct Args {
    /// Server origin
    #[arg(short = 's', long, env = "ROOMCAST_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Room password
    #[arg(short = 'P', long, env = "ROOMCAST_PASSWORD", default_value = "")]
    password: String,

    /// Create the room before joining
    #[arg(long)]
    create: bool,

    /// Fixed client id (default: a fresh numeric id per session)
    #[arg(short = 'c', long)]
    client_id: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    let args = Args::parse();
    let options = ClientOptions {
        server: args.server,
        room_name: args.room,
        password: args.password,
        create: args.create,
        client_id: args.client_id,
    };

    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
