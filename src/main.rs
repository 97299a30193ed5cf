//! CLI for chatroom
//!
//! Subcommands:
//! - `server`: run the WebSocket chat server
//! - `client`: join a running server from the terminal

use chatroom::client::run_chat;
use chatroom::config::{Settings, load_config};
use chatroom::hub::Hub;
use chatroom::transport::websocket::start_websocket_server;
use chatroom::utils::{HubError, logging};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "chatroom", version, about = "In-memory WebSocket chat broadcast server")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Connect to a server and chat from stdin
    Client {
        /// WebSocket URL of the server
        #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
        url: String,
        /// Name attached to every message you send
        #[arg(long, short)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            let config = match load_config() {
                Ok(config) => config,
                Err(e) => {
                    logging::init("info");
                    error!("{e}");
                    std::process::exit(1);
                }
            };
            logging::init(&config.log.level);

            if let Err(e) = run_server(config).await {
                error!("Server failed: {e}");
                std::process::exit(1);
            }
        }
        Command::Client { url, username } => {
            logging::init("warn");
            if let Err(e) = run_chat(&url, &username).await {
                error!("Client failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

async fn run_server(config: Settings) -> Result<(), HubError> {
    let addr = config.bind_addr();
    let (hub, broadcast) = Hub::new(&config.hub);

    tokio::spawn(broadcast.run());

    tokio::select! {
        res = start_websocket_server(&addr, hub, config) => {
            res?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting.");
        }
    }

    Ok(())
}
