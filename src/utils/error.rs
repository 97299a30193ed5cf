//! The `error` module defines the error type shared by every `chatroom` module.
//!
//! Connection-level variants (`Closed`, `ConnectionClosed`, `SendTimeout`,
//! `Decode`) are always handled locally by the connection they belong to;
//! only `Config`, `Io` and `LoopStopped` ever reach the process entry point.

use crate::connection::ConnectionId;

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("peer closed the connection")]
    Closed,

    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),

    #[error("send to connection {0} timed out with a full buffer")]
    SendTimeout(ConnectionId),

    #[error("broadcast loop is no longer running")]
    LoopStopped,
}
