//! # Chatroom
//!
//! `chatroom` is a single-process, in-memory chat broadcast server. Clients
//! connect over WebSockets, send `{"username", "content"}` messages and
//! receive every message sent by anyone, in one global order.
//!
//! ## Core Modules
//!
//! - `hub`: the registry of live connections and the broadcast loop that
//!   serializes delivery.
//! - `connection`: the hub-side handle of one client.
//! - `transport`: the WebSocket server and JSON framing.
//! - `config`: loading and merging server configuration.
//! - `client`: a terminal chat client for manual testing.
//! - `utils`: error type and logging setup.

pub mod client;
pub mod config;
pub mod connection;
pub mod hub;
pub mod transport;
pub mod utils;
