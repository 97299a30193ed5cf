//! The `transport` module is responsible for handling network communication
//! with clients via WebSockets.
//!
//! It defines the JSON framing used between clients and the server and
//! implements the WebSocket server itself: accepting connections, registering
//! them with the hub and feeding their messages into the inbound queue.

pub mod codec;
pub mod websocket;

#[cfg(test)]
mod tests;
