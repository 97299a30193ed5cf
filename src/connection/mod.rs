//! The `connection` module defines the hub-side handle of one connected client.
//!
//! A `Connection` pairs a unique `ConnectionId` with the sending half of that
//! client's bounded outbound buffer. The socket writer task owns the receiving
//! half; once every `Connection` clone is dropped the writer sees the buffer
//! close and shuts the socket down. A writer stuck on a peer that stopped
//! reading never gets that far, so `Connection::close` also fires a
//! `CloseSignal` the handler watches.

pub mod handle;

pub use handle::{CloseSignal, Connection, ConnectionId};
