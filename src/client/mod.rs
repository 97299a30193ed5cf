//! The `client` module is a small terminal chat client.
//!
//! It connects to a running server, sends every non-empty stdin line as a
//! message and prints everything the hub broadcasts. Mostly useful for
//! smoke-testing a deployment by hand.

pub mod chat;

pub use chat::run_chat;
