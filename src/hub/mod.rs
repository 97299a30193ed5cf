//! The broadcast hub.
//!
//! - `message`: the `Message` value every client sends and receives.
//! - `registry`: the lock-guarded set of connections eligible for broadcast.
//! - `engine`: the `Hub` handle used by connection handlers and the
//!   `BroadcastLoop` that serializes delivery.

pub mod engine;
pub mod message;
pub mod registry;

pub use engine::{BroadcastLoop, Hub, Inbound};
pub use message::Message;
pub use registry::Registry;
