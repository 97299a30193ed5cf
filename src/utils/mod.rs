//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `chatroom` application.
//!
//! - `error`: the crate-wide error type.
//! - `logging`: tracing subscriber setup.

pub mod error;
pub mod logging;

pub use error::HubError;
