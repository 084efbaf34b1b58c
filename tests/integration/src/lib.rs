//! Integration test utilities for the babywatch server
//!
//! Spawns a real server on an ephemeral port with in-memory storage and
//! drives it over HTTP and websocket.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
