//! # babywatch-api
//!
//! HTTP API and live websocket screens built with the Axum framework.

pub mod extractors;
pub mod handlers;
pub mod live;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, serve};
pub use state::AppState;
