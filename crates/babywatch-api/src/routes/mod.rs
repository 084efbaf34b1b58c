//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, names, predictions};
use crate::live;
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(name_routes())
        .merge(prediction_routes())
        .merge(live_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/me", get(auth::me))
}

/// Name suggestion and vote routes
fn name_routes() -> Router<AppState> {
    Router::new()
        .route("/names", get(names::get_board).post(names::suggest_name))
        .route("/names/likes", post(names::like_name))
}

/// Prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/predictions", get(predictions::get_board))
        .route(
            "/predictions/@me",
            get(predictions::get_my_prediction)
                .put(predictions::update_my_prediction)
                .patch(predictions::edit_my_prediction),
        )
}

/// Websocket routes
fn live_routes() -> Router<AppState> {
    Router::new()
        .route("/live/names", get(live::names_socket))
        .route("/live/predictions", get(live::predictions_socket))
}
