//! Authentication handlers
//!
//! Endpoints for sign-in, token refresh, sign-out, and the current session.

use axum::{extract::State, Json};
use babywatch_service::dto::{
    AuthResponse, CurrentUserResponse, RefreshTokenRequest, SignInRequest,
};
use babywatch_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Sign in with an email and, when the event is locked, the group passcode
///
/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.sign_in(request).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// End the current session
///
/// POST /auth/sign-out
pub async fn sign_out(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.sign_out(&auth.claims).await?;
    Ok(NoContent)
}

/// GET /auth/me
pub async fn me(auth: AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(&auth.claims))
}
