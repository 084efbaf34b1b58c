//! Authentication extractor
//!
//! Extracts the bearer token from the Authorization header and checks it
//! against the session registry.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use babywatch_common::Claims;
use babywatch_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Participant authenticated by an access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn email(&self) -> &str {
        self.claims.email()
    }

    /// Authenticate a raw access token
    pub async fn from_token(state: &AppState, token: &str) -> Result<Self, ApiError> {
        let claims = AuthService::new(state.service_context())
            .authenticate(token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                ApiError::from(e)
            })?;

        Ok(Self { claims })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        Self::from_token(&app_state, bearer.token()).await
    }
}
