//! Authentication service
//!
//! Handles sign-in, token refresh, sign-out, and access token checks.

use babywatch_common::auth::Claims;
use babywatch_common::AppError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, RefreshTokenRequest, SignInRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sign in with an email and, when the event is locked, the passcode
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_in(&self, request: SignInRequest) -> ServiceResult<AuthResponse> {
        if let Err(e) = self.ctx.passcode_gate().check(request.passcode.as_deref()) {
            warn!("Sign-in rejected");
            return Err(e.into());
        }

        let email = request.email.trim();
        let session_id = self.ctx.sessions().open(email).await?;
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(email, &session_id)?;

        info!(session_id = %session_id, "Participant signed in");

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse {
                email: email.to_string(),
                session_id,
            },
        ))
    }

    /// Issue a fresh token pair for a live session
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;

        if !self.ctx.sessions().renew(&claims.sid, claims.email()).await? {
            warn!(session_id = %claims.sid, "Refresh on a closed session");
            return Err(AppError::SessionRevoked.into());
        }

        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(claims.email(), &claims.sid)?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(&claims),
        ))
    }

    /// Close the caller's session; every token issued for it stops working
    #[instrument(skip(self, claims), fields(session_id = %claims.sid))]
    pub async fn sign_out(&self, claims: &Claims) -> ServiceResult<()> {
        if self.ctx.sessions().revoke(&claims.sid).await? {
            info!("Participant signed out");
        }
        Ok(())
    }

    /// Validate an access token and check its session is still open
    pub async fn authenticate(&self, access_token: &str) -> ServiceResult<Claims> {
        let claims = self.ctx.jwt_service().validate_access_token(access_token)?;

        if !self
            .ctx
            .sessions()
            .is_live(&claims.sid, claims.email())
            .await?
        {
            return Err(AppError::SessionRevoked.into());
        }

        Ok(claims)
    }
}
