//! Live session registry
//!
//! Tokens are only honored while their session is stored and unexpired.
//! Sessions are kept in the shared storage backend, so they survive a
//! restart and every instance over the same storage agrees on them.
//! Signing out deletes the session, which revokes every token of that
//! session at once. A session lasts as long as a refresh token and is
//! extended each time its tokens are refreshed.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use babywatch_core::entities::Session;
use babywatch_core::traits::SessionRepository;
use babywatch_core::value_objects::Clock;

use super::error::ServiceResult;

/// Session id -> participant email, with expiry
#[derive(Clone)]
pub struct SessionRegistry {
    repo: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    ttl_seconds: i64,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    pub fn new(repo: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>, ttl_seconds: i64) -> Self {
        Self {
            repo,
            clock,
            ttl_seconds,
        }
    }

    /// Open a new session for `email` and return its id
    ///
    /// Expired sessions are swept first.
    pub async fn open(&self, email: &str) -> ServiceResult<String> {
        let now = self.clock.now();
        let swept = self.repo.remove_expired(now).await?;
        if swept > 0 {
            debug!(swept, "Expired sessions removed");
        }

        let session = Session::new(Uuid::new_v4().to_string(), email, now + self.ttl_seconds);
        self.repo.save(&session).await?;
        Ok(session.id)
    }

    /// Whether `session_id` is live and belongs to `email`
    pub async fn is_live(&self, session_id: &str, email: &str) -> ServiceResult<bool> {
        let now = self.clock.now();
        Ok(self
            .repo
            .find(session_id)
            .await?
            .is_some_and(|session| session.admits(email, now)))
    }

    /// Push a live session's expiry out by a full lifetime
    ///
    /// Returns `false` if the session is gone, expired or owned by someone
    /// else.
    pub async fn renew(&self, session_id: &str, email: &str) -> ServiceResult<bool> {
        let now = self.clock.now();
        let Some(mut session) = self.repo.find(session_id).await? else {
            return Ok(false);
        };
        if !session.admits(email, now) {
            return Ok(false);
        }

        session.expires_at = now + self.ttl_seconds;
        self.repo.save(&session).await?;
        Ok(true)
    }

    /// Close a session. Returns `false` if it was not open.
    pub async fn revoke(&self, session_id: &str) -> ServiceResult<bool> {
        Ok(self.repo.remove(session_id).await?)
    }
}
