//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (in-memory or PostgreSQL).
//! Sessions live next to the collections so every instance sharing the
//! storage honors the same tokens.

use async_trait::async_trait;

use crate::entities::{NameSuggestion, Prediction, Session, Vote};
use crate::error::DomainError;
use crate::value_objects::NameKey;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Name Repository
// ============================================================================

#[async_trait]
pub trait NameRepository: Send + Sync {
    /// List every suggestion, in no particular order
    async fn list(&self) -> RepoResult<Vec<NameSuggestion>>;

    /// Find a suggestion by its normalized key
    async fn find_by_key(&self, key: &NameKey) -> RepoResult<Option<NameSuggestion>>;

    /// Write a suggestion at its key, replacing any record already there
    async fn upsert(&self, name: &NameSuggestion) -> RepoResult<()>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// List every vote, in no particular order
    async fn list(&self) -> RepoResult<Vec<Vote>>;

    /// Append a vote
    async fn append(&self, vote: &Vote) -> RepoResult<()>;
}

// ============================================================================
// Prediction Repository
// ============================================================================

#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// List every prediction, in no particular order
    async fn list(&self) -> RepoResult<Vec<Prediction>>;

    /// Find the prediction owned by an email
    async fn find_by_owner(&self, owner_email: &str) -> RepoResult<Option<Prediction>>;

    /// Write the full record at its owner's key
    async fn upsert(&self, prediction: &Prediction) -> RepoResult<()>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a session, replacing any with the same id
    async fn save(&self, session: &Session) -> RepoResult<()>;

    /// Find a session by id, expired or not
    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>>;

    /// Delete a session. Returns `false` if there was none.
    async fn remove(&self, session_id: &str) -> RepoResult<bool>;

    /// Delete every session that expired at or before `now`
    async fn remove_expired(&self, now: i64) -> RepoResult<u64>;
}
