//! Concurrent in-memory implementation of the repository traits
//!
//! Clones share one set of collections, so contexts built over clones of
//! the same store see the same data and the same sessions.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::instrument;

use babywatch_core::entities::{NameSuggestion, Prediction, Session, Vote};
use babywatch_core::traits::{
    NameRepository, PredictionRepository, RepoResult, SessionRepository, VoteRepository,
};
use babywatch_core::value_objects::NameKey;

#[derive(Debug, Default)]
struct Collections {
    /// Name key -> suggestion
    names: DashMap<String, NameSuggestion>,
    /// Append-only
    votes: RwLock<Vec<Vote>>,
    /// Owner email -> prediction
    predictions: DashMap<String, Prediction>,
    /// Session id -> session
    sessions: DashMap<String, Session>,
}

/// Shared in-memory store
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Collections>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored name suggestions
    pub fn name_count(&self) -> usize {
        self.inner.names.len()
    }

    /// Number of stored votes
    pub fn vote_count(&self) -> usize {
        self.inner.votes.read().len()
    }

    /// Number of stored predictions
    pub fn prediction_count(&self) -> usize {
        self.inner.predictions.len()
    }

    /// Number of stored sessions, expired ones included
    pub fn session_count(&self) -> usize {
        self.inner.sessions.len()
    }
}

#[async_trait]
impl NameRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<NameSuggestion>> {
        Ok(self
            .inner
            .names
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_key(&self, key: &NameKey) -> RepoResult<Option<NameSuggestion>> {
        Ok(self
            .inner
            .names
            .get(key.as_str())
            .map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, name), fields(key = %name.key()))]
    async fn upsert(&self, name: &NameSuggestion) -> RepoResult<()> {
        self.inner
            .names
            .insert(name.key().into_inner(), name.clone());
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<Vote>> {
        Ok(self.inner.votes.read().clone())
    }

    #[instrument(skip(self, vote), fields(key = %vote.name_key))]
    async fn append(&self, vote: &Vote) -> RepoResult<()> {
        self.inner.votes.write().push(vote.clone());
        Ok(())
    }
}

#[async_trait]
impl PredictionRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<Prediction>> {
        Ok(self
            .inner
            .predictions
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_owner(&self, owner_email: &str) -> RepoResult<Option<Prediction>> {
        Ok(self
            .inner
            .predictions
            .get(owner_email)
            .map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, prediction), fields(owner = %prediction.owner_email))]
    async fn upsert(&self, prediction: &Prediction) -> RepoResult<()> {
        self.inner
            .predictions
            .insert(prediction.owner_email.clone(), prediction.clone());
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn save(&self, session: &Session) -> RepoResult<()> {
        self.inner
            .sessions
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>> {
        Ok(self
            .inner
            .sessions
            .get(session_id)
            .map(|entry| entry.value().clone()))
    }

    async fn remove(&self, session_id: &str) -> RepoResult<bool> {
        Ok(self.inner.sessions.remove(session_id).is_some())
    }

    async fn remove_expired(&self, now: i64) -> RepoResult<u64> {
        let before = self.inner.sessions.len();
        self.inner
            .sessions
            .retain(|_, session| session.expires_at > now);
        Ok((before - self.inner.sessions.len()) as u64)
    }
}
