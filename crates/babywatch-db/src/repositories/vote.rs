//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use babywatch_core::entities::Vote;
use babywatch_core::traits::{RepoResult, VoteRepository};

use crate::mappers::VoteInsert;
use crate::models::VoteModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Vote>> {
        let results = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, name_key, voter_email, created_at
            FROM likes
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Vote::try_from).collect()
    }

    #[instrument(skip(self), fields(key = %vote.name_key))]
    async fn append(&self, vote: &Vote) -> RepoResult<()> {
        let insert = VoteInsert::new(vote);

        sqlx::query(
            r#"
            INSERT INTO likes (id, name_key, voter_email, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(insert.id)
        .bind(insert.name_key)
        .bind(insert.voter_email)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
