//! PostgreSQL implementation of NameRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use babywatch_core::entities::NameSuggestion;
use babywatch_core::traits::{NameRepository, RepoResult};
use babywatch_core::value_objects::NameKey;

use crate::mappers::NameInsert;
use crate::models::NameModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NameRepository
#[derive(Clone)]
pub struct PgNameRepository {
    pool: PgPool,
}

impl PgNameRepository {
    /// Create a new PgNameRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NameRepository for PgNameRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<NameSuggestion>> {
        let results = sqlx::query_as::<_, NameModel>(
            r#"
            SELECT key, display_name, is_boy, is_girl, submitter_email, created_at
            FROM names
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(NameSuggestion::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_key(&self, key: &NameKey) -> RepoResult<Option<NameSuggestion>> {
        let result = sqlx::query_as::<_, NameModel>(
            r#"
            SELECT key, display_name, is_boy, is_girl, submitter_email, created_at
            FROM names
            WHERE key = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(NameSuggestion::from))
    }

    #[instrument(skip(self), fields(key = %name.key()))]
    async fn upsert(&self, name: &NameSuggestion) -> RepoResult<()> {
        let insert = NameInsert::new(name);

        sqlx::query(
            r#"
            INSERT INTO names (key, display_name, is_boy, is_girl, submitter_email, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (key) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                is_boy = EXCLUDED.is_boy,
                is_girl = EXCLUDED.is_girl,
                submitter_email = EXCLUDED.submitter_email,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(&insert.key)
        .bind(insert.display_name)
        .bind(insert.is_boy)
        .bind(insert.is_girl)
        .bind(insert.submitter_email)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
