//! PostgreSQL implementation of PredictionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use babywatch_core::entities::Prediction;
use babywatch_core::traits::{PredictionRepository, RepoResult};

use crate::mappers::PredictionInsert;
use crate::models::PredictionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PredictionRepository
#[derive(Clone)]
pub struct PgPredictionRepository {
    pool: PgPool,
}

impl PgPredictionRepository {
    /// Create a new PgPredictionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionRepository for PgPredictionRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Prediction>> {
        let results = sqlx::query_as::<_, PredictionModel>(
            r#"
            SELECT owner_email, sex, weight_lbs, weight_oz, delivery_date,
                   eye_colour, last_modified_at
            FROM predictions
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Prediction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_email: &str) -> RepoResult<Option<Prediction>> {
        let result = sqlx::query_as::<_, PredictionModel>(
            r#"
            SELECT owner_email, sex, weight_lbs, weight_oz, delivery_date,
                   eye_colour, last_modified_at
            FROM predictions
            WHERE owner_email = $1
            "#,
        )
        .bind(owner_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Prediction::try_from).transpose()
    }

    #[instrument(skip(self), fields(owner = %prediction.owner_email))]
    async fn upsert(&self, prediction: &Prediction) -> RepoResult<()> {
        let insert = PredictionInsert::new(prediction);

        sqlx::query(
            r#"
            INSERT INTO predictions (
                owner_email, sex, weight_lbs, weight_oz, delivery_date,
                eye_colour, last_modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (owner_email) DO UPDATE SET
                sex = EXCLUDED.sex,
                weight_lbs = EXCLUDED.weight_lbs,
                weight_oz = EXCLUDED.weight_oz,
                delivery_date = EXCLUDED.delivery_date,
                eye_colour = EXCLUDED.eye_colour,
                last_modified_at = EXCLUDED.last_modified_at
            "#,
        )
        .bind(insert.owner_email)
        .bind(insert.sex)
        .bind(insert.weight_lbs)
        .bind(insert.weight_oz)
        .bind(insert.delivery_date)
        .bind(insert.eye_colour)
        .bind(insert.last_modified_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
