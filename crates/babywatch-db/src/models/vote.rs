//! Vote database model

use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the likes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: Uuid,
    pub name_key: String,
    pub voter_email: String,
    pub created_at: i64,
}

