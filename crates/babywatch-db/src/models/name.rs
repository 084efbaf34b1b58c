//! Name suggestion database model

use sqlx::FromRow;

/// Database model for the names table
#[derive(Debug, Clone, FromRow)]
pub struct NameModel {
    pub key: String,
    pub display_name: String,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: String,
    pub created_at: i64,
}
