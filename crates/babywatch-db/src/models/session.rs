//! Session database model

use babywatch_core::entities::Session;
use sqlx::FromRow;

/// Database model for the sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub id: String,
    pub email: String,
    pub expires_at: i64,
}

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session::new(model.id, model.email, model.expires_at)
    }
}
