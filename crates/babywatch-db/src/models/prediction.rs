//! Prediction database model

use chrono::NaiveDate;
use sqlx::FromRow;

/// Database model for the predictions table
#[derive(Debug, Clone, FromRow)]
pub struct PredictionModel {
    pub owner_email: String,
    pub sex: String,
    pub weight_lbs: i64,
    pub weight_oz: i64,
    pub delivery_date: NaiveDate,
    pub eye_colour: String,
    pub last_modified_at: i64,
}
