//! Prediction entity - one participant's guess about the baby

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Sex, Weight};

/// Delivery date shown before a participant has saved anything
pub fn default_delivery_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 6).unwrap_or_default()
}

/// A stored prediction, keyed by its owner's email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub owner_email: String,
    pub sex: Sex,
    pub weight: Weight,
    pub delivery_date: NaiveDate,
    pub eye_colour: String,
    pub last_modified_at: i64,
}

/// The four user-editable fields of a prediction
///
/// Writes always carry all four; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFields {
    pub sex: Sex,
    pub weight: Weight,
    pub delivery_date: NaiveDate,
    pub eye_colour: String,
}

impl PredictionFields {
    /// Defaults with a specific delivery date
    pub fn with_delivery_date(delivery_date: NaiveDate) -> Self {
        Self {
            sex: Sex::default(),
            weight: Weight::default(),
            delivery_date,
            eye_colour: String::new(),
        }
    }
}

impl Default for PredictionFields {
    fn default() -> Self {
        Self::with_delivery_date(default_delivery_date())
    }
}

impl Prediction {
    /// Build the full record written for `owner_email`
    pub fn from_fields(
        owner_email: impl Into<String>,
        fields: PredictionFields,
        last_modified_at: i64,
    ) -> Self {
        Self {
            owner_email: owner_email.into(),
            sex: fields.sex,
            weight: fields.weight,
            delivery_date: fields.delivery_date,
            eye_colour: fields.eye_colour,
            last_modified_at,
        }
    }

    /// Editable fields of this record
    pub fn fields(&self) -> PredictionFields {
        PredictionFields {
            sex: self.sex,
            weight: self.weight,
            delivery_date: self.delivery_date,
            eye_colour: self.eye_colour.clone(),
        }
    }
}
