//! Prediction entity <-> model mapper

use babywatch_core::entities::Prediction;
use babywatch_core::error::DomainError;
use babywatch_core::value_objects::{Sex, Weight};
use chrono::NaiveDate;

use crate::models::PredictionModel;

fn column_u32(column: &str, owner: &str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::DatabaseError(format!("Prediction for {owner} has bad {column}: {value}"))
    })
}

impl TryFrom<PredictionModel> for Prediction {
    type Error = DomainError;

    fn try_from(model: PredictionModel) -> Result<Self, Self::Error> {
        let sex: Sex = model.sex.parse().map_err(|e| {
            DomainError::DatabaseError(format!("Prediction for {}: {e}", model.owner_email))
        })?;
        let weight = Weight::new(
            column_u32("weight_lbs", &model.owner_email, model.weight_lbs)?,
            column_u32("weight_oz", &model.owner_email, model.weight_oz)?,
        );

        Ok(Prediction {
            owner_email: model.owner_email,
            sex,
            weight,
            delivery_date: model.delivery_date,
            eye_colour: model.eye_colour,
            last_modified_at: model.last_modified_at,
        })
    }
}

/// Values for inserting or replacing a prediction row
pub struct PredictionInsert<'a> {
    pub owner_email: &'a str,
    pub sex: &'static str,
    pub weight_lbs: i64,
    pub weight_oz: i64,
    pub delivery_date: NaiveDate,
    pub eye_colour: &'a str,
    pub last_modified_at: i64,
}

impl<'a> PredictionInsert<'a> {
    pub fn new(prediction: &'a Prediction) -> Self {
        Self {
            owner_email: &prediction.owner_email,
            sex: prediction.sex.as_str(),
            weight_lbs: i64::from(prediction.weight.lbs),
            weight_oz: i64::from(prediction.weight.oz),
            delivery_date: prediction.delivery_date,
            eye_colour: &prediction.eye_colour,
            last_modified_at: prediction.last_modified_at,
        }
    }
}
