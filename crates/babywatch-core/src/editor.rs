//! Prediction editor
//!
//! Holds the caller's local copy of the four editable fields. The copy is
//! seeded once and then only changes through [`PredictionEditor::apply`];
//! later remote changes to the same record are not merged back in. Every
//! edit yields the complete record to write.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{Prediction, PredictionFields};
use crate::value_objects::{Sex, Weight};

/// A change to one editable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    Sex(Sex),
    Pounds(u32),
    Ounces(u32),
    Weight(Weight),
    DeliveryDate(NaiveDate),
    EyeColour(String),
}

#[derive(Debug, Clone)]
pub struct PredictionEditor {
    state: PredictionFields,
}

impl PredictionEditor {
    /// Seed from the saved record, or from `defaults` when there is none
    pub fn seed(saved: Option<&Prediction>, defaults: &PredictionFields) -> Self {
        Self {
            state: saved.map_or_else(|| defaults.clone(), Prediction::fields),
        }
    }

    /// Current local state
    #[inline]
    pub fn state(&self) -> &PredictionFields {
        &self.state
    }

    /// Apply an edit locally and return the full record to upsert
    pub fn apply(&mut self, edit: FieldEdit) -> PredictionFields {
        match edit {
            FieldEdit::Sex(sex) => self.state.sex = sex,
            FieldEdit::Pounds(lbs) => self.state.weight.lbs = lbs,
            FieldEdit::Ounces(oz) => self.state.weight.oz = oz,
            FieldEdit::Weight(weight) => self.state.weight = weight,
            FieldEdit::DeliveryDate(date) => self.state.delivery_date = date,
            FieldEdit::EyeColour(colour) => self.state.eye_colour = colour,
        }
        self.state.clone()
    }
}
