//! Predictions board - everyone's guesses plus the caller's own

use super::locale_compare;
use crate::entities::{Prediction, PredictionFields};
use crate::reconcile::RowSlot;

/// Sort ascending by owner email
pub fn sort_predictions(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| locale_compare(&a.owner_email, &b.owner_email));
}

/// The record owned by `email`, if one has been saved
pub fn my_prediction<'a>(predictions: &'a [Prediction], email: &str) -> Option<&'a Prediction> {
    predictions.iter().find(|p| p.owner_email == email)
}

/// The derived predictions screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionBoard {
    /// All predictions, sorted by owner
    pub predictions: Vec<Prediction>,
    /// The caller's saved record
    pub mine: Option<Prediction>,
    /// What the editor shows: the saved fields, or defaults when nothing is saved
    pub draft: PredictionFields,
}

impl PredictionBoard {
    pub fn compute(
        predictions: &[Prediction],
        current_email: &str,
        defaults: &PredictionFields,
    ) -> Self {
        let mut sorted = predictions.to_vec();
        sort_predictions(&mut sorted);

        let mine = my_prediction(&sorted, current_email).cloned();
        let draft = mine
            .as_ref()
            .map_or_else(|| defaults.clone(), Prediction::fields);

        Self {
            predictions: sorted,
            mine,
            draft,
        }
    }

    /// Keyed slots for list reconciliation
    pub fn row_slots(&self) -> Vec<RowSlot> {
        self.predictions
            .iter()
            .map(|p| RowSlot::new(p.owner_email.as_str(), true))
            .collect()
    }
}
