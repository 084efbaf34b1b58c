//! Prediction service
//!
//! Every write stores the caller's complete record; there is no partial
//! update at the storage level.

use tracing::{info, instrument};

use babywatch_core::editor::{FieldEdit, PredictionEditor};
use babywatch_core::entities::{Prediction, PredictionFields};
use babywatch_core::events::PredictionUpsertedEvent;
use babywatch_core::read_model::PredictionBoard;
use babywatch_core::value_objects::next_modified_at;
use babywatch_core::{Collection, DomainEvent};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Prediction service
pub struct PredictionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PredictionService<'a> {
    /// Create a new PredictionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upsert the caller's full record
    ///
    /// `last_modified_at` always moves forward, even for an identical
    /// write within the same second.
    #[instrument(skip(self, fields))]
    pub async fn update_prediction(
        &self,
        email: &str,
        fields: PredictionFields,
    ) -> ServiceResult<Prediction> {
        let previous = self.ctx.prediction_repo().find_by_owner(email).await?;
        let modified_at = next_modified_at(
            self.ctx.now(),
            previous.as_ref().map(|p| p.last_modified_at),
        );

        let prediction = Prediction::from_fields(email, fields, modified_at);
        self.ctx.prediction_repo().upsert(&prediction).await?;
        self.ctx.hub().refresh(Collection::Predictions).await;

        self.ctx
            .announce(&DomainEvent::PredictionUpserted(
                PredictionUpsertedEvent::new(email, modified_at),
            ))
            .await;

        info!(owner = %email, modified_at, "Prediction saved");

        Ok(prediction)
    }

    /// Apply a single field edit on top of the stored record
    #[instrument(skip(self))]
    pub async fn edit_prediction(&self, email: &str, edit: FieldEdit) -> ServiceResult<Prediction> {
        let stored = self.ctx.prediction_repo().find_by_owner(email).await?;
        let mut editor = PredictionEditor::seed(stored.as_ref(), self.ctx.prediction_defaults());
        let fields = editor.apply(edit);
        self.update_prediction(email, fields).await
    }

    /// The caller's saved record
    pub async fn my_prediction(&self, email: &str) -> ServiceResult<Option<Prediction>> {
        Ok(self.ctx.prediction_repo().find_by_owner(email).await?)
    }

    /// What the editor should show: saved fields or the defaults
    pub async fn draft(&self, email: &str) -> ServiceResult<PredictionFields> {
        Ok(self
            .my_prediction(email)
            .await?
            .map_or_else(|| self.ctx.prediction_defaults().clone(), |p| p.fields()))
    }

    /// Editor seeded for a long-lived session
    pub async fn editor(&self, email: &str) -> ServiceResult<PredictionEditor> {
        let stored = self.my_prediction(email).await?;
        Ok(PredictionEditor::seed(
            stored.as_ref(),
            self.ctx.prediction_defaults(),
        ))
    }

    /// Predictions board from the latest snapshot
    pub fn board(&self, email: &str) -> PredictionBoard {
        let predictions = self.ctx.hub().predictions();
        PredictionBoard::compute(&predictions.items, email, self.ctx.prediction_defaults())
    }
}
