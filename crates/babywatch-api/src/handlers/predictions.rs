//! Prediction handlers
//!
//! Everyone can read every prediction; each participant writes only their own.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use babywatch_core::FieldEdit;
use babywatch_service::dto::{
    MyPredictionResponse, PredictionBoardResponse, PredictionResponse, UpdatePredictionRequest,
};
use babywatch_service::PredictionService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// All predictions, the caller's record and their editor draft
///
/// GET /predictions
pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<PredictionBoardResponse> {
    let service = PredictionService::new(state.service_context());
    Json(PredictionBoardResponse::from(service.board(auth.email())))
}

/// GET /predictions/@me
pub async fn get_my_prediction(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MyPredictionResponse>> {
    let service = PredictionService::new(state.service_context());
    let saved = service.my_prediction(auth.email()).await?;
    let draft = match &saved {
        Some(prediction) => prediction.fields(),
        None => state.service_context().prediction_defaults().clone(),
    };

    Ok(Json(MyPredictionResponse {
        saved: saved.map(PredictionResponse::from),
        draft,
    }))
}

/// Replace the caller's whole record
///
/// PUT /predictions/@me
pub async fn update_my_prediction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdatePredictionRequest>,
) -> ApiResult<Json<PredictionResponse>> {
    let service = PredictionService::new(state.service_context());
    let prediction = service
        .update_prediction(auth.email(), request.into())
        .await?;
    Ok(Json(PredictionResponse::from(prediction)))
}

/// Change one field and save the whole record
///
/// PATCH /predictions/@me with `{"field": "eye_colour", "value": "green"}`
pub async fn edit_my_prediction(
    State(state): State<AppState>,
    auth: AuthUser,
    edit: Result<Json<FieldEdit>, JsonRejection>,
) -> ApiResult<Json<PredictionResponse>> {
    let Json(edit) = edit.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let service = PredictionService::new(state.service_context());
    let prediction = service.edit_prediction(auth.email(), edit).await?;
    Ok(Json(PredictionResponse::from(prediction)))
}
