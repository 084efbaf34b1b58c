//! Name suggestion handlers

use axum::{extract::State, Json};
use babywatch_core::{DomainError, NameKey};
use babywatch_service::dto::{
    NameBoardResponse, NameRequest, NameResponse, NamesQuery, VoteResponse,
};
use babywatch_service::{NameService, ServiceError};

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Names board with likes, sorted and filtered by the query
///
/// GET /names
pub async fn get_board(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<NamesQuery>,
) -> Json<NameBoardResponse> {
    let service = NameService::new(state.service_context());
    Json(NameBoardResponse::from(service.board(query.into())))
}

/// Suggest a name
///
/// POST /names
pub async fn suggest_name(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<NameRequest>,
) -> ApiResult<Created<Json<NameResponse>>> {
    let service = NameService::new(state.service_context());
    let suggestion = service
        .suggest_name(auth.email(), &request.name, request.boy, request.girl)
        .await?
        .ok_or_else(|| {
            ServiceError::from(DomainError::NameAlreadyExists(NameKey::normalize(
                &request.name,
                request.boy,
                request.girl,
            )))
        })?;

    Ok(Created(Json(NameResponse::from(suggestion))))
}

/// Like a name
///
/// POST /names/likes
pub async fn like_name(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<NameRequest>,
) -> ApiResult<Created<Json<VoteResponse>>> {
    let service = NameService::new(state.service_context());
    let vote = service
        .like_name(auth.email(), &request.name, request.boy, request.girl)
        .await?;

    Ok(Created(Json(VoteResponse::from(vote))))
}
