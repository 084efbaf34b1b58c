//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities and read models to
//! response DTOs.

use babywatch_common::auth::Claims;
use babywatch_core::entities::{NameSuggestion, Prediction, Vote};
use babywatch_core::read_model::{NameBoard, NameWithVoteCount, PredictionBoard};

use super::responses::{
    CurrentUserResponse, NameBoardResponse, NameResponse, NameRowResponse,
    PredictionBoardResponse, PredictionResponse, VoteResponse,
};

// ============================================================================
// Auth Mappers
// ============================================================================

impl From<&Claims> for CurrentUserResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            email: claims.email().to_string(),
            session_id: claims.sid.clone(),
        }
    }
}

// ============================================================================
// Name Mappers
// ============================================================================

impl From<&NameSuggestion> for NameResponse {
    fn from(name: &NameSuggestion) -> Self {
        Self {
            key: name.key().into_inner(),
            display_name: name.display_name.clone(),
            is_boy: name.is_boy,
            is_girl: name.is_girl,
            submitter_email: name.submitter_email.clone(),
            created_at: name.created_at,
            hint: name.category().hint(),
        }
    }
}

impl From<NameSuggestion> for NameResponse {
    fn from(name: NameSuggestion) -> Self {
        Self::from(&name)
    }
}

impl From<&NameWithVoteCount> for NameRowResponse {
    fn from(row: &NameWithVoteCount) -> Self {
        Self {
            key: row.key.to_string(),
            display_name: row.display_name.clone(),
            is_boy: row.is_boy,
            is_girl: row.is_girl,
            submitter_email: row.submitter_email.clone(),
            created_at: row.created_at,
            likes: row.likes,
            visible: row.visible,
            hint: row.category().hint(),
        }
    }
}

impl From<&NameBoard> for NameBoardResponse {
    fn from(board: &NameBoard) -> Self {
        Self {
            sort: board.view.sort.key,
            reverse: board.view.sort.reverse,
            show_girls: board.view.filter.show_girls,
            show_boys: board.view.filter.show_boys,
            rows: board.rows.iter().map(NameRowResponse::from).collect(),
            visible_count: board.visible_rows().count(),
        }
    }
}

impl From<NameBoard> for NameBoardResponse {
    fn from(board: NameBoard) -> Self {
        Self::from(&board)
    }
}

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            name_key: vote.name_key.to_string(),
            voter_email: vote.voter_email.clone(),
            created_at: vote.created_at,
        }
    }
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self::from(&vote)
    }
}

// ============================================================================
// Prediction Mappers
// ============================================================================

impl From<&Prediction> for PredictionResponse {
    fn from(prediction: &Prediction) -> Self {
        Self {
            owner_email: prediction.owner_email.clone(),
            sex: prediction.sex,
            weight: prediction.weight,
            weight_label: prediction.weight.to_string(),
            delivery_date: prediction.delivery_date,
            eye_colour: prediction.eye_colour.clone(),
            last_modified_at: prediction.last_modified_at,
        }
    }
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        Self::from(&prediction)
    }
}

impl From<&PredictionBoard> for PredictionBoardResponse {
    fn from(board: &PredictionBoard) -> Self {
        Self {
            predictions: board
                .predictions
                .iter()
                .map(PredictionResponse::from)
                .collect(),
            mine: board.mine.as_ref().map(PredictionResponse::from),
            draft: board.draft.clone(),
        }
    }
}

impl From<PredictionBoard> for PredictionBoardResponse {
    fn from(board: PredictionBoard) -> Self {
        Self::from(&board)
    }
}
