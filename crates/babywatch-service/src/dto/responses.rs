//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Timestamps on
//! records are epoch seconds, as stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use babywatch_core::entities::PredictionFields;
use babywatch_core::read_model::SortKey;
use babywatch_core::value_objects::{Sex, Weight};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// The signed-in participant
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub email: String,
    pub session_id: String,
}

// ============================================================================
// Name Responses
// ============================================================================

/// A stored suggestion
#[derive(Debug, Clone, Serialize)]
pub struct NameResponse {
    pub key: String,
    pub display_name: String,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: String,
    pub created_at: i64,
    /// "(b)", "(g)", "(b/g)" or nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// One row of the names board
#[derive(Debug, Clone, Serialize)]
pub struct NameRowResponse {
    pub key: String,
    pub display_name: String,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: String,
    pub created_at: i64,
    pub likes: u64,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// The names board
#[derive(Debug, Clone, Serialize)]
pub struct NameBoardResponse {
    pub sort: SortKey,
    pub reverse: bool,
    pub show_girls: bool,
    pub show_boys: bool,
    /// Every row in display order, hidden rows included
    pub rows: Vec<NameRowResponse>,
    pub visible_count: usize,
}

/// A recorded vote
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: String,
    pub name_key: String,
    pub voter_email: String,
    pub created_at: i64,
}

// ============================================================================
// Prediction Responses
// ============================================================================

/// A stored prediction
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub owner_email: String,
    pub sex: Sex,
    pub weight: Weight,
    /// e.g. "7 lbs 4 oz"
    pub weight_label: String,
    pub delivery_date: NaiveDate,
    pub eye_colour: String,
    pub last_modified_at: i64,
}

/// The caller's own prediction
#[derive(Debug, Clone, Serialize)]
pub struct MyPredictionResponse {
    pub saved: Option<PredictionResponse>,
    /// Saved fields, or the defaults when nothing is saved
    pub draft: PredictionFields,
}

/// Everyone's predictions plus the caller's own
#[derive(Debug, Clone, Serialize)]
pub struct PredictionBoardResponse {
    /// Sorted by owner email
    pub predictions: Vec<PredictionResponse>,
    pub mine: Option<PredictionResponse>,
    pub draft: PredictionFields,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
    pub change_bus: String,
}

impl ReadinessResponse {
    /// `change_bus` is `None` when no bus is configured
    pub fn ready(storage_healthy: bool, change_bus: Option<bool>) -> Self {
        let all_healthy = storage_healthy && change_bus.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: health_label(storage_healthy).to_string(),
                change_bus: change_bus.map_or("disabled", health_label).to_string(),
            },
        }
    }
}

fn health_label(healthy: bool) -> &'static str {
    if healthy {
        "healthy"
    } else {
        "unhealthy"
    }
}
