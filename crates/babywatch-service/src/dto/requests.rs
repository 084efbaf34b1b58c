//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement
//! `Validate` for input validation.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use babywatch_core::entities::PredictionFields;
use babywatch_core::read_model::{CategoryFilter, NameView, SortKey, SortOrder};
use babywatch_core::value_objects::{Sex, Weight};

// ============================================================================
// Auth Requests
// ============================================================================

/// Sign-in request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Group passcode; required only when the event is locked
    #[serde(default)]
    pub passcode: Option<String>,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Name Requests
// ============================================================================

/// Body of both "suggest" and "like"
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NameRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub boy: bool,

    #[serde(default)]
    pub girl: bool,
}

/// Names board query (`?sort=likes&reverse=true&girls=false`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NamesQuery {
    pub sort: Option<SortKey>,
    pub reverse: Option<bool>,
    pub girls: Option<bool>,
    pub boys: Option<bool>,
}

impl NamesQuery {
    /// Apply the query on top of an existing view
    pub fn merge_into(self, view: NameView) -> NameView {
        NameView {
            sort: SortOrder::new(
                self.sort.unwrap_or(view.sort.key),
                self.reverse.unwrap_or(view.sort.reverse),
            ),
            filter: CategoryFilter::new(
                self.girls.unwrap_or(view.filter.show_girls),
                self.boys.unwrap_or(view.filter.show_boys),
            ),
        }
    }
}

impl From<NamesQuery> for NameView {
    fn from(query: NamesQuery) -> Self {
        query.merge_into(NameView::default())
    }
}

// ============================================================================
// Prediction Requests
// ============================================================================

/// Full-record prediction write
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePredictionRequest {
    pub sex: Sex,

    pub weight: Weight,

    pub delivery_date: NaiveDate,

    #[serde(default)]
    #[validate(length(max = 50, message = "Eye colour must be at most 50 characters"))]
    pub eye_colour: String,
}

impl From<UpdatePredictionRequest> for PredictionFields {
    fn from(request: UpdatePredictionRequest) -> Self {
        Self {
            sex: request.sex,
            weight: request.weight,
            delivery_date: request.delivery_date,
            eye_colour: request.eye_colour,
        }
    }
}
