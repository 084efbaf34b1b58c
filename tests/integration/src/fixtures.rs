//! Test fixtures and data generators
//!
//! Request bodies and the slices of response bodies the tests look at.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::helpers::{assert_json, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh participant email
pub fn unique_email() -> String {
    format!("guest{}@example.com", unique_suffix())
}

/// Sign-in request
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            passcode: None,
        }
    }

    pub fn with_passcode(email: impl Into<String>, passcode: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            passcode: Some(passcode.into()),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUser,
}

/// The signed-in participant
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    pub session_id: String,
}

/// Body for suggesting or liking a name
#[derive(Debug, Serialize)]
pub struct NameRequest {
    pub name: String,
    pub boy: bool,
    pub girl: bool,
}

impl NameRequest {
    pub fn girl(name: &str) -> Self {
        Self {
            name: name.to_string(),
            boy: false,
            girl: true,
        }
    }

    pub fn boy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            boy: true,
            girl: false,
        }
    }

    pub fn either(name: &str) -> Self {
        Self {
            name: name.to_string(),
            boy: true,
            girl: true,
        }
    }
}

/// A stored suggestion
#[derive(Debug, Deserialize)]
pub struct NameResponse {
    pub key: String,
    pub display_name: String,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: String,
    pub hint: Option<String>,
}

/// One board row
#[derive(Debug, Deserialize)]
pub struct NameRow {
    pub key: String,
    pub display_name: String,
    pub likes: u64,
    pub visible: bool,
    pub hint: Option<String>,
}

/// The names board
#[derive(Debug, Deserialize)]
pub struct NameBoard {
    pub sort: String,
    pub reverse: bool,
    pub show_girls: bool,
    pub show_boys: bool,
    pub rows: Vec<NameRow>,
    pub visible_count: usize,
}

impl NameBoard {
    pub fn row(&self, key: &str) -> Option<&NameRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    /// Display names of visible rows in order
    pub fn visible_names(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.display_name.as_str())
            .collect()
    }
}

/// A recorded vote
#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub id: String,
    pub name_key: String,
    pub voter_email: String,
}

/// Full prediction body
pub fn prediction_body(sex: &str, lbs: u32, oz: u32, date: &str, eyes: &str) -> Value {
    json!({
        "sex": sex,
        "weight": {"lbs": lbs, "oz": oz},
        "delivery_date": date,
        "eye_colour": eyes,
    })
}

/// A stored prediction
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub owner_email: String,
    pub sex: String,
    pub weight: Weight,
    pub weight_label: String,
    pub delivery_date: String,
    pub eye_colour: String,
    pub last_modified_at: i64,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Weight {
    pub lbs: u32,
    pub oz: u32,
}

/// Editable fields
#[derive(Debug, Deserialize)]
pub struct PredictionDraft {
    pub sex: String,
    pub weight: Weight,
    pub delivery_date: String,
    pub eye_colour: String,
}

/// GET /predictions/@me
#[derive(Debug, Deserialize)]
pub struct MyPrediction {
    pub saved: Option<PredictionResponse>,
    pub draft: PredictionDraft,
}

/// GET /predictions
#[derive(Debug, Deserialize)]
pub struct PredictionBoard {
    pub predictions: Vec<PredictionResponse>,
    pub mine: Option<PredictionResponse>,
    pub draft: PredictionDraft,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Sign in a fresh participant and return their session
pub async fn sign_in(server: &TestServer, email: &str) -> anyhow::Result<AuthResponse> {
    let response = server
        .post("/api/v1/auth/sign-in", &SignInRequest::new(email))
        .await?;
    assert_json(response, reqwest::StatusCode::OK).await
}
