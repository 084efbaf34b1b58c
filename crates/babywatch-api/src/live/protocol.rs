//! Live frame format
//!
//! Every frame is a JSON object `{"type": "...", "data": ...}`. Frames
//! without a payload omit `data`.

use babywatch_core::{FieldEdit, RowTransition};
use babywatch_service::dto::{
    NameBoardResponse, NameRequest, NamesQuery, PredictionBoardResponse,
};
use serde::{Deserialize, Serialize};

use crate::response::ApiError;

/// Which screen a socket serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Names,
    Predictions,
}

/// Sent once after the upgrade
#[derive(Debug, Clone, Serialize)]
pub struct ReadyPayload {
    pub email: String,
    pub session_id: String,
    pub screen: Screen,
}

/// Names board plus how its visible rows moved since the last frame
#[derive(Debug, Clone, Serialize)]
pub struct NamesPayload {
    pub board: NameBoardResponse,
    pub transitions: Vec<RowTransition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

/// Server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerFrame {
    Ready(ReadyPayload),
    Names(NamesPayload),
    Predictions(PredictionBoardResponse),
    Error(ErrorPayload),
    Pong,
}

impl ServerFrame {
    #[must_use]
    pub fn ready(email: impl Into<String>, session_id: impl Into<String>, screen: Screen) -> Self {
        Self::Ready(ReadyPayload {
            email: email.into(),
            session_id: session_id.into(),
            screen,
        })
    }

    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            code: code.into(),
            message: message.into(),
        })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&ApiError> for ServerFrame {
    /// Same code and message an HTTP client would see
    fn from(err: &ApiError) -> Self {
        Self::error(err.error_code(), err.public_message())
    }
}

/// Client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientFrame {
    /// Names screen: change sort or filters. Omitted fields keep their value.
    SetView(NamesQuery),
    AddName(NameRequest),
    LikeName(NameRequest),
    /// Predictions screen: change one field and save
    Edit(FieldEdit),
    Ping,
}

impl ClientFrame {
    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Frame type as sent on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetView(_) => "SET_VIEW",
            Self::AddName(_) => "ADD_NAME",
            Self::LikeName(_) => "LIKE_NAME",
            Self::Edit(_) => "EDIT",
            Self::Ping => "PING",
        }
    }
}
