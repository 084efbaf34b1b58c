//! Domain events - events emitted when domain state changes
//!
//! These events are used for:
//! - Refreshing live collection snapshots on other server instances
//! - Audit logging

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{Collection, NameKey};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Name Events
    // =========================================================================
    NameAdded(NameAddedEvent),

    // =========================================================================
    // Vote Events
    // =========================================================================
    VoteCast(VoteCastEvent),

    // =========================================================================
    // Prediction Events
    // =========================================================================
    PredictionUpserted(PredictionUpsertedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NameAdded(_) => "NAME_ADDED",
            Self::VoteCast(_) => "VOTE_CAST",
            Self::PredictionUpserted(_) => "PREDICTION_UPSERTED",
        }
    }

    /// Epoch seconds at which the change was written
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::NameAdded(e) => e.timestamp,
            Self::VoteCast(e) => e.timestamp,
            Self::PredictionUpserted(e) => e.timestamp,
        }
    }

    /// Collection whose snapshot this event invalidates
    pub fn collection(&self) -> Collection {
        match self {
            Self::NameAdded(_) => Collection::Names,
            Self::VoteCast(_) => Collection::Likes,
            Self::PredictionUpserted(_) => Collection::Predictions,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameAddedEvent {
    pub key: NameKey,
    pub display_name: String,
    pub submitter_email: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteCastEvent {
    pub vote_id: Uuid,
    pub name_key: NameKey,
    pub voter_email: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionUpsertedEvent {
    pub owner_email: String,
    pub timestamp: i64,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl NameAddedEvent {
    pub fn new(
        key: NameKey,
        display_name: impl Into<String>,
        submitter_email: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            key,
            display_name: display_name.into(),
            submitter_email: submitter_email.into(),
            timestamp,
        }
    }
}

impl VoteCastEvent {
    pub fn new(
        vote_id: Uuid,
        name_key: NameKey,
        voter_email: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            vote_id,
            name_key,
            voter_email: voter_email.into(),
            timestamp,
        }
    }
}

impl PredictionUpsertedEvent {
    pub fn new(owner_email: impl Into<String>, timestamp: i64) -> Self {
        Self {
            owner_email: owner_email.into(),
            timestamp,
        }
    }
}
