//! # babywatch-core
//!
//! Domain layer containing entities, value objects, read models, repository
//! traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod editor;
pub mod entities;
pub mod error;
pub mod events;
pub mod read_model;
pub mod reconcile;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use editor::{FieldEdit, PredictionEditor};
pub use entities::{
    default_delivery_date, NameSuggestion, Prediction, PredictionFields, Session, Vote,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use read_model::{
    locale_compare, CategoryFilter, NameBoard, NameView, NameWithVoteCount, PredictionBoard,
    SortKey, SortOrder,
};
pub use reconcile::{
    reconcile, reconcile_with, NoopAnimator, RecordingAnimator, RowSlot, RowTransition,
};
pub use traits::{
    NameRepository, PredictionRepository, RepoResult, ReorderAnimator, SessionRepository,
    Snapshot, SnapshotFeed, VoteRepository,
};
pub use value_objects::{
    Category, Clock, Collection, ManualClock, NameKey, NameKeyParseError, Sex, SystemClock,
    Weight,
};
