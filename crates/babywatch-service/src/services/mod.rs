//! Business logic services
//!
//! This module contains the service layer: use cases over the
//! repositories, the live hub that pushes snapshots to subscribers, and
//! the session registry.

pub mod auth;
pub mod context;
pub mod error;
pub mod live;
pub mod names;
pub mod predictions;
pub mod sessions;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use live::{LiveHub, NamesSubscription, PredictionsSubscription, WatchFeed};
pub use names::NameService;
pub use predictions::PredictionService;
pub use sessions::SessionRegistry;
