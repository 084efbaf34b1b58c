//! Database models - SQLx-compatible structs for PostgreSQL tables

mod name;
mod prediction;
mod session;
mod vote;

pub use name::NameModel;
pub use prediction::PredictionModel;
pub use session::SessionModel;
pub use vote::VoteModel;
