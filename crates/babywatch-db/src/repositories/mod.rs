//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! babywatch-core. One repository per collection, plus sign-in sessions.

mod error;
mod name;
mod prediction;
mod session;
mod vote;

pub use name::PgNameRepository;
pub use prediction::PgPredictionRepository;
pub use session::PgSessionRepository;
pub use vote::PgVoteRepository;
