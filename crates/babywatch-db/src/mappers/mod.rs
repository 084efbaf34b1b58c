//! Entity to model mappers
//!
//! Conversions between domain entities (babywatch-core) and database models.
//! - `From<Model> for Entity` where every stored value is valid by construction
//! - `TryFrom<Model> for Entity` where a column has to be parsed back
//! - `*Insert` structs: prepare entity data for database writes

mod name;
mod prediction;
mod vote;

pub use name::NameInsert;
pub use prediction::PredictionInsert;
pub use vote::VoteInsert;
