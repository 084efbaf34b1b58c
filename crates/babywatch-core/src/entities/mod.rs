//! Domain entities - core business objects

mod name_suggestion;
mod prediction;
mod session;
mod vote;

pub use name_suggestion::NameSuggestion;
pub use prediction::{default_delivery_date, Prediction, PredictionFields};
pub use session::Session;
pub use vote::Vote;
