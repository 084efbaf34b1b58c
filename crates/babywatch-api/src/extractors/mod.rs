//! Axum extractors for request handling
//!
//! Custom extractors for authentication, query strings, and validated
//! JSON bodies.

mod auth;
mod query;
mod validated;

pub use auth::AuthUser;
pub use query::QueryParams;
pub use validated::ValidatedJson;
