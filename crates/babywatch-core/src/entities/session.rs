//! Sign-in session entity

use serde::{Deserialize, Serialize};

/// A signed-in participant's session
///
/// Tokens name the session they were issued for. A token is only honored
/// while its session is stored and not past `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    /// Epoch seconds
    pub expires_at: i64,
}

impl Session {
    pub fn new(id: impl Into<String>, email: impl Into<String>, expires_at: i64) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            expires_at,
        }
    }

    /// Whether the session is usable at `now` by `email`
    pub fn admits(&self, email: &str, now: i64) -> bool {
        self.email == email && now < self.expires_at
    }
}
