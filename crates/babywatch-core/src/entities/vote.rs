//! Vote entity - one "+1" click on a name key

use uuid::Uuid;

use crate::value_objects::NameKey;

/// A single vote
///
/// Votes are append-only and not unique per voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Uuid,
    pub name_key: NameKey,
    pub voter_email: String,
    pub created_at: i64,
}

impl Vote {
    /// Create a new Vote with a fresh id
    pub fn new(name_key: NameKey, voter_email: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name_key,
            voter_email: voter_email.into(),
            created_at,
        }
    }

    /// Vote for a name as the voter sees it.
    ///
    /// The key is derived from the flags supplied here, not from the stored
    /// suggestion, so mismatched flags produce a vote that counts nowhere.
    pub fn cast(
        name: &str,
        is_boy: bool,
        is_girl: bool,
        voter_email: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self::new(NameKey::normalize(name, is_boy, is_girl), voter_email, created_at)
    }
}
