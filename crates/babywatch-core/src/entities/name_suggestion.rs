//! Name suggestion entity - a candidate name submitted by a participant

use crate::value_objects::{Category, NameKey};

/// A suggested name
///
/// Identity is the normalized key derived from the display name and both
/// category flags; it is never stored separately from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSuggestion {
    pub display_name: String,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: String,
    pub created_at: i64,
}

impl NameSuggestion {
    /// Create a new NameSuggestion
    pub fn new(
        display_name: impl Into<String>,
        is_boy: bool,
        is_girl: bool,
        submitter_email: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            is_boy,
            is_girl,
            submitter_email: submitter_email.into(),
            created_at,
        }
    }

    /// Document key of this suggestion
    pub fn key(&self) -> NameKey {
        NameKey::normalize(&self.display_name, self.is_boy, self.is_girl)
    }

    #[inline]
    pub fn category(&self) -> Category {
        Category::from_flags(self.is_boy, self.is_girl)
    }
}
