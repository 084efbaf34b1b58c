//! Name suggestion entity <-> model mapper

use babywatch_core::entities::NameSuggestion;

use crate::models::NameModel;

/// Convert NameModel to NameSuggestion entity
///
/// The stored key is dropped; it is always recomputed from the name and
/// flags.
impl From<NameModel> for NameSuggestion {
    fn from(model: NameModel) -> Self {
        NameSuggestion {
            display_name: model.display_name,
            is_boy: model.is_boy,
            is_girl: model.is_girl,
            submitter_email: model.submitter_email,
            created_at: model.created_at,
        }
    }
}

/// Values for inserting or replacing a name row
pub struct NameInsert<'a> {
    pub key: String,
    pub display_name: &'a str,
    pub is_boy: bool,
    pub is_girl: bool,
    pub submitter_email: &'a str,
    pub created_at: i64,
}

impl<'a> NameInsert<'a> {
    pub fn new(name: &'a NameSuggestion) -> Self {
        Self {
            key: name.key().into_inner(),
            display_name: &name.display_name,
            is_boy: name.is_boy,
            is_girl: name.is_girl,
            submitter_email: &name.submitter_email,
            created_at: name.created_at,
        }
    }
}
