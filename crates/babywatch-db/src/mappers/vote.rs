//! Vote entity <-> model mapper

use babywatch_core::entities::Vote;
use babywatch_core::error::DomainError;
use babywatch_core::value_objects::NameKey;

use crate::models::VoteModel;

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        let name_key: NameKey = model.name_key.parse().map_err(|e| {
            DomainError::DatabaseError(format!("Stored vote {} has a bad key: {e}", model.id))
        })?;

        Ok(Vote {
            id: model.id,
            name_key,
            voter_email: model.voter_email,
            created_at: model.created_at,
        })
    }
}

/// Values for inserting a vote row
pub struct VoteInsert<'a> {
    pub id: uuid::Uuid,
    pub name_key: &'a str,
    pub voter_email: &'a str,
    pub created_at: i64,
}

impl<'a> VoteInsert<'a> {
    pub fn new(vote: &'a Vote) -> Self {
        Self {
            id: vote.id,
            name_key: vote.name_key.as_str(),
            voter_email: &vote.voter_email,
            created_at: vote.created_at,
        }
    }
}
