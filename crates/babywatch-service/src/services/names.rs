//! Name service
//!
//! Suggesting names, liking names, and the names board.

use tracing::{info, instrument};

use babywatch_core::entities::{NameSuggestion, Vote};
use babywatch_core::events::{NameAddedEvent, VoteCastEvent};
use babywatch_core::read_model::{NameBoard, NameView};
use babywatch_core::{Collection, DomainEvent, NameKey};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Name service
pub struct NameService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NameService<'a> {
    /// Create a new NameService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Suggest a name
    ///
    /// Returns `None` without writing when a suggestion with the same key is
    /// already in the latest names snapshot. The check and the write are not
    /// atomic; two concurrent submissions of the same key both write and the
    /// last one wins.
    #[instrument(skip(self))]
    pub async fn suggest_name(
        &self,
        email: &str,
        name: &str,
        is_boy: bool,
        is_girl: bool,
    ) -> ServiceResult<Option<NameSuggestion>> {
        let key = NameKey::normalize(name, is_boy, is_girl);
        let names = self.ctx.hub().names();
        if names.iter().any(|existing| existing.key() == key) {
            info!(key = %key, "Name already suggested");
            return Ok(None);
        }

        let suggestion = NameSuggestion::new(name, is_boy, is_girl, email, self.ctx.now());
        self.ctx.name_repo().upsert(&suggestion).await?;
        self.ctx.hub().refresh(Collection::Names).await;

        self.ctx
            .announce(&DomainEvent::NameAdded(NameAddedEvent::new(
                key.clone(),
                name,
                email,
                suggestion.created_at,
            )))
            .await;

        info!(key = %key, "Name added");

        Ok(Some(suggestion))
    }

    /// Suggest a name; `false` means it already existed
    pub async fn add_name(
        &self,
        email: &str,
        name: &str,
        is_boy: bool,
        is_girl: bool,
    ) -> ServiceResult<bool> {
        Ok(self
            .suggest_name(email, name, is_boy, is_girl)
            .await?
            .is_some())
    }

    /// Vote for a name
    ///
    /// The vote's key comes from the flags given here. A name that was
    /// suggested with different flags does not receive it.
    #[instrument(skip(self))]
    pub async fn like_name(
        &self,
        email: &str,
        name: &str,
        is_boy: bool,
        is_girl: bool,
    ) -> ServiceResult<Vote> {
        let vote = Vote::cast(name, is_boy, is_girl, email, self.ctx.now());
        self.ctx.vote_repo().append(&vote).await?;
        self.ctx.hub().refresh(Collection::Likes).await;

        self.ctx
            .announce(&DomainEvent::VoteCast(VoteCastEvent::new(
                vote.id,
                vote.name_key.clone(),
                email,
                vote.created_at,
            )))
            .await;

        info!(key = %vote.name_key, "Name liked");

        Ok(vote)
    }

    /// Names board from the latest snapshots
    pub fn board(&self, view: NameView) -> NameBoard {
        let names = self.ctx.hub().names();
        let votes = self.ctx.hub().votes();
        NameBoard::compute(&names.items, &votes.items, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::context::test_support::memory_context;
    use babywatch_core::read_model::{CategoryFilter, SortKey, SortOrder};

    #[tokio::test]
    async fn test_add_name_dedups_on_key() {
        let (ctx, store, _clock) = memory_context().await;
        let service = NameService::new(&ctx);

        assert!(service.add_name("amy@x", "Jordan", true, true).await.unwrap());
        assert!(!service.add_name("bob@x", "Jordan", true, true).await.unwrap());
        // normalization collapses punctuation and case
        assert!(!service.add_name("bob@x", "jordan", true, true).await.unwrap());

        assert_eq!(store.name_count(), 1);
        let board = service.board(NameView::default());
        assert_eq!(board.rows[0].submitter_email, "amy@x");
    }

    #[tokio::test]
    async fn test_same_name_different_category_is_distinct() {
        let (ctx, store, _clock) = memory_context().await;
        let service = NameService::new(&ctx);

        assert!(service.add_name("amy@x", "Jordan", true, false).await.unwrap());
        assert!(service.add_name("amy@x", "Jordan", false, true).await.unwrap());
        assert_eq!(store.name_count(), 2);
    }

    #[tokio::test]
    async fn test_whitespace_name_is_stored_under_underscore_key() {
        let (ctx, store, _clock) = memory_context().await;
        let service = NameService::new(&ctx);

        let suggestion = service
            .suggest_name("amy@x", "  ", false, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.key().as_str(), "__-g");
        assert_eq!(store.name_count(), 1);

        // the same blanks collide with themselves like any other name
        assert!(!service.add_name("bob@x", "  ", false, true).await.unwrap());
    }

    #[tokio::test]
    async fn test_suggestion_uses_clock() {
        let (ctx, _store, clock) = memory_context().await;
        clock.set(1_700_000_500);

        let suggestion = NameService::new(&ctx)
            .suggest_name("amy@x", "Ana-Maria", true, false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.created_at, 1_700_000_500);
        assert_eq!(suggestion.key().as_str(), "ANA_MARIA-b");
    }

    #[tokio::test]
    async fn test_like_counts_aggregate() {
        let (ctx, store, _clock) = memory_context().await;
        let service = NameService::new(&ctx);

        service.add_name("amy@x", "Amy", false, true).await.unwrap();
        for voter in ["a@x", "b@x", "a@x"] {
            service.like_name(voter, "Amy", false, true).await.unwrap();
        }

        assert_eq!(store.vote_count(), 3);
        let board = service.board(NameView::default());
        assert_eq!(board.rows[0].likes, 3);
    }

    #[tokio::test]
    async fn test_jordan_scenario() {
        let (ctx, _store, clock) = memory_context().await;
        let service = NameService::new(&ctx);

        assert!(service.add_name("amy@x", "Jordan", true, true).await.unwrap());
        clock.advance(1);
        service.like_name("amy@x", "Jordan", true, true).await.unwrap();
        service.like_name("bob@x", "Jordan", true, true).await.unwrap();
        // a vote cast with only the boy flag targets a different key
        let stray = service.like_name("cat@x", "Jordan", true, false).await.unwrap();
        assert_eq!(stray.name_key.as_str(), "JORDAN-b");

        let board = service.board(NameView::default());
        assert_eq!(board.rows.len(), 1);
        assert_eq!(board.rows[0].key.as_str(), "JORDAN-bg");
        assert_eq!(board.rows[0].likes, 2);
    }

    #[tokio::test]
    async fn test_board_respects_view() {
        let (ctx, _store, clock) = memory_context().await;
        let service = NameService::new(&ctx);

        service.add_name("a@x", "Bob", true, false).await.unwrap();
        clock.advance(10);
        service.add_name("a@x", "amy", false, true).await.unwrap();

        let view = NameView {
            sort: SortOrder::new(SortKey::Alpha, false),
            filter: CategoryFilter::new(true, false),
        };
        let board = service.board(view);
        let names: Vec<_> = board.rows.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["amy", "Bob"]);
        let visible: Vec<_> = board.visible_rows().map(|r| r.display_name.as_str()).collect();
        assert_eq!(visible, vec!["amy"]);
    }
}
