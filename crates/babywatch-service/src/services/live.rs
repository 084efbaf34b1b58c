//! Live hub - push-based snapshots of every collection
//!
//! Each collection is held in a `watch` channel. A refresh re-lists the
//! collection from its repository and publishes it as a new snapshot with
//! the next version. Subscribers only ever see whole collections and may
//! skip versions they were too slow to observe.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use babywatch_core::entities::{NameSuggestion, Prediction, PredictionFields, Vote};
use babywatch_core::read_model::{NameBoard, NameView, PredictionBoard};
use babywatch_core::traits::{
    NameRepository, PredictionRepository, RepoResult, Snapshot, SnapshotFeed, VoteRepository,
};
use babywatch_cache::SubscriberEvent;
use babywatch_core::Collection;

/// One collection's channel
struct LiveCollection<T> {
    tx: watch::Sender<Snapshot<T>>,
    refresh_lock: Mutex<()>,
}

impl<T: Send + Sync + 'static> LiveCollection<T> {
    fn new() -> Self {
        let (tx, _) = watch::channel(Snapshot::empty());
        Self {
            tx,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Re-list and publish; on failure the previous snapshot stays current
    async fn refresh<F>(&self, collection: Collection, load: F)
    where
        F: std::future::Future<Output = RepoResult<Vec<T>>>,
    {
        let _guard = self.refresh_lock.lock().await;

        match load.await {
            Ok(items) => {
                let count = items.len();
                self.tx.send_modify(|current| {
                    *current = Snapshot::new(current.version + 1, items);
                });
                debug!(
                    collection = %collection,
                    version = self.tx.borrow().version,
                    count,
                    "Snapshot published"
                );
            }
            Err(e) => {
                warn!(
                    collection = %collection,
                    error = %e,
                    "Refresh failed, keeping last snapshot"
                );
            }
        }
    }

    fn current(&self) -> Snapshot<T> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> WatchFeed<T> {
        WatchFeed {
            rx: self.tx.subscribe(),
        }
    }
}

/// Owner of every live collection
pub struct LiveHub {
    name_repo: Arc<dyn NameRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    prediction_repo: Arc<dyn PredictionRepository>,
    names: LiveCollection<NameSuggestion>,
    votes: LiveCollection<Vote>,
    predictions: LiveCollection<Prediction>,
}

impl std::fmt::Debug for LiveHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveHub")
            .field("names_version", &self.names.tx.borrow().version)
            .field("votes_version", &self.votes.tx.borrow().version)
            .field("predictions_version", &self.predictions.tx.borrow().version)
            .finish_non_exhaustive()
    }
}

impl LiveHub {
    /// Create a hub with empty version-zero snapshots
    ///
    /// Call [`LiveHub::refresh_all`] before serving traffic.
    pub fn new(
        name_repo: Arc<dyn NameRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        prediction_repo: Arc<dyn PredictionRepository>,
    ) -> Self {
        Self {
            name_repo,
            vote_repo,
            prediction_repo,
            names: LiveCollection::new(),
            votes: LiveCollection::new(),
            predictions: LiveCollection::new(),
        }
    }

    /// Reload one collection from storage
    pub async fn refresh(&self, collection: Collection) {
        match collection {
            Collection::Names => {
                self.names
                    .refresh(collection, self.name_repo.list())
                    .await;
            }
            Collection::Likes => {
                self.votes.refresh(collection, self.vote_repo.list()).await;
            }
            Collection::Predictions => {
                self.predictions
                    .refresh(collection, self.prediction_repo.list())
                    .await;
            }
        }
    }

    /// Reload every collection
    pub async fn refresh_all(&self) {
        for collection in Collection::ALL {
            self.refresh(collection).await;
        }
    }

    /// Catch up with a change made by another instance
    pub async fn apply_remote(&self, event: &SubscriberEvent) {
        match event {
            SubscriberEvent::Change(change) => {
                let collection = change.channel.collection();
                debug!(collection = %collection, "Remote change received");
                self.refresh(collection).await;
            }
            SubscriberEvent::Resync => {
                debug!("Change bus resync");
                self.refresh_all().await;
            }
        }
    }

    /// Latest names snapshot
    pub fn names(&self) -> Snapshot<NameSuggestion> {
        self.names.current()
    }

    /// Latest votes snapshot
    pub fn votes(&self) -> Snapshot<Vote> {
        self.votes.current()
    }

    /// Latest predictions snapshot
    pub fn predictions(&self) -> Snapshot<Prediction> {
        self.predictions.current()
    }

    pub fn version(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Names => self.names.tx.borrow().version,
            Collection::Likes => self.votes.tx.borrow().version,
            Collection::Predictions => self.predictions.tx.borrow().version,
        }
    }

    /// Number of live feeds on a collection
    pub fn subscriber_count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Names => self.names.tx.receiver_count(),
            Collection::Likes => self.votes.tx.receiver_count(),
            Collection::Predictions => self.predictions.tx.receiver_count(),
        }
    }

    pub fn subscribe_names(&self) -> WatchFeed<NameSuggestion> {
        self.names.subscribe()
    }

    pub fn subscribe_votes(&self) -> WatchFeed<Vote> {
        self.votes.subscribe()
    }

    pub fn subscribe_predictions(&self) -> WatchFeed<Prediction> {
        self.predictions.subscribe()
    }

    /// Everything the names screen needs
    pub fn names_screen(&self) -> NamesSubscription {
        NamesSubscription {
            names: self.subscribe_names(),
            votes: self.subscribe_votes(),
        }
    }

    /// Everything the predictions screen needs
    pub fn predictions_screen(&self) -> PredictionsSubscription {
        PredictionsSubscription {
            predictions: self.subscribe_predictions(),
        }
    }
}

/// [`SnapshotFeed`] over a `watch` receiver
#[derive(Debug)]
pub struct WatchFeed<T> {
    rx: watch::Receiver<Snapshot<T>>,
}

#[async_trait]
impl<T: Send + Sync + 'static> SnapshotFeed<T> for WatchFeed<T> {
    fn current(&self) -> Snapshot<T> {
        self.rx.borrow().clone()
    }

    async fn next_snapshot(&mut self) -> Option<Snapshot<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Names and votes feeds held together for one screen
///
/// Dropping it releases both feeds.
#[derive(Debug)]
pub struct NamesSubscription {
    names: WatchFeed<NameSuggestion>,
    votes: WatchFeed<Vote>,
}

impl NamesSubscription {
    /// Board from the latest snapshots
    pub fn board(&self, view: NameView) -> NameBoard {
        let names = self.names.current();
        let votes = self.votes.current();
        NameBoard::compute(&names.items, &votes.items, view)
    }

    /// Wait until either collection changes. `false` once the hub is gone.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            names = self.names.next_snapshot() => names.is_some(),
            votes = self.votes.next_snapshot() => votes.is_some(),
        }
    }

    /// Wait for a change and recompute the board
    pub async fn next_board(&mut self, view: NameView) -> Option<NameBoard> {
        if self.changed().await {
            Some(self.board(view))
        } else {
            None
        }
    }
}

/// Predictions feed for one screen
#[derive(Debug)]
pub struct PredictionsSubscription {
    predictions: WatchFeed<Prediction>,
}

impl PredictionsSubscription {
    /// Board from the latest snapshot
    pub fn board(&self, email: &str, defaults: &PredictionFields) -> PredictionBoard {
        let predictions = self.predictions.current();
        PredictionBoard::compute(&predictions.items, email, defaults)
    }

    /// Wait for a change and recompute the board
    pub async fn next_board(
        &mut self,
        email: &str,
        defaults: &PredictionFields,
    ) -> Option<PredictionBoard> {
        self.predictions.next_snapshot().await?;
        Some(self.board(email, defaults))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use babywatch_cache::{ChangeChannel, ReceivedChange};
    use babywatch_core::error::DomainError;
    use babywatch_db::MemoryStore;
    use std::time::Duration;

    fn hub_over(store: &MemoryStore) -> LiveHub {
        let store = Arc::new(store.clone());
        LiveHub::new(store.clone(), store.clone(), store)
    }

    struct FailingNames;

    #[async_trait]
    impl NameRepository for FailingNames {
        async fn list(&self) -> RepoResult<Vec<NameSuggestion>> {
            Err(DomainError::DatabaseError("offline".to_string()))
        }

        async fn find_by_key(
            &self,
            _key: &babywatch_core::NameKey,
        ) -> RepoResult<Option<NameSuggestion>> {
            Ok(None)
        }

        async fn upsert(&self, _name: &NameSuggestion) -> RepoResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_versions_are_monotonic() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        assert_eq!(hub.version(Collection::Names), 0);

        hub.refresh_all().await;
        assert_eq!(hub.version(Collection::Names), 1);
        assert_eq!(hub.version(Collection::Likes), 1);
        assert_eq!(hub.version(Collection::Predictions), 1);

        hub.refresh(Collection::Names).await;
        hub.refresh(Collection::Names).await;
        assert_eq!(hub.version(Collection::Names), 3);
        assert_eq!(hub.version(Collection::Likes), 1);
    }

    #[tokio::test]
    async fn test_remote_change_refreshes_one_collection() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        hub.refresh_all().await;

        NameRepository::upsert(&store, &NameSuggestion::new("Iris", false, true, "a@x", 1))
            .await
            .unwrap();
        let change = ReceivedChange {
            channel: ChangeChannel::new(Collection::Names),
            notice: None,
        };
        hub.apply_remote(&SubscriberEvent::Change(change)).await;

        assert_eq!(hub.names().len(), 1);
        assert_eq!(hub.version(Collection::Names), 2);
        assert_eq!(hub.version(Collection::Likes), 1);
    }

    #[tokio::test]
    async fn test_resync_reloads_writes_missed_while_disconnected() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        hub.refresh_all().await;

        // Written by another instance while the bus was down
        NameRepository::upsert(&store, &NameSuggestion::new("Iris", false, true, "a@x", 1))
            .await
            .unwrap();
        VoteRepository::append(&store, &Vote::cast("Iris", false, true, "b@x", 2))
            .await
            .unwrap();
        assert!(hub.names().is_empty());

        hub.apply_remote(&SubscriberEvent::Resync).await;

        assert_eq!(hub.names().len(), 1);
        assert_eq!(hub.votes().len(), 1);
        assert_eq!(hub.version(Collection::Predictions), 2);
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_never_go_backwards() {
        let store = MemoryStore::new();
        let hub = Arc::new(hub_over(&store));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let hub = Arc::clone(&hub);
                tokio::spawn(async move { hub.refresh(Collection::Likes).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(hub.version(Collection::Likes), 8);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let hub = LiveHub::new(Arc::new(FailingNames), store.clone(), store);

        hub.refresh(Collection::Names).await;
        assert_eq!(hub.version(Collection::Names), 0);
        assert!(hub.names().is_empty());
    }

    #[tokio::test]
    async fn test_subscription_observes_write() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        hub.refresh_all().await;

        let mut screen = hub.names_screen();
        assert!(screen.board(NameView::default()).rows.is_empty());

        NameRepository::upsert(&store, &NameSuggestion::new("Amy", false, true, "a@x", 1))
            .await
            .unwrap();
        hub.refresh(Collection::Names).await;

        let board = tokio::time::timeout(
            Duration::from_secs(1),
            screen.next_board(NameView::default()),
        )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(board.rows.len(), 1);
        assert_eq!(board.rows[0].display_name, "Amy");
    }

    #[tokio::test]
    async fn test_vote_change_wakes_names_screen() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        hub.refresh_all().await;

        let mut screen = hub.names_screen();
        store
            .append(&Vote::cast("Amy", false, true, "a@x", 1))
            .await
            .unwrap();
        hub.refresh(Collection::Likes).await;

        let woke = tokio::time::timeout(Duration::from_secs(1), screen.changed())
            .await
            .unwrap();
        assert!(woke);
    }

    #[tokio::test]
    async fn test_dropping_screen_releases_both_feeds() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);

        let screen = hub.names_screen();
        assert_eq!(hub.subscriber_count(Collection::Names), 1);
        assert_eq!(hub.subscriber_count(Collection::Likes), 1);

        drop(screen);
        assert_eq!(hub.subscriber_count(Collection::Names), 0);
        assert_eq!(hub.subscriber_count(Collection::Likes), 0);
    }

    #[tokio::test]
    async fn test_slow_subscriber_skips_to_latest() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        let mut feed = hub.subscribe_predictions();

        hub.refresh(Collection::Predictions).await;
        hub.refresh(Collection::Predictions).await;
        hub.refresh(Collection::Predictions).await;

        let snapshot = feed.next_snapshot().await.unwrap();
        assert_eq!(snapshot.version, 3);
    }

    #[tokio::test]
    async fn test_predictions_screen_board() {
        let store = MemoryStore::new();
        let hub = hub_over(&store);
        let screen = hub.predictions_screen();
        let defaults = PredictionFields::default();

        let board = screen.board("me@x", &defaults);
        assert!(board.mine.is_none());
        assert_eq!(board.draft, defaults);
    }
}
