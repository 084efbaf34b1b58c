//! Live collection feeds
//!
//! A feed yields full-collection snapshots. Consumers recompute their read
//! models from the latest snapshot and never see deltas, so any delivery
//! mechanism that can produce whole collections can back a feed.

use async_trait::async_trait;
use std::sync::Arc;

/// One full copy of a collection
#[derive(Debug)]
pub struct Snapshot<T> {
    /// Increases by one per refresh of the collection
    pub version: u64,
    pub items: Arc<[T]>,
}

impl<T> Snapshot<T> {
    pub fn new(version: u64, items: Vec<T>) -> Self {
        Self {
            version,
            items: items.into(),
        }
    }

    /// Version zero with no items, used before the first load
    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Subscription to a live collection
///
/// Dropping the feed releases the subscription.
#[async_trait]
pub trait SnapshotFeed<T: Send + Sync + 'static>: Send {
    /// Latest snapshot, without waiting
    fn current(&self) -> Snapshot<T>;

    /// Wait for a snapshot newer than the last one observed.
    ///
    /// Intermediate versions may be skipped. Returns `None` once the source
    /// has shut down.
    async fn next_snapshot(&mut self) -> Option<Snapshot<T>>;
}
