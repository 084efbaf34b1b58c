//! Traits (ports) implemented by infrastructure and presentation adapters

mod animator;
mod feed;
mod repositories;

pub use animator::ReorderAnimator;
pub use feed::{Snapshot, SnapshotFeed};
pub use repositories::{
    NameRepository, PredictionRepository, RepoResult, SessionRepository, VoteRepository,
};
