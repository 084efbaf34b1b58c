//! Pub/Sub channel definitions.
//!
//! One channel per collection.

use babywatch_core::Collection;

/// Prefix shared by every change channel
pub const CHANNEL_PREFIX: &str = "babywatch:";

/// A per-collection change channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeChannel(Collection);

impl ChangeChannel {
    /// Every change channel
    pub const ALL: [Self; 3] = [
        Self(Collection::Names),
        Self(Collection::Likes),
        Self(Collection::Predictions),
    ];

    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self(collection)
    }

    /// Collection this channel announces
    #[must_use]
    pub fn collection(self) -> Collection {
        self.0
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(self) -> String {
        format!("{CHANNEL_PREFIX}{}", self.0.as_str())
    }

    /// Parse a Redis channel name back to a `ChangeChannel`
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        name.strip_prefix(CHANNEL_PREFIX)
            .and_then(Collection::parse)
            .map(Self)
    }
}

impl From<Collection> for ChangeChannel {
    fn from(collection: Collection) -> Self {
        Self(collection)
    }
}

impl std::fmt::Display for ChangeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
