//! Redis Pub/Sub publisher.
//!
//! Announces successful writes so other instances can refresh.

use babywatch_core::DomainEvent;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::ChangeChannel;

/// Wire payload of a change announcement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNotice {
    /// Event type name (e.g., "NAME_ADDED", "VOTE_CAST")
    pub event_type: String,
    /// Instance that made the write
    pub origin: String,
    /// The serialized domain event
    pub data: serde_json::Value,
}

impl ChangeNotice {
    /// Wrap a domain event
    pub fn from_event(event: &DomainEvent, origin: impl Into<String>) -> serde_json::Result<Self> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            origin: origin.into(),
            data: serde_json::to_value(event)?,
        })
    }

    /// Recover the domain event, if the payload is one this build knows
    #[must_use]
    pub fn event(&self) -> Option<DomainEvent> {
        serde_json::from_value(self.data.clone()).ok()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone, Debug)]
pub struct ChangePublisher {
    pool: RedisPool,
    origin: String,
}

impl ChangePublisher {
    /// Create a new publisher tagging notices with `origin`
    #[must_use]
    pub fn new(pool: RedisPool, origin: impl Into<String>) -> Self {
        Self {
            pool,
            origin: origin.into(),
        }
    }

    /// Origin tag of this instance
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Announce an event on its collection's channel
    pub async fn publish(&self, event: &DomainEvent) -> RedisResult<u32> {
        let channel = ChangeChannel::new(event.collection());
        let notice = ChangeNotice::from_event(event, self.origin.as_str())?;
        let payload = notice.to_json()?;

        let mut conn = self.pool.get().await?;
        let receivers: u32 = conn.publish(channel.name(), &payload).await?;

        tracing::debug!(
            channel = %channel,
            event_type = %notice.event_type,
            receivers = receivers,
            "Published change"
        );

        Ok(receivers)
    }
}
