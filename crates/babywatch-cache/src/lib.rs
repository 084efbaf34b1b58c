//! # babywatch-cache
//!
//! Redis change bus for running more than one API instance against the
//! same storage.
//!
//! Every successful write is announced on a per-collection channel. Each
//! instance listens on all channels and, when a notice from another
//! instance arrives, re-reads that collection so its live subscribers
//! catch up.
//!
//! ## Example
//!
//! ```ignore
//! use babywatch_cache::{
//!     ChangePublisher, RedisPool, RedisPoolConfig, SubscriberBuilder, SubscriberEvent,
//! };
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = ChangePublisher::new(pool, "instance-a");
//! publisher.publish(&event).await?;
//!
//! let subscriber = SubscriberBuilder::new()
//!     .redis_url("redis://127.0.0.1:6379")
//!     .ignore_origin("instance-a")
//!     .build();
//! let mut rx = subscriber.receiver();
//! while let Ok(event) = rx.recv().await {
//!     match event {
//!         SubscriberEvent::Change(change) => println!("{} changed", change.channel),
//!         SubscriberEvent::Resync => println!("reconnected, reload everything"),
//!     }
//! }
//! ```

pub mod pool;
pub mod pubsub;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use pubsub::{
    ChangeChannel, ChangeNotice, ChangePublisher, ChangeSubscriber, ReceivedChange,
    SubscriberBuilder, SubscriberConfig, SubscriberError, SubscriberEvent, SubscriberResult,
    CHANNEL_PREFIX,
};
