//! Redis Pub/Sub module.
//!
//! Fans collection changes out to every instance.

mod channels;
mod publisher;
mod subscriber;

pub use channels::{ChangeChannel, CHANNEL_PREFIX};
pub use publisher::{ChangeNotice, ChangePublisher};
pub use subscriber::{
    ChangeSubscriber, ReceivedChange, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberEvent, SubscriberResult,
};
