//! Redis Pub/Sub subscriber.
//!
//! Listens on every change channel and re-broadcasts notices that came
//! from other instances.

use futures_util::StreamExt;
use redis::Client;
use tokio::sync::{broadcast, mpsc};

use crate::pool::redact_url;
use crate::pubsub::{ChangeChannel, ChangeNotice};

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// A change announced by another instance
#[derive(Debug, Clone)]
pub struct ReceivedChange {
    /// Channel the notice arrived on
    pub channel: ChangeChannel,
    /// Parsed notice (if valid JSON)
    pub notice: Option<ChangeNotice>,
}

impl ReceivedChange {
    /// Build from a raw Redis message; `None` for channels we do not own
    fn from_redis(channel_name: &str, payload: &str) -> Option<Self> {
        let channel = ChangeChannel::parse(channel_name)?;
        let notice = serde_json::from_str(payload).ok();
        Some(Self { channel, notice })
    }

    /// Whether this notice was published by `origin`
    ///
    /// Unparseable notices are treated as foreign so they still trigger a
    /// refresh.
    fn is_from(&self, origin: Option<&str>) -> bool {
        match (origin, &self.notice) {
            (Some(origin), Some(notice)) => notice.origin == origin,
            _ => false,
        }
    }
}

/// What the background listener hands to its receivers
#[derive(Debug, Clone)]
pub enum SubscriberEvent {
    /// Another instance wrote to a collection
    Change(ReceivedChange),
    /// The connection was re-established; notices sent meanwhile are lost
    Resync,
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Channel buffer size for broadcast
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
    /// Drop notices published by this origin
    pub ignore_origin: Option<String>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 256,
            reconnect_delay_ms: 1000,
            ignore_origin: None,
        }
    }
}

/// Redis Pub/Sub subscriber
///
/// The background listener reconnects on failure and runs until
/// [`ChangeSubscriber::shutdown`] is called or the subscriber is dropped.
pub struct ChangeSubscriber {
    broadcast_tx: broadcast::Sender<SubscriberEvent>,
    shutdown_tx: mpsc::Sender<()>,
}

impl std::fmt::Debug for ChangeSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSubscriber")
            .field("receivers", &self.broadcast_tx.receiver_count())
            .finish_non_exhaustive()
    }
}

impl ChangeSubscriber {
    /// Create a new subscriber and start the background listener
    pub fn new(config: SubscriberConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_buffer);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(Self::listener_loop(config, broadcast_tx.clone(), shutdown_rx));

        Self {
            broadcast_tx,
            shutdown_tx,
        }
    }

    /// Background listener loop
    async fn listener_loop(
        config: SubscriberConfig,
        broadcast_tx: broadcast::Sender<SubscriberEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut connected_before = false;
        loop {
            match Self::run_listener(
                &config,
                &broadcast_tx,
                &mut shutdown_rx,
                &mut connected_before,
            )
            .await
            {
                Ok(()) => {
                    tracing::info!("Change subscriber shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Change subscriber error, reconnecting...");
                    tokio::time::sleep(tokio::time::Duration::from_millis(
                        config.reconnect_delay_ms,
                    ))
                    .await;
                }
            }
        }
    }

    /// Run the listener until error or shutdown
    async fn run_listener(
        config: &SubscriberConfig,
        broadcast_tx: &broadcast::Sender<SubscriberEvent>,
        shutdown_rx: &mut mpsc::Receiver<()>,
        connected_before: &mut bool,
    ) -> SubscriberResult<()> {
        let client = Client::open(config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;

        for channel in ChangeChannel::ALL {
            pubsub.subscribe(channel.name()).await?;
        }

        tracing::info!(url = %redact_url(&config.redis_url), "Change subscriber connected");
        announce_connected(broadcast_tx, std::mem::replace(connected_before, true));

        let mut stream = pubsub.on_message();

        loop {
            tokio::select! {
                msg = stream.next() => {
                    let Some(msg) = msg else {
                        tracing::warn!("Pub/Sub stream ended");
                        return Err(SubscriberError::ChannelClosed);
                    };

                    let channel_name = msg.get_channel_name().to_string();
                    let payload: String = msg.get_payload().unwrap_or_default();

                    let Some(received) = ReceivedChange::from_redis(&channel_name, &payload) else {
                        continue;
                    };
                    if received.is_from(config.ignore_origin.as_deref()) {
                        continue;
                    }

                    tracing::trace!(channel = %channel_name, "Received change notice");

                    // no receivers is fine
                    let _ = broadcast_tx.send(SubscriberEvent::Change(received));
                }

                _ = shutdown_rx.recv() => {
                    return Ok(());
                }
            }
        }
    }

    /// Get a receiver for foreign change notices and resync requests
    #[must_use]
    pub fn receiver(&self) -> broadcast::Receiver<SubscriberEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Stop the background listener
    pub async fn shutdown(&self) -> SubscriberResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| SubscriberError::ChannelClosed)
    }
}

/// Ask receivers to reload everything when a dropped connection comes back
fn announce_connected(broadcast_tx: &broadcast::Sender<SubscriberEvent>, reconnect: bool) {
    if reconnect {
        tracing::info!("Change subscriber reconnected, requesting resync");
        let _ = broadcast_tx.send(SubscriberEvent::Resync);
    }
}

/// Builder for subscriber
#[derive(Debug, Default)]
pub struct SubscriberBuilder {
    config: SubscriberConfig,
}

impl SubscriberBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Redis URL
    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = url.into();
        self
    }

    /// Set broadcast buffer size
    #[must_use]
    pub fn broadcast_buffer(mut self, size: usize) -> Self {
        self.config.broadcast_buffer = size;
        self
    }

    /// Set reconnection delay
    #[must_use]
    pub fn reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.config.reconnect_delay_ms = delay;
        self
    }

    /// Skip notices this instance published itself
    #[must_use]
    pub fn ignore_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.ignore_origin = Some(origin.into());
        self
    }

    /// Start the subscriber
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn build(self) -> ChangeSubscriber {
        ChangeSubscriber::new(self.config)
    }
}
