//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, and handles used by the readiness check.

use std::sync::Arc;

use babywatch_cache::RedisPool;
use babywatch_common::AppConfig;
use babywatch_db::PgPool;
use babywatch_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Set when collections live in PostgreSQL
    pool: Option<PgPool>,
    /// Set when the change bus is enabled
    redis_pool: Option<Arc<RedisPool>>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            pool: None,
            redis_pool: None,
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_redis_pool(mut self, redis_pool: Arc<RedisPool>) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("postgres", &self.pool.is_some())
            .field("redis", &self.redis_pool.is_some())
            .finish_non_exhaustive()
    }
}
