//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use babywatch_cache::{ChangePublisher, RedisPool, SubscriberBuilder};
use babywatch_common::{AppConfig, AppError, JwtService, PasscodeGate, StorageBackend};
use babywatch_core::PredictionFields;
use babywatch_db::{
    create_pool, run_migrations, MemoryStore, PgNameRepository, PgPredictionRepository,
    PgSessionRepository, PgVoteRepository,
};
use babywatch_service::{LiveHub, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    // health checks bypass rate limiting
    Router::new()
        .merge(health_routes())
        .merge(api)
        .with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    if config.event.passcode_hash.is_none() {
        warn!("EVENT_PASSCODE_HASH not set; anyone can sign in");
    }

    let origin = Uuid::new_v4().to_string();

    // Change bus
    let redis_pool = match &config.redis {
        Some(redis) => {
            info!("Enabling Redis change bus...");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            Some(Arc::new(pool))
        }
        None => None,
    };
    let publisher = redis_pool
        .as_deref()
        .map(|pool| ChangePublisher::new(pool.clone(), origin.clone()));

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .passcode_gate(PasscodeGate::new(config.event.passcode_hash.clone()))
        .publisher(publisher)
        .prediction_defaults(PredictionFields::with_delivery_date(
            config.event.default_delivery_date,
        ));

    // Storage
    let (builder, pool) = match (config.storage.backend, &config.storage.database) {
        (StorageBackend::Postgres, Some(database)) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&babywatch_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool, &database.migrations_dir)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            let builder = builder
                .name_repo(Arc::new(PgNameRepository::new(pool.clone())))
                .vote_repo(Arc::new(PgVoteRepository::new(pool.clone())))
                .prediction_repo(Arc::new(PgPredictionRepository::new(pool.clone())))
                .session_repo(Arc::new(PgSessionRepository::new(pool.clone())));
            (builder, Some(pool))
        }
        (StorageBackend::Postgres, None) => {
            return Err(AppError::Config(
                "postgres storage requires DATABASE_URL".to_string(),
            ));
        }
        (StorageBackend::Memory, _) => {
            info!("Using in-memory storage; data is lost on restart");
            (builder.store(Arc::new(MemoryStore::new())), None)
        }
    };

    // Build service context
    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;
    service_context.hub().refresh_all().await;

    if let Some(redis) = &config.redis {
        spawn_change_listener(Arc::clone(service_context.hub()), &redis.url, origin);
    }

    let mut state = AppState::new(service_context, config);
    if let Some(pool) = pool {
        state = state.with_pool(pool);
    }
    if let Some(redis_pool) = redis_pool {
        state = state.with_redis_pool(redis_pool);
    }

    Ok(state)
}

/// Refresh local snapshots whenever another instance announces a write
fn spawn_change_listener(hub: Arc<LiveHub>, redis_url: &str, origin: String) {
    let subscriber = SubscriberBuilder::new()
        .redis_url(redis_url)
        .ignore_origin(origin)
        .build();
    let mut changes = subscriber.receiver();

    tokio::spawn(async move {
        // keeps the listener alive for as long as this task runs
        let _subscriber = subscriber;

        loop {
            match changes.recv().await {
                Ok(event) => hub.apply_remote(&event).await,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Change listener lagged; reloading everything");
                    hub.refresh_all().await;
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve_with_shutdown(listener, app, shutdown_signal()).await
}

/// Serve on an already-bound listener until the process is dropped
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    serve_with_shutdown(listener, app, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then let in-flight requests finish
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
