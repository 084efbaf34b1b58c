//! # babywatch-db
//!
//! Storage layer implementing the repository traits from `babywatch-core`.
//!
//! ## Overview
//!
//! Two backends are provided:
//!
//! - [`MemoryStore`]: process memory, used for local runs and tests
//! - PostgreSQL via SQLx: `PgNameRepository`, `PgVoteRepository` and
//!   `PgPredictionRepository` over a shared pool, with `PgSessionRepository`
//!   for sign-in sessions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use babywatch_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use babywatch_db::repositories::PgNameRepository;
//! use babywatch_core::traits::NameRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!
//!     let names = PgNameRepository::new(pool);
//!     let all = names.list().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgNameRepository, PgPredictionRepository, PgSessionRepository, PgVoteRepository,
};
