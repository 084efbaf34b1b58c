//! In-memory storage backend
//!
//! Keeps all three collections in process memory. Nothing survives a
//! restart; used for local runs and for tests.

mod store;

pub use store::MemoryStore;
