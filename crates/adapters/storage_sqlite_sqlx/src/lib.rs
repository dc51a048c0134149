//! # growbox-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `growbox-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Classify `SQLite` busy/locked failures as retryable contention
//!
//! ## Dependency rule
//! Depends on `growbox-app` (for port traits) and `growbox-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod control_repo;
pub mod error;
pub mod pool;
pub mod sensor_reading_repo;

pub use control_repo::SqliteControlRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use sensor_reading_repo::SqliteSensorReadingRepository;
