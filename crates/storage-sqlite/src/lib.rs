//! SQLite storage implementation for Atlas.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `atlas-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The country repository (upsert by case-insensitive name, listing, status)
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod countries;
pub mod db;
pub mod errors;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from atlas-core for convenience
pub use atlas_core::errors::{DatabaseError, Error, Result};
