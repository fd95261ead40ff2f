//! Atlas Core - Domain entities, services, and traits.
//!
//! This crate contains the refresh-and-derive pipeline: reconciling upstream
//! country observations with a rate table, orchestrating a refresh, and
//! rendering the summary image. It is database-agnostic and defines traits
//! that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod countries;
pub mod errors;
pub mod summary;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
