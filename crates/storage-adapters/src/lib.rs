//! # storage-adapters
//!
//! Implementations of the persistence ports. The in-memory adapter is
//! always compiled and backs the test suites; the Postgres adapter lives
//! behind the `db-postgres` feature.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::{InMemoryBlogRepo, InMemoryUserRepo};
