//! # lablink-db-memory
//!
//! In-memory storage backend for the LabLink server. Implements
//! [`LabStore`](lablink_storage::LabStore) from `lablink-storage` using
//! papaya lock-free HashMaps for concurrent access.
//!
//! Intended for development, testing and demo deployments; nothing is
//! persisted across restarts.

mod store;

pub use store::InMemoryStore;
