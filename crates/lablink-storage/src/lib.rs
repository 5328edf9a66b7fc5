//! # lablink-storage
//!
//! Storage abstraction layer for the LabLink server.
//!
//! This crate defines the trait and entity types that all storage backends
//! must implement. It does not contain any implementations - those are
//! provided by separate crates.
//!
//! The main trait is [`LabStore`], which covers:
//! - organisation/profile/result lookups (organisation-scoped)
//! - sample registration
//! - assembly of the unfiltered result document for an organisation

mod error;
mod traits;
mod types;

// Re-export everything from submodules
pub use error::StoreError;
pub use traits::LabStore;
pub use types::{LabResult, NewResult, Organisation, Profile};

/// Type alias for a storage result.
pub type StoreResult<T> = Result<T, StoreError>;

/// Type alias for a shared storage trait object.
pub type DynStore = std::sync::Arc<dyn LabStore>;
