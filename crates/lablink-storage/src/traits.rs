//! Storage traits for the lab-results storage abstraction layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{LabResult, NewResult, Organisation, Profile};
use lablink_core::ResultDocument;

/// The storage trait every backend must implement.
///
/// All lookups are organisation-scoped: an entity that exists but belongs
/// to a different organisation behaves exactly like one that does not
/// exist. Implementations must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use lablink_storage::{LabStore, StoreError, Profile};
///
/// async fn require_profile(
///     store: &dyn LabStore,
///     org: Uuid,
///     profile_id: Uuid,
/// ) -> Result<Profile, StoreError> {
///     store
///         .find_profile(org, profile_id)
///         .await?
///         .ok_or_else(|| StoreError::not_found("Profile", profile_id.to_string()))
/// }
/// ```
#[async_trait]
pub trait LabStore: Send + Sync {
    /// Looks up an organisation by id.
    ///
    /// Returns `None` if the organisation does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures, not for missing entities.
    async fn find_organisation(
        &self,
        organisation_id: Uuid,
    ) -> Result<Option<Organisation>, StoreError>;

    /// Looks up a profile inside an organisation.
    ///
    /// Returns `None` if the profile does not exist or belongs to another
    /// organisation.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn find_profile(
        &self,
        organisation_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<Profile>, StoreError>;

    /// Looks up a result by sample id, through its profile and organisation.
    ///
    /// Join semantics: the result must belong to the profile and the
    /// profile to the organisation, otherwise `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn find_result(
        &self,
        organisation_id: Uuid,
        profile_id: Uuid,
        sample_id: &str,
    ) -> Result<Option<LabResult>, StoreError>;

    /// Registers a new sample against a profile.
    ///
    /// The backend generates the result id and stamps `activate_time`;
    /// `result`/`result_time` start unset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidEntity` if the payload is rejected.
    async fn insert_result(
        &self,
        profile: &Profile,
        new_result: NewResult,
    ) -> Result<LabResult, StoreError>;

    /// Assembles the unfiltered result document for an organisation.
    ///
    /// `data` holds the organisation's results ordered by activation time
    /// (ties broken by id); `included` holds the referenced profiles in
    /// order of first reference. An unknown organisation yields an empty
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn search_results(&self, organisation_id: Uuid) -> Result<ResultDocument, StoreError>;

    /// Cheap backend liveness probe, used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that LabStore is object-safe
    fn _assert_store_object_safe(_: &dyn LabStore) {}
}
