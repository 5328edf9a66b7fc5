use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use lablink_core::{ResultDocument, now_utc};
use lablink_storage::{LabResult, LabStore, NewResult, Organisation, Profile, StoreError};

/// In-memory lab-results store using papaya lock-free HashMaps.
///
/// One map per entity kind; all cross-entity lookups resolve through the
/// organisation scope. Pinned guards are block-scoped so they never live
/// across an await point.
#[derive(Debug)]
pub struct InMemoryStore {
    organisations: PapayaHashMap<Uuid, Organisation>,
    profiles: PapayaHashMap<Uuid, Profile>,
    results: PapayaHashMap<Uuid, LabResult>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            organisations: PapayaHashMap::new(),
            profiles: PapayaHashMap::new(),
            results: PapayaHashMap::new(),
        }
    }

    /// Inserts an organisation. Used by bootstrap seeding and tests.
    pub fn insert_organisation(&self, organisation: Organisation) -> Result<(), StoreError> {
        let guard = self.organisations.pin();
        if guard.get(&organisation.organisation_id).is_some() {
            return Err(StoreError::conflict(
                "Organisation",
                organisation.organisation_id.to_string(),
            ));
        }
        guard.insert(organisation.organisation_id, organisation);
        Ok(())
    }

    /// Inserts a profile. The owning organisation must already exist.
    pub fn insert_profile(&self, profile: Profile) -> Result<(), StoreError> {
        {
            let orgs = self.organisations.pin();
            if orgs.get(&profile.organisation_id).is_none() {
                return Err(StoreError::not_found(
                    "Organisation",
                    profile.organisation_id.to_string(),
                ));
            }
        }
        let guard = self.profiles.pin();
        if guard.get(&profile.profile_id).is_some() {
            return Err(StoreError::conflict(
                "Profile",
                profile.profile_id.to_string(),
            ));
        }
        guard.insert(profile.profile_id, profile);
        Ok(())
    }

    /// Inserts a fully-formed result entity. The owning profile must
    /// already exist. Used to seed resulted samples; request-driven
    /// creation goes through [`LabStore::insert_result`].
    pub fn insert_result_entity(&self, result: LabResult) -> Result<(), StoreError> {
        {
            let profiles = self.profiles.pin();
            if profiles.get(&result.profile_id).is_none() {
                return Err(StoreError::not_found(
                    "Profile",
                    result.profile_id.to_string(),
                ));
            }
        }
        let guard = self.results.pin();
        if guard.get(&result.result_id).is_some() {
            return Err(StoreError::conflict(
                "Result",
                result.result_id.to_string(),
            ));
        }
        guard.insert(result.result_id, result);
        Ok(())
    }

    pub fn organisation_count(&self) -> usize {
        self.organisations.pin().len()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.pin().len()
    }

    pub fn result_count(&self) -> usize {
        self.results.pin().len()
    }

    fn profile_in_organisation(&self, organisation_id: Uuid, profile_id: Uuid) -> Option<Profile> {
        let guard = self.profiles.pin();
        guard
            .get(&profile_id)
            .filter(|p| p.organisation_id == organisation_id)
            .cloned()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn result_order(a: &LabResult, b: &LabResult) -> std::cmp::Ordering {
    a.activate_time
        .cmp(&b.activate_time)
        .then(a.result_id.cmp(&b.result_id))
}

#[async_trait]
impl LabStore for InMemoryStore {
    async fn find_organisation(
        &self,
        organisation_id: Uuid,
    ) -> Result<Option<Organisation>, StoreError> {
        let guard = self.organisations.pin();
        Ok(guard.get(&organisation_id).cloned())
    }

    async fn find_profile(
        &self,
        organisation_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<Profile>, StoreError> {
        Ok(self.profile_in_organisation(organisation_id, profile_id))
    }

    async fn find_result(
        &self,
        organisation_id: Uuid,
        profile_id: Uuid,
        sample_id: &str,
    ) -> Result<Option<LabResult>, StoreError> {
        if self
            .profile_in_organisation(organisation_id, profile_id)
            .is_none()
        {
            return Ok(None);
        }
        let guard = self.results.pin();
        let mut matches: Vec<&LabResult> = guard
            .iter()
            .filter(|(_, r)| r.profile_id == profile_id && r.sample_id == sample_id)
            .map(|(_, r)| r)
            .collect();
        matches.sort_by(|a, b| result_order(a, b));
        Ok(matches.first().map(|r| (*r).clone()))
    }

    async fn insert_result(
        &self,
        profile: &Profile,
        new_result: NewResult,
    ) -> Result<LabResult, StoreError> {
        if new_result.sample_id.trim().is_empty() {
            return Err(StoreError::invalid_entity("sampleId must not be empty"));
        }
        if new_result.result_type.trim().is_empty() {
            return Err(StoreError::invalid_entity("resultType must not be empty"));
        }
        let result = LabResult::new(
            Uuid::new_v4(),
            new_result.sample_id,
            new_result.result_type,
            now_utc(),
            profile.profile_id,
        );
        let guard = self.results.pin();
        guard.insert(result.result_id, result.clone());
        Ok(result)
    }

    async fn search_results(&self, organisation_id: Uuid) -> Result<ResultDocument, StoreError> {
        let (mut results, profiles) = {
            let profile_guard = self.profiles.pin();
            let profiles: HashMap<Uuid, Profile> = profile_guard
                .iter()
                .filter(|(_, p)| p.organisation_id == organisation_id)
                .map(|(id, p)| (*id, p.clone()))
                .collect();
            let result_guard = self.results.pin();
            let results: Vec<LabResult> = result_guard
                .iter()
                .filter(|(_, r)| profiles.contains_key(&r.profile_id))
                .map(|(_, r)| r.clone())
                .collect();
            (results, profiles)
        };
        results.sort_by(result_order);

        let mut data = Vec::with_capacity(results.len());
        let mut included = Vec::new();
        let mut seen = HashSet::new();
        for result in &results {
            data.push(result.to_linked_record());
            if seen.insert(result.profile_id) {
                if let Some(profile) = profiles.get(&result.profile_id) {
                    included.push(profile.to_record());
                }
            }
        }
        Ok(ResultDocument::new(data, included))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "in-memory-papaya"
    }
}
