//! Stored entity types shared by all storage backends.

use lablink_core::{LabDateTime, ProfileRecord, ResultAttributes, ResultRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant. Profiles and results are only reachable through their
/// owning organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organisation {
    pub organisation_id: Uuid,
    pub name: String,
}

impl Organisation {
    pub fn new(organisation_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            organisation_id,
            name: name.into(),
        }
    }
}

/// A patient profile, scoped to one organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_id: Uuid,
    pub organisation_id: Uuid,
    pub name: String,
}

impl Profile {
    pub fn new(profile_id: Uuid, organisation_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            profile_id,
            organisation_id,
            name: name.into(),
        }
    }

    /// Wire-form `included` entry for this profile.
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord::new(self.profile_id.to_string(), self.name.clone())
    }
}

/// A stored lab result. `result` and `result_time` stay unset until the
/// sample has been processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub result_id: Uuid,
    pub sample_id: String,
    pub result_type: String,
    pub result: Option<String>,
    pub activate_time: LabDateTime,
    pub result_time: Option<LabDateTime>,
    pub profile_id: Uuid,
}

impl LabResult {
    pub fn new(
        result_id: Uuid,
        sample_id: impl Into<String>,
        result_type: impl Into<String>,
        activate_time: LabDateTime,
        profile_id: Uuid,
    ) -> Self {
        Self {
            result_id,
            sample_id: sample_id.into(),
            result_type: result_type.into(),
            result: None,
            activate_time,
            result_time: None,
            profile_id,
        }
    }

    /// Attach a processed result value and its timestamp.
    #[must_use]
    pub fn with_result(mut self, result: impl Into<String>, result_time: LabDateTime) -> Self {
        self.result = Some(result.into());
        self.result_time = Some(result_time);
        self
    }

    /// Wire-form record without the relationship block, as used by
    /// single-record responses.
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord::new(
            self.result_id.to_string(),
            ResultAttributes {
                sample_id: self.sample_id.clone(),
                result_type: self.result_type.clone(),
                activate_time: self.activate_time.clone(),
                result_time: self.result_time.clone(),
                result: self.result.clone(),
            },
        )
    }

    /// Wire-form record with the profile relationship, as used in list
    /// documents.
    pub fn to_linked_record(&self) -> ResultRecord {
        self.to_record().with_profile(self.profile_id.to_string())
    }
}

/// Payload for registering a new sample against a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResult {
    pub sample_id: String,
    pub result_type: String,
}

impl NewResult {
    pub fn new(sample_id: impl Into<String>, result_type: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            result_type: result_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_result() -> LabResult {
        LabResult::new(
            Uuid::nil(),
            "s-100",
            "blood",
            LabDateTime::from_str("2024-01-15T08:30:00Z").unwrap(),
            Uuid::max(),
        )
    }

    #[test]
    fn test_lab_result_to_record() {
        let record = sample_result().to_record();
        assert_eq!(record.id, Uuid::nil().to_string());
        assert_eq!(record.kind, "sample");
        assert_eq!(record.attributes.sample_id, "s-100");
        assert!(record.attributes.result.is_none());
        assert!(record.relationships.is_none());
    }

    #[test]
    fn test_lab_result_to_linked_record() {
        let record = sample_result().to_linked_record();
        assert_eq!(record.profile_id(), Some(Uuid::max().to_string().as_str()));
    }

    #[test]
    fn test_with_result_sets_both_fields() {
        let resulted = sample_result().with_result(
            "negative",
            LabDateTime::from_str("2024-01-16T10:00:00Z").unwrap(),
        );
        assert_eq!(resulted.result.as_deref(), Some("negative"));
        assert!(resulted.result_time.is_some());
        let record = resulted.to_record();
        assert_eq!(record.attributes.result.as_deref(), Some("negative"));
    }

    #[test]
    fn test_profile_to_record() {
        let profile = Profile::new(Uuid::nil(), Uuid::max(), "Alice");
        let record = profile.to_record();
        assert_eq!(record.id, Uuid::nil().to_string());
        assert_eq!(record.name(), "Alice");
    }

    #[test]
    fn test_entity_serde_roundtrip() {
        let result = sample_result().with_result(
            "positive",
            LabDateTime::from_str("2024-01-16T10:00:00Z").unwrap(),
        );
        let json = serde_json::to_string(&result).unwrap();
        let back: LabResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
