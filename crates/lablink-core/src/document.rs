//! JSON:API-style wire shapes for lab-result documents.
//!
//! A list response is a [`ResultDocument`]: a primary `data` collection of
//! [`ResultRecord`]s plus a side-loaded `included` collection of
//! [`ProfileRecord`]s, cross-referenced through
//! `relationships.profile.data.id` rather than nesting. Single-record
//! responses reuse [`ResultRecord`] inside a [`SingleResultDocument`] and
//! omit the relationship block.

use crate::time::LabDateTime;
use serde::{Deserialize, Serialize};

/// Type tag carried by every result record.
pub const SAMPLE_TYPE: &str = "sample";
/// Type tag carried by every profile record.
pub const PROFILE_TYPE: &str = "profile";

fn sample_type() -> String {
    SAMPLE_TYPE.to_string()
}

fn profile_type() -> String {
    PROFILE_TYPE.to_string()
}

/// Attribute block of a result record.
///
/// `result_time` and `result` stay absent until the sample has been
/// resulted; absent attributes are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultAttributes {
    #[serde(rename = "sampleId")]
    pub sample_id: String,
    #[serde(rename = "resultType")]
    pub result_type: String,
    #[serde(rename = "activateTime")]
    pub activate_time: LabDateTime,
    #[serde(rename = "resultTime", default, skip_serializing_if = "Option::is_none")]
    pub result_time: Option<LabDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// `relationships.profile.data` — the weak link from a result to its
/// profile. A lookup key into `included`, not an ownership pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub id: String,
    #[serde(rename = "type", default = "profile_type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRelationship {
    pub data: ProfileLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    pub profile: ProfileRelationship,
}

/// A single lab-result entry in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    #[serde(rename = "type", default = "sample_type")]
    pub kind: String,
    pub attributes: ResultAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

impl ResultRecord {
    pub fn new(id: impl Into<String>, attributes: ResultAttributes) -> Self {
        Self {
            id: id.into(),
            kind: sample_type(),
            attributes,
            relationships: None,
        }
    }

    /// Attach the profile relationship block (list documents carry it,
    /// single-record responses do not).
    #[must_use]
    pub fn with_profile(mut self, profile_id: impl Into<String>) -> Self {
        self.relationships = Some(Relationships {
            profile: ProfileRelationship {
                data: ProfileLink {
                    id: profile_id.into(),
                    kind: profile_type(),
                },
            },
        });
        self
    }

    /// Id of the referenced profile, when the relationship block is present.
    pub fn profile_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .map(|r| r.profile.data.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAttributes {
    pub name: String,
}

/// A patient profile entry in `included`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(rename = "type", default = "profile_type")]
    pub kind: String,
    pub attributes: ProfileAttributes,
}

impl ProfileRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: profile_type(),
            attributes: ProfileAttributes { name: name.into() },
        }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Non-attribute payload on a list document. `total` is the matched
/// (pre-pagination) count of `data` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub total: usize,
}

/// A full list response: ordered `data` and `included` collections.
///
/// Constructed fresh per request, narrowed by the filter pipeline, sliced
/// by the paginator, then discarded once the response is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub data: Vec<ResultRecord>,
    pub included: Vec<ProfileRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
}

impl ResultDocument {
    pub fn new(data: Vec<ResultRecord>, included: Vec<ProfileRecord>) -> Self {
        Self {
            data,
            included,
            meta: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    #[must_use]
    pub fn with_total(mut self, total: usize) -> Self {
        self.meta = Some(DocumentMeta { total });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.included.is_empty()
    }
}

/// Envelope for single-record responses (lookup and creation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResultDocument {
    pub data: ResultRecord,
}

impl SingleResultDocument {
    pub fn new(data: ResultRecord) -> Self {
        Self { data }
    }
}
