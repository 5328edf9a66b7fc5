pub mod document;
pub mod error;
pub mod time;

pub use document::{
    DocumentMeta, PROFILE_TYPE, ProfileAttributes, ProfileLink, ProfileRecord,
    ProfileRelationship, Relationships, ResultAttributes, ResultDocument, ResultRecord,
    SAMPLE_TYPE, SingleResultDocument,
};
pub use error::{CoreError, Result};
pub use time::{DayCriterion, LabDateTime, now_utc};
