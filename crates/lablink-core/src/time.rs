use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const SLASH_DATE: &[BorrowedFormatItem<'_>] = format_description!("[month]/[day]/[year]");

/// Timestamp attached to a lab result (`activateTime` / `resultTime`).
///
/// Parses from RFC 3339 or from a bare `YYYY-MM-DD` date (midnight UTC);
/// always serializes as RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabDateTime(pub OffsetDateTime);

impl LabDateTime {
    pub fn new(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }

    pub fn inner(&self) -> &OffsetDateTime {
        &self.0
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// The calendar day exactly as written, without offset conversion.
    ///
    /// Day-granularity filtering compares this value: `2024-01-15T23:59:00-05:00`
    /// is day `2024-01-15` even though it falls on the 16th in UTC.
    pub fn calendar_day(&self) -> Date {
        self.0.date()
    }

    pub fn timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl fmt::Display for LabDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for LabDateTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(datetime) =
            OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
        {
            return Ok(LabDateTime(datetime));
        }
        let date = Date::parse(s, ISO_DATE).map_err(|e| {
            CoreError::invalid_timestamp(format!("Failed to parse timestamp '{s}': {e}"))
        })?;
        Ok(LabDateTime(date.midnight().assume_utc()))
    }
}

impl Serialize for LabDateTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for LabDateTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LabDateTime::from_str(&s).map_err(serde::de::Error::custom)
    }
}

pub fn now_utc() -> LabDateTime {
    LabDateTime(OffsetDateTime::now_utc())
}

/// Day-granularity match value parsed from a date criterion string.
///
/// Accepts `MM/DD/YYYY` or ISO `YYYY-MM-DD`. Anything else becomes
/// `Invalid`, a criterion that never matches: a garbled date narrows the
/// result to nothing instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCriterion {
    Day(Date),
    Invalid,
}

impl DayCriterion {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Ok(date) = Date::parse(trimmed, SLASH_DATE) {
            return Self::Day(date);
        }
        if let Ok(date) = Date::parse(trimmed, ISO_DATE) {
            return Self::Day(date);
        }
        Self::Invalid
    }

    /// True when the timestamp falls on the criterion's calendar day.
    pub fn matches(&self, timestamp: &LabDateTime) -> bool {
        match self {
            Self::Day(day) => *day == timestamp.calendar_day(),
            Self::Invalid => false,
        }
    }

    /// Absent timestamps never match a day criterion.
    pub fn matches_opt(&self, timestamp: Option<&LabDateTime>) -> bool {
        timestamp.is_some_and(|ts| self.matches(ts))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}
