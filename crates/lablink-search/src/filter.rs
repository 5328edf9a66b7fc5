//! The filter pipeline: four order-sensitive stages that narrow `data` and
//! `included` together.
//!
//! Each stage is a pure function `(document, criterion) -> document`;
//! [`apply_filters`] composes the present stages in their fixed order —
//! patient name, activation date, result date, patient id. The stages are
//! not commutative: the date stages rebuild `included` from the `data`
//! surviving the previous stages, not from the original document. No stage
//! reports an error; zero matches is a valid, silent outcome.

use std::collections::HashSet;

use crate::criteria::SearchCriteria;
use lablink_core::{DayCriterion, ResultDocument};

/// Outcome of the filter pipeline: the narrowed document plus the matched
/// (pre-pagination) count of `data` records.
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    pub document: ResultDocument,
    pub total: usize,
}

/// Applies every present criterion in the fixed stage order and reports the
/// matched total.
pub fn apply_filters(document: ResultDocument, criteria: &SearchCriteria) -> Filtered {
    let mut document = document;
    if let Some(patient_name) = &criteria.patient_name {
        document = filter_by_patient_name(document, patient_name);
    }
    if let Some(day) = &criteria.activate_date {
        document = filter_by_activate_date(document, day);
    }
    if let Some(day) = &criteria.result_date {
        document = filter_by_result_date(document, day);
    }
    if let Some(patient_id) = &criteria.patient_id {
        document = filter_by_patient_id(document, patient_id);
    }
    let total = document.data.len();
    Filtered { document, total }
}

/// Keeps the profiles whose name equals `patient_name`, then keeps only the
/// data records referencing the *first* surviving profile.
///
/// When several profiles share the name, only the first occurrence is
/// honored; the later ones stay in `included` but contribute no data
/// records. This first-match behavior is the documented contract. No name
/// match empties both collections.
pub fn filter_by_patient_name(mut document: ResultDocument, patient_name: &str) -> ResultDocument {
    document.included.retain(|p| p.name() == patient_name);
    let first_id = document.included.first().map(|p| p.id.clone());
    document.data.retain(|record| {
        matches!((&first_id, record.profile_id()), (Some(id), Some(linked)) if linked == id)
    });
    document
}

/// Keeps the data records whose `activateTime` falls on the criterion day,
/// then narrows `included` to the profiles they reference.
pub fn filter_by_activate_date(mut document: ResultDocument, day: &DayCriterion) -> ResultDocument {
    document
        .data
        .retain(|record| day.matches(&record.attributes.activate_time));
    narrow_included_to_data(&mut document);
    document
}

/// Keeps the data records whose `resultTime` falls on the criterion day,
/// then narrows `included` to the profiles they reference. A record that
/// has not been resulted yet never matches.
pub fn filter_by_result_date(mut document: ResultDocument, day: &DayCriterion) -> ResultDocument {
    document
        .data
        .retain(|record| day.matches_opt(record.attributes.result_time.as_ref()));
    narrow_included_to_data(&mut document);
    document
}

/// Keeps the profile whose id equals `patient_id` and the data records
/// referencing it.
pub fn filter_by_patient_id(mut document: ResultDocument, patient_id: &str) -> ResultDocument {
    document.included.retain(|p| p.id == patient_id);
    document
        .data
        .retain(|record| record.profile_id() == Some(patient_id));
    document
}

/// Narrows `included` to the set of profile ids referenced by the surviving
/// `data` records, in one pass. Empty `data` empties `included`.
fn narrow_included_to_data(document: &mut ResultDocument) {
    if document.data.is_empty() {
        document.included.clear();
        return;
    }
    let referenced: HashSet<&str> = document
        .data
        .iter()
        .filter_map(|record| record.profile_id())
        .collect();
    document
        .included
        .retain(|profile| referenced.contains(profile.id.as_str()));
}
