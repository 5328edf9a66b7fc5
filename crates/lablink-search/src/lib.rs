//! # lablink-search
//!
//! Post-fetch narrowing of lab-result documents: the filter pipeline and
//! the paginator.
//!
//! The entry point is [`apply`]: it runs the four filter stages in their
//! fixed order (patient name, activation date, result date, patient id),
//! records the matched total in `meta`, and slices both collections by the
//! pagination window. Everything here is synchronous and free of I/O; the
//! document comes in assembled and goes out narrowed.

mod criteria;
mod filter;
mod page;

pub use criteria::{DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_NUM, PageWindow, SearchCriteria};
pub use filter::{
    Filtered, apply_filters, filter_by_activate_date, filter_by_patient_id,
    filter_by_patient_name, filter_by_result_date,
};
pub use page::paginate;

use lablink_core::ResultDocument;

/// Filters the document by the criteria, attaches the matched total, and
/// paginates. The returned document is the final list-response body.
pub fn apply(document: ResultDocument, criteria: &SearchCriteria) -> ResultDocument {
    let Filtered { document, total } = apply_filters(document, criteria);
    paginate(document.with_total(total), &criteria.page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_document() -> ResultDocument {
        serde_json::from_value(json!({
            "data": [
                {
                    "id": "r1",
                    "type": "sample",
                    "attributes": {
                        "sampleId": "s-1",
                        "resultType": "swab",
                        "activateTime": "2024-02-01"
                    },
                    "relationships": { "profile": { "data": { "id": "pA" } } }
                },
                {
                    "id": "r2",
                    "type": "sample",
                    "attributes": {
                        "sampleId": "s-2",
                        "resultType": "swab",
                        "activateTime": "2024-02-02"
                    },
                    "relationships": { "profile": { "data": { "id": "pB" } } }
                }
            ],
            "included": [
                { "id": "pA", "type": "profile", "attributes": { "name": "Alice" } },
                { "id": "pB", "type": "profile", "attributes": { "name": "Bob" } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_end_to_end_activate_date_scenario() {
        let criteria = SearchCriteria::new().with_activate_date("02/01/2024");
        let result = apply(scenario_document(), &criteria);

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id, "r1");
        assert_eq!(result.included.len(), 1);
        assert_eq!(result.included[0].id, "pA");
        assert_eq!(result.meta.unwrap().total, 1);
    }

    #[test]
    fn test_no_criteria_pagination_slices_in_order() {
        let criteria = SearchCriteria::new().with_page(PageWindow::new(Some(1), Some(1)));
        let result = apply(scenario_document(), &criteria);

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id, "r1");
        assert_eq!(result.included.len(), 1);
        assert_eq!(result.included[0].id, "pA");
        // Total reflects the unfiltered match count, not the page size.
        assert_eq!(result.meta.unwrap().total, 2);
    }

    #[test]
    fn test_total_survives_out_of_range_page() {
        let criteria = SearchCriteria::new().with_page(PageWindow::new(Some(9), Some(5)));
        let result = apply(scenario_document(), &criteria);
        assert!(result.data.is_empty());
        assert!(result.included.is_empty());
        assert_eq!(result.meta.unwrap().total, 2);
    }

    #[test]
    fn test_filters_compose_with_pagination() {
        let criteria = SearchCriteria::new()
            .with_patient_name("Bob")
            .with_page(PageWindow::new(Some(1), Some(5)));
        let result = apply(scenario_document(), &criteria);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id, "r2");
        assert_eq!(result.included.len(), 1);
        assert_eq!(result.included[0].id, "pB");
        assert_eq!(result.meta.unwrap().total, 1);
    }
}
