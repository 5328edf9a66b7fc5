//! Pagination over a (possibly filtered) result document.

use crate::criteria::PageWindow;
use lablink_core::ResultDocument;

/// Slices `data` and `included` independently by the same numeric window.
///
/// The window is `[start_index, end_index)` regardless of the lengths of
/// the two collections or any relationship between them; no attempt is made
/// to align included profiles with the paged data records. Out-of-range
/// pages yield empty collections, not an error. `meta` passes through
/// untouched.
pub fn paginate(mut document: ResultDocument, page: &PageWindow) -> ResultDocument {
    document.data = slice_window(document.data, page);
    document.included = slice_window(document.included, page);
    document
}

fn slice_window<T>(items: Vec<T>, page: &PageWindow) -> Vec<T> {
    let start = page.start_index().min(items.len());
    let end = page.end_index().min(items.len());
    items.into_iter().skip(start).take(end - start).collect()
}
