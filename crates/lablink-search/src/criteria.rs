use lablink_core::DayCriterion;

/// Default page number when `pageNum` is absent or falsy.
pub const DEFAULT_PAGE_NUM: u32 = 1;
/// Default page size when `pageLimit` is absent or falsy.
pub const DEFAULT_PAGE_LIMIT: u32 = 5;

/// Pagination window derived from `pageNum`/`pageLimit`.
///
/// Both values are positive; an absent or zero parameter falls back to its
/// default, so `pageNum=0` behaves exactly like no `pageNum` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page_num: u32,
    page_limit: u32,
}

impl PageWindow {
    pub fn new(page_num: Option<u32>, page_limit: Option<u32>) -> Self {
        Self::with_default_limit(page_num, page_limit, DEFAULT_PAGE_LIMIT)
    }

    /// Like [`PageWindow::new`] with a configurable fallback page size.
    /// A zero `default_limit` falls back to [`DEFAULT_PAGE_LIMIT`].
    pub fn with_default_limit(
        page_num: Option<u32>,
        page_limit: Option<u32>,
        default_limit: u32,
    ) -> Self {
        let fallback = if default_limit > 0 {
            default_limit
        } else {
            DEFAULT_PAGE_LIMIT
        };
        Self {
            page_num: page_num.filter(|n| *n > 0).unwrap_or(DEFAULT_PAGE_NUM),
            page_limit: page_limit.filter(|n| *n > 0).unwrap_or(fallback),
        }
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// `(pageNum - 1) * pageLimit`
    pub fn start_index(&self) -> usize {
        (self.page_num as usize - 1) * self.page_limit as usize
    }

    /// `pageNum * pageLimit`
    pub fn end_index(&self) -> usize {
        self.page_num as usize * self.page_limit as usize
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// The recognized filter options for a list request, each independently
/// optional, plus the pagination window.
///
/// An absent option means "do not filter on this"; a present option with an
/// unparseable date still filters (and matches nothing). Callers normalize
/// raw query parameters before building criteria: an empty string counts as
/// absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub patient_name: Option<String>,
    pub activate_date: Option<DayCriterion>,
    pub result_date: Option<DayCriterion>,
    pub patient_id: Option<String>,
    pub page: PageWindow,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_patient_name(mut self, patient_name: impl Into<String>) -> Self {
        self.patient_name = Some(patient_name.into());
        self
    }

    #[must_use]
    pub fn with_activate_date(mut self, raw: &str) -> Self {
        self.activate_date = Some(DayCriterion::parse(raw));
        self
    }

    #[must_use]
    pub fn with_result_date(mut self, raw: &str) -> Self {
        self.result_date = Some(DayCriterion::parse(raw));
        self
    }

    #[must_use]
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: PageWindow) -> Self {
        self.page = page;
        self
    }

    /// True when at least one filter option is present.
    pub fn has_filters(&self) -> bool {
        self.patient_name.is_some()
            || self.activate_date.is_some()
            || self.result_date.is_some()
            || self.patient_id.is_some()
    }
}
