//! Search & Pagination
//!
//! Client-side filtering by project name and presentational paging over the
//! already-fetched rows.

use crate::error::{LicenseError, Result};
use crate::model::{LicenseItem, ProjectOption};

/// Rows per page when nothing else is configured
pub const DEFAULT_PER_PAGE: usize = 10;

/// Case-insensitive substring match after trimming the query.
/// An empty query matches everything.
pub fn matches_query(name: &str, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || name.to_lowercase().contains(&needle)
}

/// Filter license rows by project name
pub fn filter_licenses<'a>(items: &'a [LicenseItem], query: &str) -> Vec<&'a LicenseItem> {
    items
        .iter()
        .filter(|item| matches_query(&item.project_name, query))
        .collect()
}

/// Filter the project selector by display name
pub fn filter_projects<'a>(options: &'a [ProjectOption], query: &str) -> Vec<&'a ProjectOption> {
    options
        .iter()
        .filter(|option| matches_query(&option.name, query))
        .collect()
}

/// Current page window (1-based page number)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    cur_page: usize,
    per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            cur_page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(cur_page: usize, per_page: usize) -> Result<Self> {
        if per_page == 0 {
            return Err(LicenseError::InvalidPageSize(per_page));
        }
        Ok(Self {
            cur_page: cur_page.max(1),
            per_page,
        })
    }

    pub fn cur_page(&self) -> usize {
        self.cur_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Jump to a page. Page numbers below 1 become 1; pages past the end are
    /// kept and simply render no rows.
    pub fn set_page(&mut self, page: usize) {
        self.cur_page = page.max(1);
    }

    pub fn set_per_page(&mut self, per_page: usize) -> Result<()> {
        if per_page == 0 {
            return Err(LicenseError::InvalidPageSize(per_page));
        }
        self.per_page = per_page;
        Ok(())
    }

    /// Number of pages needed for `total` rows (at least one)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    pub fn next(&mut self, total: usize) {
        if self.cur_page < self.page_count(total) {
            self.cur_page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.cur_page > 1 {
            self.cur_page -= 1;
        }
    }

    /// Rows visible on the current page
    pub fn window<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.cur_page - 1).saturating_mul(self.per_page);
        if start >= rows.len() {
            return &[];
        }
        let end = start.saturating_add(self.per_page).min(rows.len());
        &rows[start..end]
    }
}
