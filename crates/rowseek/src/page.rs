//! Pagination: slicing results into pages and summarizing page position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// The requested page: a zero-based index and a page size.
///
/// Both are signed so that values coming from a UI can be represented as-is.
/// A negative page is read as the first page; a page size below one is
/// rejected with [`QueryError::InvalidPageSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    /// Zero-based page index.
    pub page: i64,
    /// Rows per page.
    pub page_size: i64,
}

impl PageSpec {
    /// Creates a page spec.
    pub fn new(page: i64, page_size: i64) -> Self {
        PageSpec { page, page_size }
    }

    /// The first page of the given size.
    pub fn first(page_size: i64) -> Self {
        PageSpec::new(0, page_size)
    }

    /// Checks that the page size is positive.
    pub fn validate(&self) -> Result<()> {
        checked_page_size(self.page_size).map(|_| ())
    }

    /// Slices `rows` to this page.
    pub fn apply<'r, T>(&self, rows: &'r [T]) -> Result<&'r [T]> {
        paginate(rows, self.page, self.page_size)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::first(DEFAULT_PAGE_SIZE)
    }
}

/// Returns the rows of page `page`, `page_size` rows per page.
///
/// The page covers `[page * page_size, page * page_size + page_size)`,
/// clamped to `rows`. A page past the end is empty rather than an error.
///
/// ```
/// use rowseek::paginate;
///
/// let rows = [1, 2, 3, 4, 5];
/// assert_eq!(paginate(&rows, 0, 2).unwrap(), &[1, 2]);
/// assert_eq!(paginate(&rows, 2, 2).unwrap(), &[5]);
/// assert!(paginate(&rows, 3, 2).unwrap().is_empty());
/// assert!(paginate(&rows, 0, 0).is_err());
/// ```
pub fn paginate<T>(rows: &[T], page: i64, page_size: i64) -> Result<&[T]> {
    let size = checked_page_size(page_size)?;
    let Some(start) = page_index(page).checked_mul(size) else {
        return Ok(&[]);
    };
    if start >= rows.len() {
        return Ok(&[]);
    }
    let end = start.saturating_add(size).min(rows.len());
    Ok(&rows[start..end])
}

fn checked_page_size(page_size: i64) -> Result<usize> {
    if page_size <= 0 {
        return Err(QueryError::InvalidPageSpec { page_size });
    }
    Ok(usize::try_from(page_size).unwrap_or(usize::MAX))
}

fn page_index(page: i64) -> usize {
    usize::try_from(page.max(0)).unwrap_or(usize::MAX)
}

/// Where a page sits within the full result, for pagination controls.
///
/// ```
/// use rowseek::PageInfo;
///
/// let info = PageInfo::new(1, 10, 25).unwrap();
/// assert_eq!(info.total_pages, 3);
/// assert_eq!(info.to_string(), "11-20 of 25");
/// assert!(!info.is_first() && !info.is_last());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Zero-based page index (negative requests clamped to 0).
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Rows matching before pagination.
    pub total: usize,
    /// Number of pages; at least 1 even when nothing matched.
    pub total_pages: usize,
    /// One-based position of the first row on the page; 0 when nothing matched.
    pub start_item: usize,
    /// One-based position of the last row on the page.
    pub end_item: usize,
}

impl PageInfo {
    /// Computes the page summary for `total` matching rows.
    pub fn new(page: i64, page_size: i64, total: usize) -> Result<Self> {
        let size = checked_page_size(page_size)?;
        let page = page_index(page);
        let offset = page.saturating_mul(size);

        Ok(PageInfo {
            page,
            page_size: size,
            total,
            total_pages: total.div_ceil(size).max(1),
            start_item: if total == 0 { 0 } else { offset.saturating_add(1) },
            end_item: total.min(offset.saturating_add(size)),
        })
    }

    /// Returns `true` on the first page.
    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Returns `true` on the last page, or past it.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages - 1
    }

    /// Index of the previous page, staying at 0 on the first page.
    pub fn prev_page(&self) -> usize {
        self.page.saturating_sub(1)
    }

    /// Index of the next page, staying on the last page.
    pub fn next_page(&self) -> usize {
        self.page.saturating_add(1).min(self.total_pages - 1)
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} of {}", self.start_item, self.end_item, self.total)
    }
}
