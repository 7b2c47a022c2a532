//! The query pipeline and the table's query state.
//!
//! [`query`] composes the four stages in a fixed order:
//!
//! ```text
//! field filter → search → sort → total → paginate
//! ```
//!
//! The order is part of the contract: sorting happens on the filtered set and
//! before slicing, so a page always holds the first rows of the sorted
//! matches, and `total` counts every match rather than just the page.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::filter::FieldFilter;
use crate::ordering::SortSpec;
use crate::page::{PageInfo, PageSpec};
use crate::row::Row;
use crate::search::filter_by_search;

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a, R: ?Sized> {
    /// Rows on the requested page, in sorted order.
    pub rows: Vec<&'a R>,
    /// Rows matching filter and search, before pagination.
    pub total: usize,
}

impl<'a, R: ?Sized> QueryResult<'a, R> {
    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pagination summary for this result at `page`.
    pub fn page_info(&self, page: &PageSpec) -> Result<PageInfo> {
        PageInfo::new(page.page, page.page_size, self.total)
    }
}

/// Runs the full pipeline over `rows`.
///
/// Fails only with [`QueryError::InvalidPageSpec`](crate::QueryError) when
/// the page size is not positive; that check happens before any row is
/// touched.
///
/// ```
/// use rowseek::{query, FieldFilter, PageSpec, SortSpec};
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"name": "Alice", "status": "active"}),
///     json!({"name": "Bob", "status": "inactive"}),
///     json!({"name": "Carol", "status": "active"}),
///     json!({"name": "Dan", "status": "active"}),
///     json!({"name": "Eve", "status": "inactive"}),
/// ];
///
/// let result = query(
///     &rows,
///     "",
///     &FieldFilter::new("status", "active"),
///     &SortSpec::asc("name"),
///     &PageSpec::new(0, 2),
///     &["name"],
/// )
/// .unwrap();
///
/// assert_eq!(result.rows, vec![&rows[0], &rows[2]]);
/// assert_eq!(result.total, 3);
/// ```
pub fn query<'a, R>(
    rows: &'a [R],
    search: &str,
    filter: &FieldFilter,
    sort: &SortSpec,
    page: &PageSpec,
    searchable_fields: &[&str],
) -> Result<QueryResult<'a, R>>
where
    R: Row,
{
    page.validate()?;

    let filtered = filter.apply(rows);
    let searched = filter_by_search(filtered, search, searchable_fields);
    let sorted = sort.apply(searched);
    let total = sorted.len();
    let page_rows = page.apply(&sorted)?.to_vec();

    debug!(
        input = rows.len(),
        total,
        returned = page_rows.len(),
        page = page.page,
        page_size = page.page_size,
        "query evaluated"
    );

    Ok(QueryResult {
        rows: page_rows,
        total,
    })
}

/// Everything the user has chosen that shapes what the table shows.
///
/// A `QueryState` is an immutable value: each interaction (a keystroke, a
/// header click, a page button) produces a new state, which is then run
/// against the current rows.
///
/// ```
/// use rowseek::{Dir, QueryState};
/// use serde_json::json;
///
/// let rows = vec![json!({"name": "b"}), json!({"name": "a"}), json!({"name": "c"})];
///
/// let state = QueryState::default().with_page_size(2).toggle_sort("name");
/// let first = state.run(&rows).unwrap();
/// assert_eq!(first.rows, vec![&rows[1], &rows[0]]);
///
/// let state = state.toggle_sort("name").with_page(1);
/// assert_eq!(state.sort.dir, Dir::Desc);
/// assert_eq!(state.run(&rows).unwrap().rows, vec![&rows[1]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Free-text search.
    pub search: String,
    /// Discrete field filter.
    pub filter: FieldFilter,
    /// Sort field and direction.
    pub sort: SortSpec,
    /// Requested page.
    pub page: PageSpec,
    /// Fields free-text search looks at; empty means all fields.
    pub searchable_fields: Vec<String>,
}

impl QueryState {
    /// Creates a state with default settings.
    pub fn new() -> Self {
        QueryState::default()
    }

    /// Sets the search text and returns to the first page.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page.page = 0;
        self
    }

    /// Sets the field filter and returns to the first page.
    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = filter;
        self.page.page = 0;
        self
    }

    /// Sets the sort.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Applies a header click on `field`; see [`SortSpec::toggle`].
    pub fn toggle_sort(mut self, field: &str) -> Self {
        self.sort = self.sort.toggle(field);
        self
    }

    /// Moves to `page`.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page.page = page;
        self
    }

    /// Sets rows per page and returns to the first page.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page = PageSpec::first(page_size);
        self
    }

    /// Restricts free-text search to `fields`.
    pub fn with_searchable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Runs this state against `rows`.
    pub fn run<'a, R: Row>(&self, rows: &'a [R]) -> Result<QueryResult<'a, R>> {
        let fields: Vec<&str> = self.searchable_fields.iter().map(String::as_str).collect();
        query(
            rows,
            &self.search,
            &self.filter,
            &self.sort,
            &self.page,
            &fields,
        )
    }

    /// Pagination summary for `result`, which must come from this state.
    pub fn page_info<R: ?Sized>(&self, result: &QueryResult<'_, R>) -> Result<PageInfo> {
        result.page_info(&self.page)
    }
}
