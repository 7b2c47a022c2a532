//! Rowseek - the query pipeline behind a searchable, sortable, paginated table.
//!
//! Rowseek takes an in-memory collection of rows plus what the user has
//! chosen in the table's controls, and returns exactly the rows to render
//! along with the total number of matches for the pagination footer.
//!
//! - Free-text search across a configurable set of fields
//! - Exact single-field filter (a status dropdown, say)
//! - Locale-aware, null-last, stable sorting on one column
//! - Pagination with a page summary for the controls
//!
//! # Quick Start
//!
//! ```rust
//! use rowseek::{Column, QueryState, TableConfig};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"name": "Alice", "status": "active"}),
//!     json!({"name": "Bob", "status": "inactive"}),
//!     json!({"name": "Carol", "status": "active"}),
//!     json!({"name": "Dan", "status": "active"}),
//!     json!({"name": "Eve", "status": "inactive"}),
//! ];
//!
//! let table = TableConfig::new(vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("status", "Status"),
//! ]);
//!
//! let state = table
//!     .default_state()
//!     .with_page_size(2)
//!     .with_filter(rowseek::FieldFilter::new("status", "active"));
//! let state = table.toggle_sort(state, "name");
//!
//! let result = state.run(&rows).unwrap();
//! assert_eq!(result.rows, vec![&rows[0], &rows[2]]);
//! assert_eq!(result.total, 3);
//! assert_eq!(state.page_info(&result).unwrap().to_string(), "1-2 of 3");
//! ```
//!
//! # Pipeline
//!
//! Every query runs the same stages in the same order:
//!
//! ```text
//! rows ─► filter_by_field ─► filter_by_search ─► sort_by ─► total ─► paginate
//! ```
//!
//! Each stage is also exported on its own. None of them mutate the input:
//! they borrow the rows and hand back references.
//!
//! # Rows
//!
//! Anything implementing [`Row`] can be queried. Implementations are
//! provided for `serde_json` objects and for string-keyed maps of [`Cell`].
//!
//! # Failure
//!
//! A query only fails when the page size is not positive
//! ([`QueryError::InvalidPageSpec`]). Missing fields, nulls and values of
//! the wrong type never fail: they just don't match a search, and sort as
//! equal (or last, for nulls).

mod collate;
mod error;
mod filter;
mod ordering;
mod page;
mod query;
mod row;
mod search;
mod selection;
mod table;
mod value;

// Re-export public API
pub use collate::{locale_cmp, CollationKey};
pub use error::{QueryError, Result};
pub use filter::{filter_by_field, FieldFilter, MATCH_ALL};
pub use ordering::{sort_by, Dir, SortSpec};
pub use page::{paginate, PageInfo, PageSpec, DEFAULT_PAGE_SIZE};
pub use query::{query, QueryResult, QueryState};
pub use row::{json_value, Row};
pub use search::filter_by_search;
pub use selection::Selection;
pub use table::{Column, TableConfig};
pub use value::{Cell, Number, Value};
