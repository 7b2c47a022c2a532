//! Column descriptors and table configuration.
//!
//! A [`TableConfig`] describes the columns a table shows and its paging and
//! filter defaults. It is where searchable fields come from: every column is
//! searched unless it opts out with `filterable: false`.

use serde::{Deserialize, Serialize};

use crate::filter::{FieldFilter, MATCH_ALL};
use crate::page::{PageSpec, DEFAULT_PAGE_SIZE};
use crate::query::QueryState;

/// One column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Row field shown in this column.
    pub id: String,
    /// Header text.
    #[serde(default)]
    pub label: String,
    /// Whether clicking the header sorts by this column.
    #[serde(default)]
    pub sortable: bool,
    /// Whether free-text search looks at this column.
    #[serde(default = "default_true")]
    pub filterable: bool,
}

fn default_true() -> bool {
    true
}

impl Column {
    /// Creates a searchable, non-sortable column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            label: label.into(),
            sortable: false,
            filterable: true,
        }
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Excludes the column from free-text search.
    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Header text, falling back to the field id.
    pub fn header(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// Layout and defaults of one table.
///
/// ```
/// use rowseek::TableConfig;
///
/// let config: TableConfig = serde_json::from_str(r#"{
///     "columns": [
///         {"id": "name", "label": "Name", "sortable": true},
///         {"id": "avatar", "filterable": false}
///     ],
///     "filter_field": "status"
/// }"#).unwrap();
///
/// assert_eq!(config.searchable_fields(), vec!["name"]);
/// assert!(config.is_sortable("name"));
/// assert_eq!(config.default_state().page.page_size, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Page sizes offered to the user; the first is the initial page size.
    pub rows_per_page_options: Vec<i64>,
    /// Field driven by the filter dropdown, if the table has one.
    pub filter_field: Option<String>,
    /// Initial filter value; defaults to [`MATCH_ALL`].
    pub default_filter_value: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            columns: Vec::new(),
            rows_per_page_options: vec![5, 10, 25],
            filter_field: None,
            default_filter_value: None,
        }
    }
}

impl TableConfig {
    /// Creates a config with the given columns and default paging.
    pub fn new(columns: Vec<Column>) -> Self {
        TableConfig {
            columns,
            ..TableConfig::default()
        }
    }

    /// Looks up a column by field id.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Field ids free-text search looks at, in column order.
    pub fn searchable_fields(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| column.filterable)
            .map(|column| column.id.as_str())
            .collect()
    }

    /// Returns `true` if `field` is a sortable column.
    pub fn is_sortable(&self, field: &str) -> bool {
        self.column(field).is_some_and(|column| column.sortable)
    }

    /// Initial page size: the first offered option, or the crate default.
    pub fn initial_page_size(&self) -> i64 {
        self.rows_per_page_options
            .first()
            .copied()
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// The filter a freshly opened table starts with.
    pub fn default_filter(&self) -> FieldFilter {
        match &self.filter_field {
            Some(field) => FieldFilter::new(
                field.clone(),
                self.default_filter_value.as_deref().unwrap_or(MATCH_ALL),
            ),
            None => FieldFilter::all(),
        }
    }

    /// The query state a freshly opened table starts with.
    pub fn default_state(&self) -> QueryState {
        QueryState {
            filter: self.default_filter(),
            page: PageSpec::first(self.initial_page_size()),
            searchable_fields: self
                .searchable_fields()
                .into_iter()
                .map(String::from)
                .collect(),
            ..QueryState::default()
        }
    }

    /// Applies a header click on `field`, ignoring columns that don't sort.
    pub fn toggle_sort(&self, state: QueryState, field: &str) -> QueryState {
        if self.is_sortable(field) {
            state.toggle_sort(field)
        } else {
            state
        }
    }
}
