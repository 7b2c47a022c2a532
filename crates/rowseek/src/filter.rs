//! Discrete single-field filter.
//!
//! Unlike free-text search this is an exact, case-sensitive match on one
//! field, the kind of filter a status dropdown drives.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::row::Row;

/// Reserved filter value that disables field filtering.
pub const MATCH_ALL: &str = "all";

/// A field filter selection: which field, and the value it must equal.
///
/// The default selection matches every row.
///
/// ```
/// use rowseek::{FieldFilter, MATCH_ALL};
///
/// assert!(!FieldFilter::default().is_active());
/// assert!(!FieldFilter::new("status", MATCH_ALL).is_active());
/// assert!(FieldFilter::new("status", "active").is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldFilter {
    /// Field to compare; `None` disables the filter.
    pub field: Option<String>,
    /// Value the field's text must equal, or [`MATCH_ALL`].
    pub value: String,
}

impl FieldFilter {
    /// Creates a filter on `field` for `value`.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldFilter {
            field: Some(field.into()),
            value: value.into(),
        }
    }

    /// A filter that keeps every row.
    pub fn all() -> Self {
        FieldFilter {
            field: None,
            value: MATCH_ALL.to_string(),
        }
    }

    /// Returns `true` if this filter can exclude rows.
    pub fn is_active(&self) -> bool {
        self.field.is_some() && self.value != MATCH_ALL
    }

    /// Applies this filter to `rows`.
    pub fn apply<'a, R, I>(&self, rows: I) -> Vec<&'a R>
    where
        R: Row + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        filter_by_field(rows, self.field.as_deref(), &self.value)
    }
}

impl Default for FieldFilter {
    fn default() -> Self {
        FieldFilter::all()
    }
}

/// Keeps rows whose `field` has text exactly equal to `value`.
///
/// Returns the rows unchanged when `field` is `None` or `value` is
/// [`MATCH_ALL`]. Null, absent and structured values never match.
///
/// ```
/// use rowseek::filter_by_field;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"name": "Alice", "status": "active"}),
///     json!({"name": "Bob", "status": "Active"}),
/// ];
/// assert_eq!(filter_by_field(&rows, Some("status"), "active"), vec![&rows[0]]);
/// ```
pub fn filter_by_field<'a, R, I>(rows: I, field: Option<&str>, value: &str) -> Vec<&'a R>
where
    R: Row + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let field = match field {
        Some(field) if value != MATCH_ALL => field,
        _ => return rows.into_iter().collect(),
    };

    let matched: Vec<&'a R> = rows
        .into_iter()
        .filter(|row| {
            row.field(field)
                .to_text()
                .is_some_and(|text| text == value)
        })
        .collect();

    trace!(field, value, matched = matched.len(), "field filter applied");
    matched
}
