//! Free-text search across a row's fields.

use tracing::trace;

use crate::row::Row;
use crate::value::Value;

/// Keeps rows where any searchable field contains `query`, ignoring case.
///
/// - An empty or whitespace-only query keeps every row, in order.
/// - With an empty `searchable_fields`, every field of the row is searched.
/// - Null, absent and structured values never match.
///
/// Values are compared through their canonical text, so numbers and booleans
/// are searchable too (`"42"`, `"true"`).
///
/// ```
/// use rowseek::filter_by_search;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"name": "Alice Johnson", "role": "admin"}),
///     json!({"name": "Bob Stone", "role": "editor"}),
/// ];
///
/// let hits = filter_by_search(&rows, "JOHN", &["name"]);
/// assert_eq!(hits, vec![&rows[0]]);
///
/// let hits = filter_by_search(&rows, "edit", &[]);
/// assert_eq!(hits, vec![&rows[1]]);
/// ```
pub fn filter_by_search<'a, R, I>(rows: I, query: &str, searchable_fields: &[&str]) -> Vec<&'a R>
where
    R: Row + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if query.trim().is_empty() {
        return rows.into_iter().collect();
    }

    let needle = query.to_lowercase();
    let matched: Vec<&'a R> = rows
        .into_iter()
        .filter(|row| row_matches(*row, &needle, searchable_fields))
        .collect();

    trace!(query, matched = matched.len(), "search applied");
    matched
}

fn row_matches<R: Row + ?Sized>(row: &R, needle: &str, fields: &[&str]) -> bool {
    if fields.is_empty() {
        row.values().iter().any(|value| contains(value, needle))
    } else {
        fields
            .iter()
            .any(|field| contains(&row.field(field), needle))
    }
}

fn contains(value: &Value<'_>, needle: &str) -> bool {
    value
        .to_text()
        .is_some_and(|text| text.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};

    fn people() -> Vec<JsonValue> {
        vec![
            json!({"name": "Alice Johnson", "age": 31, "admin": true}),
            json!({"name": "Bob", "age": 42, "admin": false, "note": null}),
            json!({"name": null, "age": 7, "tags": ["john"]}),
        ]
    }

    #[test]
    fn blank_query_is_identity() {
        let rows = people();
        for query in ["", "   ", "\t\n"] {
            let result = filter_by_search(&rows, query, &["name"]);
            assert_eq!(result, rows.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn case_insensitive_substring() {
        let rows = people();
        for query in ["alice", "ALICE", "john", "Son"] {
            let result = filter_by_search(&rows, query, &["name"]);
            assert_eq!(result, vec![&rows[0]], "query {query:?}");
        }
        assert!(filter_by_search(&rows, "xyz", &["name"]).is_empty());
    }

    #[test]
    fn only_configured_fields_are_searched() {
        let rows = people();
        assert!(filter_by_search(&rows, "42", &["name"]).is_empty());
        assert_eq!(filter_by_search(&rows, "42", &["age"]), vec![&rows[1]]);
    }

    #[test]
    fn empty_field_list_searches_everything() {
        let rows = people();
        assert_eq!(filter_by_search(&rows, "42", &[]), vec![&rows[1]]);
        assert_eq!(filter_by_search(&rows, "true", &[]), vec![&rows[0]]);
    }

    #[test]
    fn nulls_and_nested_values_never_match() {
        let rows = people();
        // "null" is not the text of a missing value
        assert!(filter_by_search(&rows, "null", &[]).is_empty());
        // arrays are skipped
        assert_eq!(filter_by_search(&rows, "john", &[]), vec![&rows[0]]);
        assert!(filter_by_search(&rows, "x", &["missing"]).is_empty());
    }

    #[test]
    fn query_whitespace_is_significant() {
        let rows = people();
        assert_eq!(filter_by_search(&rows, "e j", &["name"]), vec![&rows[0]]);
        assert!(filter_by_search(&rows, " bob", &["name"]).is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let rows = vec![json!({"n": "ab"}), json!({"n": "b"}), json!({"n": "abc"})];
        let result = filter_by_search(&rows, "b", &["n"]);
        assert_eq!(result, vec![&rows[0], &rows[1], &rows[2]]);
    }
}
