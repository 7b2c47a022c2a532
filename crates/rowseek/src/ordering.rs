//! Sorting rows by a single field.
//!
//! Provides [`Dir`] for sort direction, [`SortSpec`] for the table's sort
//! state, and [`sort_by`] to apply it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collate::CollationKey;
use crate::row::Row;
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The table's sort state: an optional field and a direction.
///
/// With no field the rows keep their input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: Option<String>,
    /// The sort direction.
    pub dir: Dir,
}

impl SortSpec {
    /// Creates a sort on `field` in direction `dir`.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: Some(field.into()),
            dir,
        }
    }

    /// Creates an ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    /// Creates a descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// Returns `true` if a sort field is set.
    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }

    /// Returns the sort state after a click on the header of `field`.
    ///
    /// The active column flips direction; any other column starts ascending.
    ///
    /// ```
    /// use rowseek::{Dir, SortSpec};
    ///
    /// let sort = SortSpec::default().toggle("name");
    /// assert_eq!(sort, SortSpec::asc("name"));
    /// assert_eq!(sort.toggle("name").dir, Dir::Desc);
    /// assert_eq!(sort.toggle("age"), SortSpec::asc("age"));
    /// ```
    pub fn toggle(&self, field: &str) -> SortSpec {
        if self.field.as_deref() == Some(field) {
            SortSpec::new(field, self.dir.flip())
        } else {
            SortSpec::asc(field)
        }
    }

    /// Returns a sort state that keeps input order.
    pub fn clear(&self) -> SortSpec {
        SortSpec {
            field: None,
            dir: self.dir,
        }
    }

    /// Applies this sort to `rows`.
    pub fn apply<'a, R, I>(&self, rows: I) -> Vec<&'a R>
    where
        R: Row + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        sort_by(rows, self.field.as_deref(), self.dir)
    }
}

/// Sort key extracted once per row.
#[derive(Debug)]
enum SortKey<'a> {
    Text(CollationKey<'a>),
    Number(Number),
    Unordered,
    Missing,
}

impl<'a> SortKey<'a> {
    fn of(value: Value<'a>) -> Self {
        match value {
            Value::String(s) => SortKey::Text(CollationKey::new(s)),
            Value::Number(n) => SortKey::Number(n),
            Value::Bool(_) | Value::Other => SortKey::Unordered,
            Value::None => SortKey::Missing,
        }
    }
}

/// Compares two keys. Missing values go last in either direction; pairs that
/// have no natural order compare equal.
fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>, dir: Dir) -> Ordering {
    match (a, b) {
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        (SortKey::Text(a), SortKey::Text(b)) => dir.apply(a.cmp(b)),
        (SortKey::Number(a), SortKey::Number(b)) => {
            a.compare(*b).map_or(Ordering::Equal, |o| dir.apply(o))
        }
        _ => Ordering::Equal,
    }
}

/// Sorts rows by `field` in direction `dir`, returning a new sequence.
///
/// - With `field` unset the input order is kept.
/// - Null and absent values sort last, in either direction.
/// - Strings use locale-aware ordering ([`locale_cmp`](crate::locale_cmp)).
/// - Numbers compare numerically; NaN compares equal to everything.
/// - Booleans, structured values and mixed types compare equal.
///
/// The sort is stable: rows that compare equal keep their input order.
///
/// ```
/// use rowseek::{sort_by, Dir};
/// use serde_json::json;
///
/// let rows = vec![json!({"n": "bob"}), json!({"n": null}), json!({"n": "Alice"})];
/// let sorted = sort_by(&rows, Some("n"), Dir::Desc);
/// assert_eq!(sorted, vec![&rows[0], &rows[2], &rows[1]]);
/// ```
pub fn sort_by<'a, R, I>(rows: I, field: Option<&str>, dir: Dir) -> Vec<&'a R>
where
    R: Row + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let Some(field) = field else {
        return rows.into_iter().collect();
    };

    let keyed: Vec<(SortKey<'a>, &'a R)> = rows
        .into_iter()
        .map(|row| (SortKey::of(row.field(field)), row))
        .collect();

    trace!(field, %dir, rows = keyed.len(), "sorting");
    let mut by_key =
        |a: &(SortKey<'a>, &'a R), b: &(SortKey<'a>, &'a R)| compare_keys(&a.0, &b.0, dir);
    merge_sort_by(keyed, &mut by_key)
        .into_iter()
        .map(|(_, row)| row)
        .collect()
}

/// Stable merge sort.
///
/// Mixed-type columns make the comparator something other than a total order,
/// and `slice::sort_by` may panic on such comparators. This one always
/// terminates with a permutation of its input.
fn merge_sort_by<T, F>(mut items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, cmp);
    let right = merge_sort_by(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties take from the left run
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};

    fn names(rows: &[&JsonValue]) -> Vec<String> {
        rows.iter()
            .map(|row| match &row["name"] {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Greater), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display_and_serde() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
        assert_eq!(serde_json::to_string(&Dir::Desc).unwrap(), r#""desc""#);
        let dir: Dir = serde_json::from_str(r#""asc""#).unwrap();
        assert!(dir.is_asc());
        assert!(Dir::Asc.flip().is_desc());
    }

    #[test]
    fn unset_field_keeps_order() {
        let rows = vec![json!({"name": "b"}), json!({"name": "a"})];
        assert_eq!(sort_by(&rows, None, Dir::Desc), vec![&rows[0], &rows[1]]);
        assert_eq!(SortSpec::default().apply(&rows), vec![&rows[0], &rows[1]]);
    }

    #[test]
    fn strings_locale_aware_both_directions() {
        let rows = vec![
            json!({"name": "bob"}),
            json!({"name": "Émile"}),
            json!({"name": "alice"}),
            json!({"name": "Carol"}),
        ];
        let asc = sort_by(&rows, Some("name"), Dir::Asc);
        assert_eq!(names(&asc), ["alice", "bob", "Carol", "Émile"]);

        let desc = sort_by(&rows, Some("name"), Dir::Desc);
        assert_eq!(names(&desc), ["Émile", "Carol", "bob", "alice"]);
    }

    #[test]
    fn numbers_compare_numerically() {
        let rows = vec![
            json!({"name": "a", "n": 10}),
            json!({"name": "b", "n": 9.5}),
            json!({"name": "c", "n": -3}),
            json!({"name": "d", "n": 100}),
        ];
        let asc = sort_by(&rows, Some("n"), Dir::Asc);
        assert_eq!(names(&asc), ["c", "b", "a", "d"]);
        let desc = sort_by(&rows, Some("n"), Dir::Desc);
        assert_eq!(names(&desc), ["d", "a", "b", "c"]);
    }

    #[test]
    fn missing_values_always_last() {
        let rows = vec![
            json!({"name": "x1", "n": null}),
            json!({"name": "a", "n": 2}),
            json!({"name": "x2"}),
            json!({"name": "b", "n": 1}),
        ];
        let asc = sort_by(&rows, Some("n"), Dir::Asc);
        assert_eq!(names(&asc), ["b", "a", "x1", "x2"]);
        let desc = sort_by(&rows, Some("n"), Dir::Desc);
        assert_eq!(names(&desc), ["a", "b", "x1", "x2"]);
    }

    #[test]
    fn stable_for_equal_keys() {
        let rows = vec![
            json!({"name": "first", "team": "red"}),
            json!({"name": "second", "team": "blue"}),
            json!({"name": "third", "team": "red"}),
            json!({"name": "fourth", "team": "blue"}),
        ];
        let asc = sort_by(&rows, Some("team"), Dir::Asc);
        assert_eq!(names(&asc), ["second", "fourth", "first", "third"]);
        let desc = sort_by(&rows, Some("team"), Dir::Desc);
        assert_eq!(names(&desc), ["first", "third", "second", "fourth"]);
    }

    #[test]
    fn unordered_values_keep_input_order() {
        let rows = vec![
            json!({"name": "a", "v": true}),
            json!({"name": "b", "v": false}),
            json!({"name": "c", "v": [1]}),
            json!({"name": "d", "v": {"k": 1}}),
        ];
        let sorted = sort_by(&rows, Some("v"), Dir::Asc);
        assert_eq!(names(&sorted), ["a", "b", "c", "d"]);
    }

    #[test]
    fn mixed_types_do_not_panic() {
        let rows: Vec<JsonValue> = (0..64)
            .map(|i| match i % 4 {
                0 => json!({"name": i, "v": format!("s{}", 64 - i)}),
                1 => json!({"name": i, "v": i}),
                2 => json!({"name": i, "v": f64::from(i) / 3.0}),
                _ => json!({"name": i, "v": null}),
            })
            .collect();
        let sorted = sort_by(&rows, Some("v"), Dir::Asc);
        assert_eq!(sorted.len(), rows.len());
        // nulls still land at the end
        assert!(sorted[48..].iter().all(|row| row["v"].is_null()));
    }

    #[test]
    fn does_not_touch_input() {
        let rows = vec![json!({"name": "b"}), json!({"name": "a"})];
        let before = rows.clone();
        let _ = sort_by(&rows, Some("name"), Dir::Asc);
        assert_eq!(rows, before);
    }

    #[test]
    fn toggle_and_clear() {
        let sort = SortSpec::asc("name");
        assert_eq!(sort.toggle("name"), SortSpec::desc("name"));
        assert_eq!(sort.toggle("name").toggle("name"), SortSpec::asc("name"));
        assert_eq!(SortSpec::desc("name").toggle("age"), SortSpec::asc("age"));
        assert!(!sort.clear().is_active());
    }

    #[test]
    fn merge_sort_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        let sorted = merge_sort_by(items, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c'), (1, 'e')]);
    }
}
