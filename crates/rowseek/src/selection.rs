//! Row selection across pages.
//!
//! Selected rows are remembered by absolute position in the sorted, filtered
//! result (`page * page_size + row_index`), so a checkbox on page 2 stays
//! checked when the user pages away and back.

use std::collections::BTreeSet;

/// Set of selected absolute row positions.
///
/// ```
/// use rowseek::Selection;
///
/// let mut selection = Selection::new();
/// selection.toggle(1, 10, 3);
/// assert!(selection.is_selected(13));
/// assert!(selection.is_indeterminate(1, 10, 10));
///
/// selection.select_page(1, 10, 10);
/// assert!(selection.all_selected_on_page(1, 10, 10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<usize>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection::default()
    }

    /// Flips the row at `row_index` on page `page`.
    ///
    /// Returns `true` if the row is selected afterwards.
    pub fn toggle(&mut self, page: usize, page_size: usize, row_index: usize) -> bool {
        let index = absolute(page, page_size, row_index);
        if self.selected.remove(&index) {
            false
        } else {
            self.selected.insert(index);
            true
        }
    }

    /// Replaces the selection with the `len` rows shown on page `page`.
    pub fn select_page(&mut self, page: usize, page_size: usize, len: usize) {
        self.selected = (0..len)
            .map(|row_index| absolute(page, page_size, row_index))
            .collect();
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Returns `true` if the absolute position `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Number of selected rows, on any page.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected absolute positions in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Returns `true` if the page shows rows and every one is selected.
    pub fn all_selected_on_page(&self, page: usize, page_size: usize, len: usize) -> bool {
        len > 0
            && (0..len).all(|row_index| self.is_selected(absolute(page, page_size, row_index)))
    }

    /// Returns `true` when the "select all" checkbox should show as partial:
    /// something is selected, but not the whole visible page.
    pub fn is_indeterminate(&self, page: usize, page_size: usize, len: usize) -> bool {
        len > 0 && !self.is_empty() && !self.all_selected_on_page(page, page_size, len)
    }

    /// The selected rows among `rows`, the rows currently shown on `page`.
    pub fn selected_rows<'a, R: ?Sized>(
        &self,
        rows: &[&'a R],
        page: usize,
        page_size: usize,
    ) -> Vec<&'a R> {
        rows.iter()
            .enumerate()
            .filter(|(row_index, _)| self.is_selected(absolute(page, page_size, *row_index)))
            .map(|(_, row)| *row)
            .collect()
    }
}

fn absolute(page: usize, page_size: usize, row_index: usize) -> usize {
    page.saturating_mul(page_size).saturating_add(row_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_uses_absolute_positions() {
        let mut selection = Selection::new();
        assert!(selection.toggle(0, 5, 2));
        assert!(selection.toggle(1, 5, 2));
        assert_eq!(selection.indices().collect::<Vec<_>>(), vec![2, 7]);

        assert!(!selection.toggle(0, 5, 2));
        assert_eq!(selection.indices().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn select_page_replaces_selection() {
        let mut selection = Selection::new();
        selection.toggle(0, 5, 0);
        selection.select_page(2, 5, 3);
        assert_eq!(selection.indices().collect::<Vec<_>>(), vec![10, 11, 12]);
        assert!(selection.all_selected_on_page(2, 5, 3));
        assert!(!selection.all_selected_on_page(0, 5, 5));
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let selection = Selection::new();
        assert!(!selection.all_selected_on_page(0, 5, 0));
        assert!(!selection.is_indeterminate(0, 5, 0));
    }

    #[test]
    fn indeterminate_state() {
        let mut selection = Selection::new();
        assert!(!selection.is_indeterminate(0, 5, 5));
        selection.toggle(0, 5, 1);
        assert!(selection.is_indeterminate(0, 5, 5));
        selection.select_page(0, 5, 5);
        assert!(!selection.is_indeterminate(0, 5, 5));
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn selected_rows_on_current_page() {
        let names = ["a", "b", "c"];
        let page: Vec<&str> = names.to_vec();
        let page_refs: Vec<&&str> = page.iter().collect();

        let mut selection = Selection::new();
        selection.toggle(1, 3, 0);
        selection.toggle(1, 3, 2);
        selection.toggle(0, 3, 1);

        assert_eq!(selection.selected_rows(&page_refs, 1, 3), vec![&"a", &"c"]);
        assert_eq!(selection.len(), 3);
    }
}
