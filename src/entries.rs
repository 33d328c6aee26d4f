//! Ordered, selectable entry lists.
//!
//! One [`EntryList`] backs the function list and another backs the data-set
//! list. The list is the source of truth; the ui only renders it.

use crate::error::{PlotctlError, Result};
use crate::label::Labeled;

/// Whether a list has anything to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// No entries, plotting is disabled.
    Empty,
    /// At least one entry.
    Populated,
}

/// One user-added item.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    /// 1-based position in the list.
    pub index: usize,
    /// Typed plot specification.
    pub spec: T,
    /// Transient selection flag.
    pub selected: bool,
}

impl<T: Labeled> Entry<T> {
    /// Display text for the entry.
    pub fn display_text(&self) -> String {
        self.spec.label()
    }
}

/// Ordered collection of entries with contiguous 1-based indices.
#[derive(Debug, Clone)]
pub struct EntryList<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntryList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Current state of the list.
    pub fn state(&self) -> ListState {
        if self.entries.is_empty() {
            ListState::Empty
        } else {
            ListState::Populated
        }
    }

    /// Append an entry with the next index. Returns that index.
    pub fn add(&mut self, spec: T) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(Entry {
            index,
            spec,
            selected: false,
        });
        index
    }

    /// Flip the selection flag of one entry.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let entry = index
            .checked_sub(1)
            .and_then(|i| self.entries.get_mut(i))
            .ok_or_else(|| PlotctlError::entry_not_found(index))?;
        entry.selected = !entry.selected;
        Ok(entry.selected)
    }

    /// Remove every selected entry and rebuild the rest with fresh indices.
    ///
    /// Returns the number of removed entries. Selection is cleared.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.entries.len();
        let kept: Vec<T> = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|e| !e.selected)
            .map(|e| e.spec)
            .collect();

        for spec in kept {
            self.add(spec);
        }

        before - self.entries.len()
    }

    /// Whether any entry is selected.
    pub fn any_selected(&self) -> bool {
        self.entries.iter().any(|e| e.selected)
    }

    /// Iterate over entries in index order.
    pub fn entries(&self) -> std::slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    /// Get an entry by its 1-based index.
    pub fn get(&self, index: usize) -> Option<&Entry<T>> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::FunctionSpec;
    use proptest::prelude::*;

    fn list_of(exprs: &[&str]) -> EntryList<FunctionSpec> {
        let mut list = EntryList::new();
        for e in exprs {
            list.add(FunctionSpec::new(None, *e));
        }
        list
    }

    #[test]
    fn add_assigns_contiguous_indices() {
        let mut list = EntryList::new();
        assert_eq!(list.state(), ListState::Empty);
        assert_eq!(list.add(FunctionSpec::new(None, "x")), 1);
        assert_eq!(list.add(FunctionSpec::new(Some("sq"), "x^2")), 2);
        assert_eq!(list.state(), ListState::Populated);
        assert_eq!(list.get(2).unwrap().display_text(), "sq : x^2");
        assert!(!list.get(2).unwrap().selected);
    }

    #[test]
    fn delete_selected_reindexes_and_keeps_order() {
        let mut list = list_of(&["a", "b", "c"]);
        list.toggle(2).unwrap();
        assert!(list.any_selected());

        assert_eq!(list.delete_selected(), 1);

        let rows: Vec<_> = list
            .entries()
            .map(|e| (e.index, e.spec.expression.as_str(), e.selected))
            .collect();
        assert_eq!(rows, [(1, "a", false), (2, "c", false)]);
        assert!(!list.any_selected());
    }

    #[test]
    fn deleting_everything_returns_to_empty() {
        let mut list = list_of(&["a", "b"]);
        list.toggle(1).unwrap();
        list.toggle(2).unwrap();
        list.delete_selected();
        assert_eq!(list.state(), ListState::Empty);
    }

    #[test]
    fn toggle_twice_clears_and_out_of_range_fails() {
        let mut list = list_of(&["a"]);
        assert!(list.toggle(1).unwrap());
        assert!(!list.toggle(1).unwrap());
        assert!(matches!(
            list.toggle(0),
            Err(PlotctlError::EntryNotFound { index: 0 })
        ));
        assert!(list.toggle(2).is_err());
    }

    #[test]
    fn enumeration_is_restartable() {
        let list = list_of(&["a", "b"]);
        let first: Vec<_> = list.entries().map(|e| e.index).collect();
        let second: Vec<_> = (&list).into_iter().map(|e| e.index).collect();
        assert_eq!(first, second);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Toggle(usize),
        DeleteSelected,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (1usize..8).prop_map(Op::Toggle),
            Just(Op::DeleteSelected),
        ]
    }

    proptest! {
        #[test]
        fn indices_stay_contiguous(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut list = EntryList::new();
            for (n, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Add => {
                        list.add(FunctionSpec::new(None, format!("f{}", n)));
                    }
                    Op::Toggle(i) => {
                        let _ = list.toggle(i);
                    }
                    Op::DeleteSelected => {
                        list.delete_selected();
                    }
                }

                for (pos, entry) in list.entries().enumerate() {
                    prop_assert_eq!(entry.index, pos + 1);
                }
                prop_assert_eq!(list.any_selected(), list.entries().any(|e| e.selected));
                prop_assert_eq!(list.state() == ListState::Empty, list.is_empty());
            }
        }
    }
}
