//! Sort pass.

use std::cmp::Ordering;

use horizon_listbox_core::logging::{span_names, targets};
use horizon_listbox_core::{CallbackBinding, PerfSpan};

use crate::model::{ListBoxRow, RowContent, RowId, SortFunc};

use super::{ListBox, SortBinding};

impl<W: RowContent> ListBox<W> {
    /// Whether a sort comparator is installed.
    pub fn has_sort_func(&self) -> bool {
        self.sort.is_some()
    }

    /// Installs a sort comparator and resorts every row.
    ///
    /// The sort is stable: rows comparing equal keep their relative order.
    pub fn set_sort_func<F>(&mut self, compare: F)
    where
        F: FnMut(&ListBoxRow<W>, &ListBoxRow<W>) -> Ordering + Send + 'static,
    {
        let func: Box<SortFunc<W>> = Box::new(compare);
        self.set_sort_binding(Some(CallbackBinding::from_boxed(func)));
    }

    /// Installs a sort comparator with a cleanup hook that runs exactly once.
    pub fn set_sort_func_with_cleanup<F, C>(&mut self, compare: F, cleanup: C)
    where
        F: FnMut(&ListBoxRow<W>, &ListBoxRow<W>) -> Ordering + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let func: Box<SortFunc<W>> = Box::new(compare);
        self.set_sort_binding(Some(CallbackBinding::from_boxed(func).with_cleanup(cleanup)));
    }

    /// Replaces the sort binding.
    ///
    /// `None` leaves the rows in their current order; later insertions land
    /// where they are inserted.
    pub fn set_sort_binding(&mut self, binding: Option<SortBinding<W>>) {
        drop(self.sort.take());
        self.sort = binding;
        self.resort();
    }

    /// Removes the sort comparator.
    pub fn clear_sort_func(&mut self) {
        self.set_sort_binding(None);
    }

    /// Reorders every row, visible or hidden, with the comparator.
    ///
    /// Separators are recomputed for the new adjacency. Does nothing when no
    /// comparator is installed.
    #[tracing::instrument(skip(self), target = "horizon_listbox::list_box", level = "trace")]
    pub fn resort(&mut self) {
        let Some(binding) = self.sort.as_mut() else {
            return;
        };
        let _span = PerfSpan::with_rows(span_names::RESORT, self.store.len());
        self.store.sort_by(binding.func_mut());
        tracing::debug!(target: targets::LIST_BOX, rows = self.store.len(), "rows resorted");

        self.reseparate();
        self.queue_layout();
    }

    /// Inserts `content` at the position the comparator selects.
    ///
    /// The row goes after every row comparing equal to it. Without a comparator
    /// this appends. Assumes the rows are already sorted, as they are after
    /// [`resort`](Self::resort).
    pub fn insert_sorted(&mut self, content: W) -> RowId {
        let (appended, id) = self.store.insert(content, usize::MAX);
        let position = match self.sort.as_mut() {
            Some(binding) => self
                .store
                .move_to_sorted_position(id, binding.func_mut())
                .unwrap_or(appended),
            None => appended,
        };
        self.finish_insert(id, position);
        id
    }
}
