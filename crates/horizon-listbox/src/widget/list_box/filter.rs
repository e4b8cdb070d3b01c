//! Filter pass.

use horizon_listbox_core::logging::{span_names, targets};
use horizon_listbox_core::{CallbackBinding, PerfSpan};

use crate::model::{FilterFunc, ListBoxRow, RowContent};

use super::{FilterBinding, ListBox};

impl<W: RowContent> ListBox<W> {
    /// Whether a filter predicate is installed.
    pub fn has_filter_func(&self) -> bool {
        self.filter.is_some()
    }

    /// Installs a filter predicate and refilters every row.
    ///
    /// Rows for which `filter` returns `false` are hidden but keep their place
    /// in the store. The previous predicate's cleanup hook runs first.
    pub fn set_filter_func<F>(&mut self, filter: F)
    where
        F: FnMut(&ListBoxRow<W>) -> bool + Send + 'static,
    {
        let func: Box<FilterFunc<W>> = Box::new(filter);
        self.set_filter_binding(Some(CallbackBinding::from_boxed(func)));
    }

    /// Installs a filter predicate with a cleanup hook that runs exactly once,
    /// when the predicate is replaced, cleared or the list box is dropped.
    pub fn set_filter_func_with_cleanup<F, C>(&mut self, filter: F, cleanup: C)
    where
        F: FnMut(&ListBoxRow<W>) -> bool + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let func: Box<FilterFunc<W>> = Box::new(filter);
        self.set_filter_binding(Some(CallbackBinding::from_boxed(func).with_cleanup(cleanup)));
    }

    /// Replaces the filter binding. `None` shows every row.
    pub fn set_filter_binding(&mut self, binding: Option<FilterBinding<W>>) {
        // Dropping the old binding runs its cleanup before the new pass.
        drop(self.filter.take());
        self.filter = binding;
        self.refilter();
    }

    /// Removes the filter predicate, showing every row.
    pub fn clear_filter_func(&mut self) {
        self.set_filter_binding(None);
    }

    /// Re-evaluates the filter for every row.
    ///
    /// Separators are recomputed for the new visible set, the cursor moves off
    /// rows that became hidden and `refilter_completed` is emitted once the
    /// pass is done.
    #[tracing::instrument(skip(self), target = "horizon_listbox::list_box", level = "trace")]
    pub fn refilter(&mut self) {
        let _span = PerfSpan::with_rows(span_names::REFILTER, self.store.len());
        let before = self.selection_snapshot();

        let changed = self
            .store
            .apply_filter(self.filter.as_mut().map(|binding| binding.func_mut()));
        tracing::debug!(
            target: targets::LIST_BOX,
            changed,
            visible = self.store.visible_len(),
            "rows refiltered"
        );

        self.reseparate();
        self.revalidate_cursor();
        self.reconcile_browse();
        self.finish_selection_change(&before);
        self.queue_layout();
        self.refilter_completed.emit(());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::super::tests::{Item, list_of, visible_values};
    use crate::model::SelectionMode;

    #[test]
    fn test_filter_hides_rows_in_place() {
        let (mut list, ids) = list_of(&[1, 2, 3, 4]);
        list.set_filter_func(|row| row.content().0 % 2 == 0);
        assert_eq!(visible_values(&list), vec![2, 4]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.row_index(ids[3]), Some(1));
        assert_eq!(list.row_index(ids[0]), None);

        list.clear_filter_func();
        assert_eq!(visible_values(&list), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_refilter_emits_completion_each_pass() {
        let (mut list, _) = list_of(&[1, 2]);
        let passes = Arc::new(AtomicUsize::new(0));
        let counter = passes.clone();
        list.refilter_completed.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        list.refilter();
        list.set_filter_func(|_| true);
        list.refilter();
        assert_eq!(passes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_inserted_row_is_filtered() {
        let (mut list, _) = list_of(&[2]);
        list.set_filter_func(|row| row.content().0 > 1);
        let hidden = list.append(Item(0));
        assert!(!list.row(hidden).unwrap().is_visible());
        assert_eq!(visible_values(&list), vec![2]);
    }

    #[test]
    fn test_hidden_rows_keep_selection() {
        let (mut list, ids) = list_of(&[1, 2, 3]);
        list.set_selection_mode(SelectionMode::Multiple);
        list.select_row(Some(ids[0])).unwrap();
        list.set_filter_func(|row| row.content().0 != 1);
        assert!(list.is_row_selected(ids[0]));
    }

    #[test]
    fn test_replacing_filter_runs_cleanup_once() {
        let (mut list, _) = list_of(&[1]);
        let cleanups = Arc::new(AtomicUsize::new(0));
        let counter = cleanups.clone();
        list.set_filter_func_with_cleanup(
            |_| true,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert_eq!(cleanups.load(Ordering::SeqCst), 0);

        list.set_filter_func(|_| false);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
        list.clear_filter_func();
        drop(list);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }
}
