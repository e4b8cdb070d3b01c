//! Separator pass.

use horizon_listbox_core::logging::span_names;
use horizon_listbox_core::{CallbackBinding, PerfSpan};

use crate::model::{ListBoxRow, RowContent, RowId, SeparatorFunc};

use super::{ListBox, SeparatorBinding};

impl<W: RowContent> ListBox<W> {
    /// Whether a separator function is installed.
    pub fn has_separator_func(&self) -> bool {
        self.separator.is_some()
    }

    /// Installs a separator function and recomputes every separator.
    ///
    /// The function receives each visible row mutably together with the
    /// visible row before it (`None` for the first) and may set, update or
    /// remove the row's [`Separator`](crate::widget::Separator).
    pub fn set_separator_func<F>(&mut self, update: F)
    where
        F: FnMut(&mut ListBoxRow<W>, Option<&ListBoxRow<W>>) + Send + 'static,
    {
        let func: Box<SeparatorFunc<W>> = Box::new(update);
        self.set_separator_binding(Some(CallbackBinding::from_boxed(func)));
    }

    /// Installs a separator function with a cleanup hook that runs exactly once.
    pub fn set_separator_func_with_cleanup<F, C>(&mut self, update: F, cleanup: C)
    where
        F: FnMut(&mut ListBoxRow<W>, Option<&ListBoxRow<W>>) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let func: Box<SeparatorFunc<W>> = Box::new(update);
        self.set_separator_binding(Some(CallbackBinding::from_boxed(func).with_cleanup(cleanup)));
    }

    /// Replaces the separator binding. `None` removes every separator.
    pub fn set_separator_binding(&mut self, binding: Option<SeparatorBinding<W>>) {
        drop(self.separator.take());
        self.separator = binding;
        if self.separator.is_some() {
            self.reseparate();
        } else {
            self.store.clear_separators();
            self.queue_layout();
        }
    }

    /// Removes the separator function and every separator.
    pub fn clear_separator_func(&mut self) {
        self.set_separator_binding(None);
    }

    /// Recomputes the separator of every visible row.
    ///
    /// Hidden rows are skipped; each visible row sees the nearest visible row
    /// before it. Does nothing when no separator function is installed.
    pub fn reseparate(&mut self) {
        let Some(binding) = self.separator.as_mut() else {
            return;
        };
        let visible: Vec<RowId> = self.store.visible_ids().collect();
        let _span = PerfSpan::with_rows(span_names::RESEPARATE, visible.len());

        let mut previous = None;
        for id in visible {
            self.store.update_separator(id, previous, binding.func_mut());
            previous = Some(id);
        }
        self.queue_layout();
    }

    /// Recomputes one row's separator against a known visible predecessor.
    pub(super) fn reseparate_row(&mut self, id: RowId, previous: Option<RowId>) {
        if let Some(binding) = self.separator.as_mut() {
            self.store.update_separator(id, previous, binding.func_mut());
        }
    }

    /// Recomputes the separators of the given rows only.
    ///
    /// Used after single-row edits, where only the edited row and its visible
    /// successors can see a different predecessor.
    pub(super) fn reseparate_rows(&mut self, rows: &[Option<RowId>]) {
        let Some(binding) = self.separator.as_mut() else {
            return;
        };
        let mut done: Vec<RowId> = Vec::with_capacity(rows.len());
        for &id in rows.iter().flatten() {
            if done.contains(&id) || !self.store.get(id).is_some_and(ListBoxRow::is_visible) {
                continue;
            }
            let previous = self.store.previous_visible(id);
            self.store.update_separator(id, previous, binding.func_mut());
            done.push(id);
        }
    }
}
