//! Selection operations and change notification.

use horizon_listbox_core::logging::targets;

use crate::error::{ListBoxError, Result};
use crate::model::{ListBoxRow, RowContent, RowId, SelectionMode};

use super::{ListBox, log_rejected};

impl<W: RowContent> ListBox<W> {
    /// The current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Changes the selection mode, trimming the selection to fit.
    ///
    /// Switching to `None` clears the selection. Switching to `Single` or
    /// `Browse` keeps only the first selected row in store order, and
    /// `Browse` selects the first visible row if nothing is selected.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if mode == self.selection.mode() {
            return;
        }
        let before = self.selection_snapshot();
        self.selection.set_mode(mode);
        self.config.selection_mode = mode;

        if matches!(mode, SelectionMode::Single | SelectionMode::Browse)
            && self.selection.selected_count() > 1
        {
            let keep = self
                .store
                .order()
                .iter()
                .copied()
                .find(|&id| self.selection.is_selected(id));
            if let Some(keep) = keep {
                self.selection.retain_only(keep);
            }
        }
        self.reconcile_browse();
        tracing::debug!(target: targets::SELECTION, ?mode, "selection mode changed");
        self.finish_selection_change(&before);
    }

    /// The selected row. In `Multiple` mode, the earliest selected one.
    pub fn selected_row(&self) -> Option<RowId> {
        self.selection.selected_rows().first().copied()
    }

    /// All selected rows in store order.
    pub fn selected_rows(&self) -> Vec<RowId> {
        self.store
            .order()
            .iter()
            .copied()
            .filter(|&id| self.selection.is_selected(id))
            .collect()
    }

    /// Whether a row is selected.
    pub fn is_row_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Selects a row following the mode's cardinality rule, or clears the
    /// selection for `None`.
    ///
    /// Requests for unselectable rows, and any request in `None` mode, are
    /// ignored. In `Browse` mode clearing re-selects the first visible row.
    pub fn select_row(&mut self, row: Option<RowId>) -> Result<()> {
        let Some(id) = row else {
            self.unselect_all();
            return Ok(());
        };
        let row = self.store.get(id).ok_or(ListBoxError::UnknownRow(id))?;
        if self.selection.mode() == SelectionMode::None {
            log_rejected("select_row", id, "selection mode is none");
            return Ok(());
        }
        if !row.is_selectable() {
            log_rejected("select_row", id, "row is not selectable");
            return Ok(());
        }

        let before = self.selection_snapshot();
        self.selection.select(id);
        self.finish_selection_change(&before);
        Ok(())
    }

    /// Deselects a row.
    ///
    /// In `Browse` mode the first visible row is selected again if the
    /// selection would become empty.
    pub fn unselect_row(&mut self, id: RowId) -> Result<()> {
        if !self.store.contains(id) {
            return Err(ListBoxError::UnknownRow(id));
        }
        let before = self.selection_snapshot();
        self.selection.unselect(id);
        self.reconcile_browse();
        self.finish_selection_change(&before);
        Ok(())
    }

    /// Selects every visible, selectable row. Only valid in `Multiple` mode.
    pub fn select_all(&mut self) {
        if self.selection.mode() != SelectionMode::Multiple {
            tracing::debug!(target: targets::SELECTION, "select_all ignored outside multiple mode");
            return;
        }
        let before = self.selection_snapshot();
        let candidates: Vec<RowId> = self
            .store
            .visible_ids()
            .filter(|&id| self.store.get(id).is_some_and(ListBoxRow::is_selectable))
            .collect();
        for id in candidates {
            self.selection.select(id);
        }
        self.finish_selection_change(&before);
    }

    /// Clears the selection (re-selecting the first visible row in `Browse`).
    pub fn unselect_all(&mut self) {
        let before = self.selection_snapshot();
        self.selection.clear();
        self.reconcile_browse();
        self.finish_selection_change(&before);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(super) fn selection_snapshot(&self) -> Vec<RowId> {
        self.selection.selected_rows().to_vec()
    }

    /// Emits the selection signals if the selection differs from `before`.
    ///
    /// Returns `true` if anything changed.
    pub(super) fn finish_selection_change(&self, before: &[RowId]) -> bool {
        let after = self.selection.selected_rows();
        let unchanged =
            before.len() == after.len() && before.iter().all(|&id| self.selection.is_selected(id));
        if unchanged {
            return false;
        }

        let primary = match self.selection.mode() {
            SelectionMode::Multiple => after.iter().rev().find(|id| !before.contains(id)).copied(),
            _ => after.first().copied(),
        };
        tracing::debug!(
            target: targets::SELECTION,
            selected = after.len(),
            ?primary,
            "selection changed"
        );
        self.row_selected.emit(primary);
        self.selected_rows_changed.emit(());
        true
    }

    /// Restores the `Browse` invariant: one row selected whenever a visible
    /// selectable row exists.
    pub(super) fn reconcile_browse(&mut self) {
        if self.selection.mode() != SelectionMode::Browse || self.selection.has_selection() {
            return;
        }
        let first = self
            .store
            .visible_ids()
            .find(|&id| self.store.get(id).is_some_and(ListBoxRow::is_selectable));
        if let Some(first) = first {
            self.selection.retain_only(first);
        }
    }

    /// Makes `id` the only selected row, as keyboard and pointer gestures do.
    ///
    /// Ignored in `None` mode and for unselectable rows.
    pub(super) fn select_for_gesture(&mut self, id: RowId) {
        if self.selection.mode() == SelectionMode::None {
            return;
        }
        if !self.store.get(id).is_some_and(ListBoxRow::is_selectable) {
            log_rejected("select", id, "row is not selectable");
            return;
        }
        let before = self.selection_snapshot();
        self.selection.retain_only(id);
        self.finish_selection_change(&before);
    }
}
