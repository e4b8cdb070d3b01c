//! Keyboard cursor, activation and pointer gestures.

use horizon_listbox_core::logging::targets;

use crate::error::{ListBoxError, Result};
use crate::model::{Direction, RowContent, RowId, SelectionMode};

use super::{ListBox, log_rejected};

/// Unit of a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementStep {
    /// One visible row per step (arrow keys).
    DisplayLines,
    /// One viewport height per step (Page Up/Down).
    Pages,
    /// Straight to the first or last visible row (Home/End).
    BufferEnds,
}

impl<W: RowContent> ListBox<W> {
    /// The row holding the keyboard cursor.
    pub fn cursor_row(&self) -> Option<RowId> {
        self.selection.cursor()
    }

    /// Places the cursor on a visible row, or removes it with `None`.
    ///
    /// The selection is left untouched. Hidden rows cannot hold the cursor.
    pub fn set_cursor_row(&mut self, row: Option<RowId>) -> Result<()> {
        let Some(id) = row else {
            self.selection.set_cursor(None);
            return Ok(());
        };
        let row = self.store.get(id).ok_or(ListBoxError::UnknownRow(id))?;
        if !row.is_visible() {
            log_rejected("set_cursor_row", id, "row is hidden");
            return Ok(());
        }
        self.selection.set_cursor(Some(id));
        Ok(())
    }

    /// Moves the cursor by `count` steps and selects the row it lands on.
    ///
    /// Negative counts move up. Without a cursor, the first movement lands on
    /// the first row (downwards) or the last row (upwards). Movement stops at
    /// either end; if the request ran past an end, `cursor_overshoot` is
    /// emitted once with the direction of the request.
    pub fn move_cursor(&mut self, step: MovementStep, count: i32) {
        self.move_cursor_inner(step, count, true);
    }

    /// Moves the cursor like [`move_cursor`](Self::move_cursor) without
    /// changing the selection (Ctrl + arrow keys).
    pub fn move_cursor_modify(&mut self, step: MovementStep, count: i32) {
        self.move_cursor_inner(step, count, false);
    }

    fn move_cursor_inner(&mut self, step: MovementStep, count: i32, select: bool) {
        if count == 0 {
            return;
        }
        let visible: Vec<RowId> = self.store.visible_ids().collect();
        if visible.is_empty() {
            return;
        }
        let last = visible.len() - 1;
        let direction = Direction::from_count(count);
        self.selection.set_last_direction(direction);

        let current = self
            .selection
            .cursor()
            .and_then(|cursor| visible.iter().position(|&id| id == cursor));

        let (target, overshoot) = match (step, current) {
            (MovementStep::BufferEnds, _) => {
                let target = if count > 0 { last } else { 0 };
                (target, current == Some(target))
            }
            (_, None) => (if count > 0 { 0 } else { last }, false),
            (MovementStep::DisplayLines, Some(current)) => {
                let wanted = current as i64 + i64::from(count);
                let clamped = wanted.clamp(0, last as i64);
                (clamped as usize, wanted != clamped)
            }
            (MovementStep::Pages, Some(current)) => self.page_target(&visible, current, count),
        };

        let row = visible[target];
        self.selection.set_cursor(Some(row));
        tracing::trace!(target: targets::SELECTION, ?step, count, index = target, "cursor moved");
        if select {
            self.select_for_gesture(row);
        }
        if overshoot {
            tracing::debug!(target: targets::SELECTION, ?direction, "cursor overshoot");
            self.cursor_overshoot.emit(direction);
        }
    }

    /// Target index for a page-wise movement of `count` viewport heights.
    ///
    /// Always moves at least one row unless already at the end.
    fn page_target(&mut self, visible: &[RowId], current: usize, count: i32) -> (usize, bool) {
        self.ensure_layout();
        let last = visible.len() - 1;
        let Some(geometry) = self.layout.geometry(visible[current]) else {
            return (current, false);
        };

        let target_y = geometry.y + count as f32 * self.config.page_size;
        if target_y < 0.0 {
            return (0, true);
        }
        if target_y >= self.layout.content_height() {
            return (last, true);
        }

        let mut target = self
            .layout
            .nearest_row_at_y(target_y)
            .and_then(|row| visible.iter().position(|&id| id == row))
            .unwrap_or(current);
        if target == current {
            target = (current as i64 + i64::from(count.signum())).clamp(0, last as i64) as usize;
        }
        (target, false)
    }

    /// Activates the cursor row: selects it and emits `row_activated`.
    ///
    /// Does nothing without a cursor or when the row is not activatable.
    pub fn activate_cursor_row(&mut self) {
        let Some(id) = self.selection.cursor() else {
            return;
        };
        if !self.store.get(id).is_some_and(|row| row.is_activatable()) {
            log_rejected("activate_cursor_row", id, "row is not activatable");
            return;
        }
        self.select_and_activate(id);
    }

    /// Toggles the selection of the cursor row (Ctrl + Space).
    ///
    /// In `Browse` mode the row is selected but never deselected.
    pub fn toggle_cursor_row(&mut self) {
        let Some(id) = self.selection.cursor() else {
            return;
        };
        if !self.store.get(id).is_some_and(|row| row.is_selectable()) {
            log_rejected("toggle_cursor_row", id, "row is not selectable");
            return;
        }
        let before = self.selection_snapshot();
        match self.selection.mode() {
            SelectionMode::None => return,
            SelectionMode::Browse => {
                self.selection.select(id);
            }
            SelectionMode::Single | SelectionMode::Multiple => {
                self.selection.toggle(id);
            }
        }
        self.finish_selection_change(&before);
    }

    /// Handles a pointer click on a row; `n_press` counts consecutive presses.
    ///
    /// The clicked row takes the cursor. With single-click activation the
    /// first press selects and activates the row. Otherwise a single press
    /// selects it and a double press activates it.
    pub fn row_clicked(&mut self, id: RowId, n_press: u32) -> Result<()> {
        let row = self.store.get(id).ok_or(ListBoxError::UnknownRow(id))?;
        if !row.is_visible() {
            log_rejected("row_clicked", id, "row is hidden");
            return Ok(());
        }
        let activatable = row.is_activatable();
        self.selection.set_cursor(Some(id));

        match (self.config.activate_on_single_click, n_press) {
            (_, 0) => {}
            (true, 1) if activatable => self.select_and_activate(id),
            (true, _) | (false, 1) => self.select_for_gesture(id),
            (false, _) if activatable => {
                self.select_for_gesture(id);
                self.row_activated.emit(id);
            }
            (false, _) => self.select_for_gesture(id),
        }
        Ok(())
    }

    fn select_and_activate(&mut self, id: RowId) {
        self.select_for_gesture(id);
        tracing::debug!(target: targets::LIST_BOX, ?id, "row activated");
        self.row_activated.emit(id);
    }

    /// Moves the cursor off a row that was hidden.
    pub(super) fn revalidate_cursor(&mut self) {
        let Some(cursor) = self.selection.cursor() else {
            return;
        };
        if self.store.get(cursor).is_some_and(|row| row.is_visible()) {
            return;
        }
        match self.store.position(cursor) {
            Some(position) => self.relocate_cursor(position + 1, position),
            None => {
                self.selection.set_cursor(None);
            }
        }
    }

    /// Puts the cursor on the nearest visible row, searching first in the
    /// direction of the last movement.
    ///
    /// Forward searches scan from `forward_start`, backward searches scan
    /// before `backward_start`. Clears the cursor if no row is visible.
    pub(super) fn relocate_cursor(&mut self, forward_start: usize, backward_start: usize) {
        let forward = self.selection.last_direction().is_forward();
        let ahead = self.store.find_visible_from(forward_start, true);
        let behind = self.store.find_visible_from(backward_start, false);
        let target = if forward {
            ahead.or(behind)
        } else {
            behind.or(ahead)
        };
        tracing::trace!(target: targets::SELECTION, row = ?target, "cursor relocated");
        self.selection.set_cursor(target);
    }
}
