//! Selection and cursor state for a list box.
//!
//! [`SelectionModel`] tracks which rows are selected under a [`SelectionMode`]
//! and which row holds the keyboard cursor. It knows nothing about row order or
//! visibility: the list box supplies that context when it reconciles the model
//! after filtering, sorting or removal.
//!
//! # Example
//!
//! ```ignore
//! use horizon_listbox::model::{SelectionModel, SelectionMode};
//!
//! let mut selection = SelectionModel::new();
//! selection.set_mode(SelectionMode::Multiple);
//! selection.select(row_a);
//! selection.select(row_b);
//! assert_eq!(selection.selected_count(), 2);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::row::RowId;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// No row can be selected.
    None,
    /// Zero or one row is selected (default).
    #[default]
    Single,
    /// Exactly one row is selected whenever a selectable visible row exists.
    Browse,
    /// Any subset of rows can be selected.
    Multiple,
}

/// Vertical direction of a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Towards the first row.
    Up,
    /// Towards the last row (default).
    #[default]
    Down,
}

impl Direction {
    /// Direction of a signed step count. Zero counts as `Down`.
    pub fn from_count(count: i32) -> Self {
        if count < 0 { Self::Up } else { Self::Down }
    }

    /// Whether this direction walks the store forward.
    pub fn is_forward(self) -> bool {
        self == Self::Down
    }
}

/// Selection state plus the keyboard cursor.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    /// Current selection mode.
    mode: SelectionMode,

    /// Set of selected rows for O(1) lookup.
    selected_ids: HashSet<RowId>,

    /// Selected rows in selection order.
    selected_rows: Vec<RowId>,

    /// The row holding the keyboard cursor.
    cursor: Option<RowId>,

    /// Direction of the most recent cursor movement.
    last_direction: Direction,
}

impl SelectionModel {
    /// Creates an empty model in [`SelectionMode::Single`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty model in the given mode.
    pub fn with_mode(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    // =========================================================================
    // Selection Mode
    // =========================================================================

    /// Gets the current selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Sets the selection mode.
    ///
    /// Only [`SelectionMode::None`] changes the selection here (it clears it);
    /// the other cardinality rules need row order and are applied by the list
    /// box through [`retain_only`](Self::retain_only).
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::None {
            self.clear();
        }
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// Checks if a row is selected.
    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Returns true if any rows are selected.
    pub fn has_selection(&self) -> bool {
        !self.selected_rows.is_empty()
    }

    /// Returns the number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected_rows.len()
    }

    /// Returns the selected rows in selection order.
    pub fn selected_rows(&self) -> &[RowId] {
        &self.selected_rows
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Selects a row following the mode's cardinality rule.
    ///
    /// `Single` and `Browse` replace the current selection, `Multiple` adds to
    /// it and `None` ignores the request. Returns `true` if the selection
    /// changed.
    pub fn select(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single | SelectionMode::Browse => self.retain_only(id),
            SelectionMode::Multiple => self.add(id),
        }
    }

    /// Replaces the whole selection with `id`, regardless of mode.
    pub fn retain_only(&mut self, id: RowId) -> bool {
        if self.selected_rows.len() == 1 && self.selected_rows[0] == id {
            return false;
        }
        self.selected_rows.clear();
        self.selected_ids.clear();
        self.add(id);
        true
    }

    /// Removes a row from the selection. Returns `true` if it was selected.
    pub fn unselect(&mut self, id: RowId) -> bool {
        if !self.selected_ids.remove(&id) {
            return false;
        }
        self.selected_rows.retain(|&other| other != id);
        true
    }

    /// Toggles a row. Returns `true` if the selection changed.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.is_selected(id) {
            self.unselect(id)
        } else {
            self.select(id)
        }
    }

    /// Clears the selection. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.selected_rows.is_empty() {
            return false;
        }
        self.selected_rows.clear();
        self.selected_ids.clear();
        true
    }

    /// Drops every trace of a removed row: selection membership and cursor.
    ///
    /// Returns `true` if the selection changed.
    pub fn forget(&mut self, id: RowId) -> bool {
        if self.cursor == Some(id) {
            self.cursor = None;
        }
        self.unselect(id)
    }

    fn add(&mut self, id: RowId) -> bool {
        if !self.selected_ids.insert(id) {
            return false;
        }
        self.selected_rows.push(id);
        true
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// The row holding the keyboard cursor.
    pub fn cursor(&self) -> Option<RowId> {
        self.cursor
    }

    /// Moves the cursor. Returns `true` if it changed.
    pub fn set_cursor(&mut self, cursor: Option<RowId>) -> bool {
        let changed = self.cursor != cursor;
        self.cursor = cursor;
        changed
    }

    /// Direction of the most recent cursor movement.
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Records the direction of a cursor movement.
    pub fn set_last_direction(&mut self, direction: Direction) {
        self.last_direction = direction;
    }
}
