//! Selectable, filterable, sortable list of rows.
//!
//! [`ListBox`] manages an ordered collection of rows, each wrapping one content
//! element. On top of the row store it runs three user-supplied passes:
//!
//! - a **filter** deciding which rows are visible ([`ListBox::refilter`])
//! - a **sort** comparator reordering all rows ([`ListBox::resort`])
//! - a **separator** function decorating visible adjacency ([`ListBox::reseparate`])
//!
//! and tracks a selection (under a [`SelectionMode`](crate::model::SelectionMode))
//! plus a keyboard cursor that only ever rests on visible rows.
//!
//! # Example
//!
//! ```
//! use horizon_listbox::prelude::*;
//!
//! struct Label(&'static str);
//!
//! impl RowContent for Label {
//!     fn preferred_height(&self, _width: f32) -> f32 {
//!         24.0
//!     }
//! }
//!
//! let mut list = ListBox::new();
//! let apple = list.append(Label("apple"));
//! list.append(Label("banana"));
//! list.append(Label("cherry"));
//!
//! list.set_filter_func(|row| row.content().0 != "banana");
//! assert_eq!(list.visible_len(), 2);
//!
//! list.row_selected.connect(|row| println!("selected {row:?}"));
//! list.select_row(Some(apple)).unwrap();
//! assert_eq!(list.selected_row(), Some(apple));
//! ```
//!
//! # Callback contract
//!
//! Filter, sort and separator functions run synchronously inside the passes.
//! They only receive shared references to rows (the separator function gets
//! the row it decorates mutably), so they cannot add or remove rows while a
//! pass is iterating.

mod cursor;
mod filter;
mod geometry;
mod selection;
mod separators;
mod sort;

use std::fmt;

use horizon_listbox_core::logging::targets;
use horizon_listbox_core::{CallbackBinding, Signal};

use crate::config::ListBoxConfig;
use crate::error::{ListBoxError, Result};
use crate::model::{
    Direction, FilterFunc, ListBoxRow, RowContent, RowId, RowStore, SelectionMode,
    SelectionModel, SeparatorFunc, SortFunc,
};

use super::layout::LayoutCache;

pub use cursor::MovementStep;

/// A filter predicate with its cleanup hook.
pub type FilterBinding<W> = CallbackBinding<FilterFunc<W>>;

/// A sort comparator with its cleanup hook.
pub type SortBinding<W> = CallbackBinding<SortFunc<W>>;

/// A separator updater with its cleanup hook.
pub type SeparatorBinding<W> = CallbackBinding<SeparatorFunc<W>>;

/// A scrollable list of selectable rows.
///
/// # Signals
///
/// - `row_selected`: the selection changed; carries the selected row in
///   `Single`/`Browse` mode, the newly selected row in `Multiple` mode, or
///   `None` when rows were only deselected
/// - `selected_rows_changed`: the set of selected rows changed
/// - `row_activated`: a row was activated (keyboard or pointer)
/// - `cursor_overshoot`: a cursor movement ran past the first or last row
/// - `refilter_completed`: a filter pass finished
/// - `layout_requested`: cached geometry became stale
pub struct ListBox<W> {
    store: RowStore<W>,
    selection: SelectionModel,

    filter: Option<FilterBinding<W>>,
    sort: Option<SortBinding<W>>,
    separator: Option<SeparatorBinding<W>>,

    layout: LayoutCache,
    /// Width used for the last layout pass.
    width: f32,
    layout_pending: bool,

    config: ListBoxConfig,
    drag_highlight: Option<RowId>,

    /// Emitted when the selection changes.
    pub row_selected: Signal<Option<RowId>>,

    /// Emitted when the set of selected rows changes.
    pub selected_rows_changed: Signal<()>,

    /// Emitted when a row is activated.
    pub row_activated: Signal<RowId>,

    /// Emitted when cursor movement is clamped at either end.
    pub cursor_overshoot: Signal<Direction>,

    /// Emitted after every filter pass.
    pub refilter_completed: Signal<()>,

    /// Emitted when row geometry needs recomputing.
    pub layout_requested: Signal<()>,
}

impl<W: RowContent> Default for ListBox<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: RowContent> ListBox<W> {
    /// Creates an empty list box with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(ListBoxConfig::default())
    }

    /// Creates an empty list box from a configuration.
    pub fn with_config(config: ListBoxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ListBoxConfig) -> Self {
        Self {
            store: RowStore::new(),
            selection: SelectionModel::with_mode(config.selection_mode),
            filter: None,
            sort: None,
            separator: None,
            layout: LayoutCache::default(),
            width: 0.0,
            layout_pending: false,
            config,
            drag_highlight: None,
            row_selected: Signal::new(),
            selected_rows_changed: Signal::new(),
            row_activated: Signal::new(),
            cursor_overshoot: Signal::new(),
            refilter_completed: Signal::new(),
            layout_requested: Signal::new(),
        }
    }

    /// The configuration this list box was built with, including later
    /// changes made through setters.
    pub fn config(&self) -> &ListBoxConfig {
        &self.config
    }

    // =========================================================================
    // Row queries
    // =========================================================================

    /// Number of rows, including filtered-out rows.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the list box holds no rows.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of rows passing the filter.
    pub fn visible_len(&self) -> usize {
        self.store.visible_len()
    }

    /// Looks up a row.
    pub fn row(&self, id: RowId) -> Option<&ListBoxRow<W>> {
        self.store.get(id)
    }

    /// Whether `id` names a live row of this list box.
    pub fn contains(&self, id: RowId) -> bool {
        self.store.contains(id)
    }

    /// The content element of a row.
    pub fn content(&self, id: RowId) -> Option<&W> {
        self.store.get(id).map(ListBoxRow::content)
    }

    /// Mutable access to a row's content.
    ///
    /// Cached geometry is invalidated. Call [`row_changed`](Self::row_changed)
    /// afterwards if the change affects filtering, sorting or separators.
    pub fn content_mut(&mut self, id: RowId) -> Option<&mut W> {
        if !self.store.contains(id) {
            return None;
        }
        self.store.touch();
        self.queue_layout();
        self.store.get_mut(id).map(ListBoxRow::content_mut)
    }

    /// All rows in store order, visible or not.
    pub fn rows(&self) -> impl Iterator<Item = &ListBoxRow<W>> + '_ {
        self.store.iter()
    }

    /// Row ids in store order, visible or not.
    pub fn row_ids(&self) -> &[RowId] {
        self.store.order()
    }

    /// Ids of visible rows in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = RowId> + '_ {
        self.store.visible_ids()
    }

    /// The visible row at `index`.
    pub fn row_at_index(&self, index: usize) -> Option<RowId> {
        self.store.nth_visible(index)
    }

    /// Index of a row among the visible rows.
    pub fn row_index(&self, id: RowId) -> Option<usize> {
        self.store.visible_index(id)
    }

    /// The row wrapping `content`.
    pub fn row_for_content(&self, content: &W) -> Option<RowId>
    where
        W: PartialEq,
    {
        self.find_row(|candidate| candidate == content)
    }

    /// The first row, in store order, whose content matches `predicate`.
    pub fn find_row<P>(&self, mut predicate: P) -> Option<RowId>
    where
        P: FnMut(&W) -> bool,
    {
        self.store
            .iter()
            .find(|row| predicate(row.content()))
            .map(ListBoxRow::id)
    }

    // =========================================================================
    // Insertion and removal
    // =========================================================================

    /// Inserts `content` at `position` in store order.
    ///
    /// A position past the end appends. The new row is filtered immediately
    /// but not sorted; see [`insert_sorted`](Self::insert_sorted).
    pub fn insert(&mut self, content: W, position: usize) -> RowId {
        let (position, id) = self.store.insert(content, position);
        self.finish_insert(id, position);
        id
    }

    /// Appends `content` at the end.
    pub fn append(&mut self, content: W) -> RowId {
        self.insert(content, usize::MAX)
    }

    /// Inserts `content` at the front.
    pub fn prepend(&mut self, content: W) -> RowId {
        self.insert(content, 0)
    }

    /// Filters, separates and reconciles a row just placed at `position`.
    ///
    /// Neighbour lookups start from `position`, so appending stays constant
    /// time in the number of rows.
    fn finish_insert(&mut self, id: RowId, position: usize) {
        self.store
            .apply_filter_to(id, self.filter.as_mut().map(|binding| binding.func_mut()));
        let visible = self.store.get(id).is_some_and(ListBoxRow::is_visible);

        // A hidden row changes no visible adjacency.
        if visible && self.separator.is_some() {
            let previous = self.store.find_visible_from(position, false);
            let next = self.store.find_visible_from(position + 1, true);
            self.reseparate_row(id, previous);
            if let Some(next) = next {
                self.reseparate_row(next, Some(id));
            }
        }

        // Only an empty Browse selection can pick up the new row.
        if self.selection.mode() == SelectionMode::Browse && !self.selection.has_selection() {
            let before = self.selection_snapshot();
            self.reconcile_browse();
            self.finish_selection_change(&before);
        }
        self.queue_layout();
    }

    /// Removes a row, returning its content.
    ///
    /// The row's separator is dropped. A removed cursor row moves the cursor to
    /// the nearest visible row; a removed selected row is deselected.
    pub fn remove(&mut self, id: RowId) -> Result<W> {
        let position = self.store.position(id).ok_or(ListBoxError::UnknownRow(id))?;
        let before = self.selection_snapshot();
        let had_cursor = self.selection.cursor() == Some(id);

        self.selection.forget(id);
        if self.drag_highlight == Some(id) {
            self.drag_highlight = None;
        }
        let (_, row) = self.store.remove(id).ok_or(ListBoxError::UnknownRow(id))?;

        if had_cursor {
            self.relocate_cursor(position, position);
        }
        let next = self.store.find_visible_from(position, true);
        self.reseparate_rows(&[next]);
        self.reconcile_browse();
        self.finish_selection_change(&before);
        self.queue_layout();

        Ok(row.into_content())
    }

    /// Removes every row, returning the contents in store order.
    pub fn clear(&mut self) -> Vec<W> {
        let ids = self.store.order().to_vec();
        ids.into_iter()
            .filter_map(|id| self.remove(id).ok())
            .collect()
    }

    /// Re-applies filter, sort position and separators for a single row.
    ///
    /// Call this after changing a row's content in a way the callbacks see.
    pub fn row_changed(&mut self, id: RowId) -> Result<()> {
        let position = self.store.position(id).ok_or(ListBoxError::UnknownRow(id))?;
        let before = self.selection_snapshot();
        let old_next = self.store.find_visible_from(position + 1, true);

        self.store
            .apply_filter_to(id, self.filter.as_mut().map(|binding| binding.func_mut()));
        if let Some(binding) = self.sort.as_mut() {
            self.store.move_to_sorted_position(id, binding.func_mut());
        }
        let new_next = self.store.next_visible(id);
        self.reseparate_rows(&[Some(id), old_next, new_next]);

        self.revalidate_cursor();
        self.reconcile_browse();
        self.finish_selection_change(&before);
        self.store.touch();
        self.queue_layout();
        Ok(())
    }

    // =========================================================================
    // Row flags
    // =========================================================================

    /// Sets whether a row can be selected. Deselects it when disabling.
    pub fn set_row_selectable(&mut self, id: RowId, selectable: bool) -> Result<()> {
        let row = self.store.get_mut(id).ok_or(ListBoxError::UnknownRow(id))?;
        row.set_selectable(selectable);
        if !selectable {
            let before = self.selection_snapshot();
            self.selection.unselect(id);
            self.reconcile_browse();
            self.finish_selection_change(&before);
        }
        Ok(())
    }

    /// Sets whether a row emits `row_activated`.
    pub fn set_row_activatable(&mut self, id: RowId, activatable: bool) -> Result<()> {
        let row = self.store.get_mut(id).ok_or(ListBoxError::UnknownRow(id))?;
        row.set_activatable(activatable);
        Ok(())
    }

    // =========================================================================
    // Gestures and drag feedback
    // =========================================================================

    /// Whether a single click activates rows.
    pub fn activate_on_single_click(&self) -> bool {
        self.config.activate_on_single_click
    }

    /// Sets whether a single click (instead of a double click) activates rows.
    pub fn set_activate_on_single_click(&mut self, single: bool) {
        self.config.activate_on_single_click = single;
    }

    /// Highlights a row as the current drop target, replacing any previous one.
    pub fn drag_highlight_row(&mut self, id: RowId) -> Result<()> {
        if !self.store.contains(id) {
            return Err(ListBoxError::UnknownRow(id));
        }
        self.drag_highlight = Some(id);
        Ok(())
    }

    /// Removes the drop-target highlight.
    pub fn drag_unhighlight_row(&mut self) {
        self.drag_highlight = None;
    }

    /// The row highlighted as drop target.
    pub fn drag_highlighted_row(&self) -> Option<RowId> {
        self.drag_highlight
    }
}

impl<W> Drop for ListBox<W> {
    fn drop(&mut self) {
        // Cleanup hooks run before the rows are released.
        self.filter.take();
        self.sort.take();
        self.separator.take();
    }
}

impl<W> fmt::Debug for ListBox<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBox")
            .field("rows", &self.store.len())
            .field("selection_mode", &self.selection.mode())
            .field("selected", &self.selection.selected_count())
            .field("cursor", &self.selection.cursor())
            .field("has_filter", &self.filter.is_some())
            .field("has_sort", &self.sort.is_some())
            .field("has_separator", &self.separator.is_some())
            .finish()
    }
}

// Ensure ListBox can be moved to the thread that drives it
static_assertions::assert_impl_all!(ListBox<String>: Send);

pub(crate) fn log_rejected(operation: &'static str, id: RowId, reason: &'static str) {
    tracing::debug!(target: targets::LIST_BOX, operation, ?id, reason, "request ignored");
}
