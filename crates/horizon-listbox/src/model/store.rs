//! Ordered storage for list box rows.
//!
//! [`RowStore`] keeps every row, visible or filtered out, in canonical order.
//! Rows live in a slot map so [`RowId`] handles stay stable while the order
//! vector is permuted by sorting. Visible-index queries are dense over the rows
//! that passed the filter.
//!
//! Every structural change bumps [`RowStore::generation`]; the list box keys its
//! geometry cache on that counter.

use std::cmp::Ordering;

use slotmap::SlotMap;

use horizon_listbox_core::logging::targets;

use super::row::{ListBoxRow, RowContent, RowId, RowKey, StoreId};

/// Ordered collection of rows.
#[derive(Debug)]
pub struct RowStore<W> {
    id: StoreId,
    rows: SlotMap<RowKey, ListBoxRow<W>>,
    order: Vec<RowId>,
    generation: u64,
    /// Rows inspected by order scans.
    #[cfg(test)]
    scanned: std::cell::Cell<usize>,
}

impl<W> Default for RowStore<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> RowStore<W> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            id: StoreId::next(),
            rows: SlotMap::with_key(),
            order: Vec::new(),
            generation: 0,
            #[cfg(test)]
            scanned: std::cell::Cell::new(0),
        }
    }

    #[inline]
    fn note_scanned(&self, _rows: usize) {
        #[cfg(test)]
        self.scanned.set(self.scanned.get() + _rows);
    }

    /// Rows inspected by order scans since the last reset.
    #[cfg(test)]
    pub(crate) fn take_scanned(&self) -> usize {
        self.scanned.replace(0)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of rows, visible or not.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Counter bumped on every structural or visibility change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Marks the store as changed without a structural edit (content resized,
    /// separator replaced).
    pub fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `id` refers to a live row of this store.
    pub fn contains(&self, id: RowId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up a row.
    pub fn get(&self, id: RowId) -> Option<&ListBoxRow<W>> {
        if id.store != self.id {
            return None;
        }
        self.rows.get(id.key)
    }

    /// Looks up a row mutably.
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut ListBoxRow<W>> {
        if id.store != self.id {
            return None;
        }
        self.rows.get_mut(id.key)
    }

    /// Row ids in store order.
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// Rows in store order.
    pub fn iter(&self) -> impl Iterator<Item = &ListBoxRow<W>> + '_ {
        self.order.iter().map(move |id| &self.rows[id.key])
    }

    /// Position of a row in store order.
    pub fn position(&self, id: RowId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let found = self.order.iter().position(|&other| other == id);
        self.note_scanned(found.map_or(self.order.len(), |pos| pos + 1));
        found
    }

    /// Ids of visible rows in store order.
    pub fn visible_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(move |id| self.rows[id.key].is_visible())
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.visible_ids().count()
    }

    /// The `index`-th visible row.
    pub fn nth_visible(&self, index: usize) -> Option<RowId> {
        self.visible_ids().nth(index)
    }

    /// Index of a row among the visible rows, or `None` if it is hidden.
    pub fn visible_index(&self, id: RowId) -> Option<usize> {
        if !self.get(id)?.is_visible() {
            return None;
        }
        self.visible_ids().position(|other| other == id)
    }

    /// First visible row in store order.
    pub fn first_visible(&self) -> Option<RowId> {
        self.visible_ids().next()
    }

    /// Nearest visible row starting at `start`.
    ///
    /// Searching forward scans `order[start..]`; searching backward scans
    /// `order[..start]` from the end.
    pub fn find_visible_from(&self, start: usize, forward: bool) -> Option<RowId> {
        let start = start.min(self.order.len());
        let is_visible = |id: &RowId| self.rows[id.key].is_visible();
        if forward {
            let offset = self.order[start..].iter().position(is_visible);
            self.note_scanned(offset.map_or(self.order.len() - start, |offset| offset + 1));
            offset.map(|offset| self.order[start + offset])
        } else {
            let offset = self.order[..start].iter().rev().position(is_visible);
            self.note_scanned(offset.map_or(start, |offset| offset + 1));
            offset.map(|offset| self.order[start - 1 - offset])
        }
    }

    /// The visible row preceding `id` in store order.
    pub fn previous_visible(&self, id: RowId) -> Option<RowId> {
        let pos = self.position(id)?;
        self.find_visible_from(pos, false)
    }

    /// The visible row following `id` in store order.
    pub fn next_visible(&self, id: RowId) -> Option<RowId> {
        let pos = self.position(id)?;
        self.find_visible_from(pos + 1, true)
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Inserts a row at `position`, appending when `position` is past the end.
    ///
    /// Returns the position the row landed at together with its id.
    pub fn insert(&mut self, content: W, position: usize) -> (usize, RowId) {
        let store = self.id;
        let key = self
            .rows
            .insert_with_key(|key| ListBoxRow::new(RowId { store, key }, content));
        let id = RowId { store, key };
        let position = position.min(self.order.len());
        self.order.insert(position, id);
        self.touch();
        tracing::trace!(target: targets::STORE, position, len = self.order.len(), "row inserted");
        (position, id)
    }

    /// Removes a row, returning its former position and the row itself.
    pub fn remove(&mut self, id: RowId) -> Option<(usize, ListBoxRow<W>)> {
        let position = self.position(id)?;
        self.order.remove(position);
        let row = self.rows.remove(id.key)?;
        self.touch();
        tracing::trace!(target: targets::STORE, position, len = self.order.len(), "row removed");
        Some((position, row))
    }

    /// Stable sort of every row, visible and hidden together.
    pub fn sort_by<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&ListBoxRow<W>, &ListBoxRow<W>) -> Ordering + ?Sized,
    {
        let rows = &self.rows;
        self.order.sort_by(|a, b| compare(&rows[a.key], &rows[b.key]));
        self.touch();
    }

    /// Moves `id` to the position a binary search with `compare` selects,
    /// after every row that compares equal to it.
    ///
    /// The remaining rows are assumed to already be in `compare` order.
    pub fn move_to_sorted_position<F>(&mut self, id: RowId, compare: &mut F) -> Option<usize>
    where
        F: FnMut(&ListBoxRow<W>, &ListBoxRow<W>) -> Ordering + ?Sized,
    {
        let from = self.position(id)?;
        self.order.remove(from);
        let rows = &self.rows;
        let row = &rows[id.key];
        let to = self
            .order
            .partition_point(|other| compare(&rows[other.key], row) != Ordering::Greater);
        self.order.insert(to, id);
        if from != to {
            self.touch();
        }
        Some(to)
    }

    /// Invokes `update(row, previous_visible)` for a single row.
    pub fn update_separator<F>(&mut self, id: RowId, previous: Option<RowId>, update: &mut F)
    where
        F: FnMut(&mut ListBoxRow<W>, Option<&ListBoxRow<W>>) + ?Sized,
    {
        if !self.contains(id) {
            return;
        }
        match previous.filter(|prev| self.contains(*prev) && *prev != id) {
            Some(prev) => {
                if let Some([row, before]) = self.rows.get_disjoint_mut([id.key, prev.key]) {
                    update(row, Some(&*before));
                }
            }
            None => {
                if let Some(row) = self.rows.get_mut(id.key) {
                    update(row, None);
                }
            }
        }
        self.touch();
    }

    /// Drops every separator.
    pub fn clear_separators(&mut self) {
        for row in self.rows.values_mut() {
            row.set_separator(None);
        }
        self.touch();
    }
}

impl<W: RowContent> RowStore<W> {
    /// Evaluates `filter` for every row in store order. `None` shows every row.
    ///
    /// Returns the number of rows whose visibility changed. Order is untouched.
    pub fn apply_filter<F>(&mut self, mut filter: Option<&mut F>) -> usize
    where
        F: FnMut(&ListBoxRow<W>) -> bool + ?Sized,
    {
        let mut changed = 0;
        for id in &self.order {
            let visible = match filter.as_mut() {
                Some(filter) => filter(&self.rows[id.key]),
                None => true,
            };
            if self.rows[id.key].set_visible(visible) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.touch();
        }
        changed
    }

    /// Evaluates `filter` for a single row. Returns `true` if visibility changed.
    pub fn apply_filter_to<F>(&mut self, id: RowId, filter: Option<&mut F>) -> bool
    where
        F: FnMut(&ListBoxRow<W>) -> bool + ?Sized,
    {
        let Some(row) = self.get(id) else {
            return false;
        };
        let visible = match filter {
            Some(filter) => filter(row),
            None => true,
        };
        let changed = self.rows[id.key].set_visible(visible);
        if changed {
            self.touch();
        }
        changed
    }
}
