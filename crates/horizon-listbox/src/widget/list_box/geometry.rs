//! Row geometry and hit testing.

use horizon_listbox_core::PerfSpan;
use horizon_listbox_core::logging::{span_names, targets};

use crate::error::{ListBoxError, Result};
use crate::model::{RowContent, RowId};
use crate::widget::RowGeometry;

use super::ListBox;

impl<W: RowContent> ListBox<W> {
    /// Lays the visible rows out top to bottom at `width`.
    ///
    /// Each row occupies its separator's height followed by the content's
    /// preferred height.
    pub fn layout(&mut self, width: f32) {
        let _span = PerfSpan::with_rows(span_names::LAYOUT, self.store.visible_len());
        self.width = width;

        let store = &self.store;
        let default_separator = self.config.separator_height;
        let rows = store.visible_ids().filter_map(|id| {
            let row = store.get(id)?;
            let separator_height = row
                .separator()
                .map_or(0.0, |separator| separator.height(default_separator));
            Some((id, separator_height, row.content().preferred_height(width)))
        });
        self.layout.rebuild(rows, store.generation(), width);
        self.layout_pending = false;

        tracing::trace!(
            target: targets::LIST_BOX,
            width,
            height = self.layout.content_height(),
            "layout computed"
        );
    }

    /// Recomputes geometry at the last width if it is stale.
    pub(super) fn ensure_layout(&mut self) {
        if !self.layout.is_valid(self.store.generation(), self.width) {
            self.layout(self.width);
        }
    }

    /// Marks geometry stale and requests a layout pass once per batch of
    /// changes.
    pub(super) fn queue_layout(&mut self) {
        self.layout.invalidate();
        if !self.layout_pending {
            self.layout_pending = true;
            self.layout_requested.emit(());
        }
    }

    /// Whether geometry changed since the last layout pass.
    pub fn needs_layout(&self) -> bool {
        self.layout_pending || !self.layout.is_valid(self.store.generation(), self.width)
    }

    /// The visible row whose content area contains `y`.
    ///
    /// Geometry is brought up to date first, so the answer reflects all prior
    /// mutations. Separator areas, hidden rows and points outside the content
    /// yield `None`.
    pub fn row_at_y(&mut self, y: f32) -> Option<RowId> {
        self.ensure_layout();
        self.layout.row_at_y(y)
    }

    /// Geometry of a visible row.
    ///
    /// Returns `Ok(None)` for hidden rows.
    pub fn row_geometry(&mut self, id: RowId) -> Result<Option<RowGeometry>> {
        if !self.store.contains(id) {
            return Err(ListBoxError::UnknownRow(id));
        }
        self.ensure_layout();
        Ok(self.layout.geometry(id))
    }

    /// Total height of the visible rows and their separators.
    pub fn content_height(&mut self) -> f32 {
        self.ensure_layout();
        self.layout.content_height()
    }

    /// Viewport height used for page-wise cursor movement.
    pub fn page_size(&self) -> f32 {
        self.config.page_size
    }

    /// Sets the viewport height used for page-wise cursor movement.
    ///
    /// Non-finite or non-positive sizes are ignored.
    pub fn set_page_size(&mut self, page_size: f32) {
        if !page_size.is_finite() || page_size <= 0.0 {
            tracing::debug!(target: targets::LIST_BOX, page_size, "page size ignored");
            return;
        }
        self.config.page_size = page_size;
    }
}
