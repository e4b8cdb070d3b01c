//! Rows of a [`ListBox`](crate::widget::ListBox).
//!
//! A [`ListBoxRow`] wraps exactly one content element plus the per-row state the
//! list box tracks: the filter result, the separator drawn before the row and
//! the selectable/activatable flags. Rows are addressed through [`RowId`], a
//! non-owning handle that stays valid until the row is removed.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use slotmap::new_key_type;

use crate::widget::Separator;

new_key_type! {
    /// Slot key of a row inside its store.
    pub(crate) struct RowKey;
}

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of the store a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct StoreId(u64);

impl StoreId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STORE_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// A handle to a row in a specific list box.
///
/// `RowId` is `Copy` and does not keep the row alive. Handles of removed rows,
/// and handles issued by a different list box, are rejected by every
/// row-addressed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    pub(crate) store: StoreId,
    pub(crate) key: RowKey,
}

/// Content that can be placed inside a list box row.
///
/// The list box never draws the content itself. It asks for the height the
/// content wants at the current width and tells it when the filter hides or
/// shows it.
pub trait RowContent {
    /// Height the content needs when laid out at `width`.
    fn preferred_height(&self, width: f32) -> f32;

    /// Called when the row's filter result changes. Hidden content stays owned
    /// by its row.
    fn set_visible(&mut self, visible: bool) {
        let _ = visible;
    }
}

/// One entry in a list box.
#[derive(Debug)]
pub struct ListBoxRow<W> {
    id: RowId,
    content: W,
    separator: Option<Separator>,
    visible: bool,
    selectable: bool,
    activatable: bool,
}

impl<W> ListBoxRow<W> {
    pub(crate) fn new(id: RowId, content: W) -> Self {
        Self {
            id,
            content,
            separator: None,
            visible: true,
            selectable: true,
            activatable: true,
        }
    }

    /// The handle of this row.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The wrapped content element.
    pub fn content(&self) -> &W {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut W {
        &mut self.content
    }

    pub(crate) fn into_content(self) -> W {
        self.content
    }

    /// The separator drawn immediately before this row, if any.
    pub fn separator(&self) -> Option<&Separator> {
        self.separator.as_ref()
    }

    /// Mutable access to the separator, for updating it in place.
    pub fn separator_mut(&mut self) -> Option<&mut Separator> {
        self.separator.as_mut()
    }

    /// Replace the separator drawn before this row.
    ///
    /// Intended to be called from the list box's separator function. The
    /// previous separator, if any, is dropped.
    pub fn set_separator(&mut self, separator: Option<Separator>) {
        self.separator = separator;
    }

    /// Whether the row passed the active filter.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the row can be selected.
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub(crate) fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Whether the row emits `row_activated` when activated.
    pub fn is_activatable(&self) -> bool {
        self.activatable
    }

    pub(crate) fn set_activatable(&mut self, activatable: bool) {
        self.activatable = activatable;
    }
}

impl<W: RowContent> ListBoxRow<W> {
    /// Record a filter result. Returns `true` if visibility changed.
    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        self.content.set_visible(visible);
        true
    }
}

/// Filter predicate signature: `true` keeps the row visible.
pub type FilterFunc<W> = dyn FnMut(&ListBoxRow<W>) -> bool + Send;

/// Sort comparator signature.
pub type SortFunc<W> = dyn FnMut(&ListBoxRow<W>, &ListBoxRow<W>) -> std::cmp::Ordering + Send;

/// Separator updater signature: receives the row and the previous visible row.
pub type SeparatorFunc<W> = dyn FnMut(&mut ListBoxRow<W>, Option<&ListBoxRow<W>>) + Send;
