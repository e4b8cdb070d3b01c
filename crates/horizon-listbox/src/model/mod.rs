//! Row model for the list box.
//!
//! - [`ListBoxRow`] and [`RowId`]: a row wrapping one content element
//! - [`RowStore`]: ordered storage, filter and sort passes
//! - [`SelectionModel`]: selection set under a [`SelectionMode`] plus the cursor

mod row;
mod selection;
mod store;

pub use row::{FilterFunc, ListBoxRow, RowContent, RowId, SeparatorFunc, SortFunc};
pub use selection::{Direction, SelectionMode, SelectionModel};
pub use store::RowStore;
