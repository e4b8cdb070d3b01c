//! The list box widget and its decorations.

mod layout;
mod list_box;
mod separator;

pub use layout::RowGeometry;
pub use list_box::{FilterBinding, ListBox, MovementStep, SeparatorBinding, SortBinding};
pub use separator::Separator;
