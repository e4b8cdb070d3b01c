//! Horizon ListBox - a selectable, filterable, sortable row container.
//!
//! The crate is built in layers:
//!
//! - [`model`]: rows, the ordered row store and the selection model
//! - [`widget`]: the [`ListBox`] itself, separators and row geometry
//! - [`config`]: construction-time configuration, readable from TOML
//!
//! Notifications use the [`Signal`] type from `horizon-listbox-core`, and
//! user callbacks are held as [`CallbackBinding`]s whose cleanup hook runs
//! exactly once.
//!
//! # Example
//!
//! ```
//! use horizon_listbox::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Contact {
//!     name: String,
//! }
//!
//! impl RowContent for Contact {
//!     fn preferred_height(&self, _width: f32) -> f32 {
//!         32.0
//!     }
//! }
//!
//! let mut contacts = ListBox::new();
//! for name in ["Mallory", "Alice", "Bob"] {
//!     contacts.append(Contact { name: name.to_string() });
//! }
//!
//! contacts.set_sort_func(|a, b| a.content().name.cmp(&b.content().name));
//! contacts.set_separator_func(|row, before| {
//!     let initial = row.content().name.chars().next();
//!     let same_section = before.is_some_and(|b| b.content().name.chars().next() == initial);
//!     row.set_separator(if same_section {
//!         None
//!     } else {
//!         initial.map(|c| Separator::header(c.to_string()))
//!     });
//! });
//!
//! contacts.move_cursor(MovementStep::DisplayLines, 1);
//! let first = contacts.cursor_row().unwrap();
//! assert_eq!(contacts.content(first).unwrap().name, "Alice");
//! assert_eq!(contacts.selected_row(), Some(first));
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod widget;

pub use horizon_listbox_core::{CallbackBinding, ConnectionId, PerfSpan, Signal, logging};

pub use config::ListBoxConfig;
pub use error::{ListBoxError, Result};
pub use model::{Direction, ListBoxRow, RowContent, RowId, SelectionMode};
pub use widget::{ListBox, MovementStep, RowGeometry, Separator};
