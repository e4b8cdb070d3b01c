//! Core systems for Horizon ListBox.
//!
//! This crate provides the foundational pieces the list box engine is built on:
//!
//! - **Signal/Slot System**: Type-safe notifications (`row-selected`,
//!   `row-activated`, `cursor-overshoot`, ...)
//! - **Callback Bindings**: User functions with an exactly-once cleanup hook
//! - **Logging**: `tracing` targets, span names and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_listbox_core::Signal;
//!
//! let row_selected = Signal::<Option<usize>>::new();
//!
//! let conn_id = row_selected.connect(|row| {
//!     println!("Selected: {:?}", row);
//! });
//!
//! row_selected.emit(Some(2));
//! row_selected.disconnect(conn_id);
//! ```

mod binding;
pub mod logging;
pub mod signal;

pub use binding::CallbackBinding;
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
