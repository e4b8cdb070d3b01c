//! Logging and tracing facilities for Horizon ListBox.
//!
//! Horizon ListBox uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_listbox=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! The [`targets`] constants name each subsystem so they can be filtered
//! individually, and [`PerfSpan`] wraps the row passes (filter, sort,
//! separators, layout) for profiling.

/// Span names used throughout Horizon ListBox for tracing.
pub mod span_names {
    /// Filter pass span.
    pub const REFILTER: &str = "horizon_listbox::refilter";
    /// Sort pass span.
    pub const RESORT: &str = "horizon_listbox::resort";
    /// Separator pass span.
    pub const RESEPARATE: &str = "horizon_listbox::reseparate";
    /// Geometry pass span.
    pub const LAYOUT: &str = "horizon_listbox::layout";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_listbox_core::signal";
    /// Callback binding target.
    pub const BINDING: &str = "horizon_listbox_core::binding";
    /// Row store target.
    pub const STORE: &str = "horizon_listbox::store";
    /// Selection and cursor target.
    pub const SELECTION: &str = "horizon_listbox::selection";
    /// List box widget target.
    pub const LIST_BOX: &str = "horizon_listbox::list_box";
}

/// A guard that records a performance span for the duration of an operation.
///
/// The span will be active until the guard is dropped.
///
/// ```ignore
/// let _span = PerfSpan::new(span_names::RESORT);
/// // ... sort rows ...
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_listbox::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }

    /// Create a performance span annotated with the number of rows processed.
    pub fn with_rows(name: &'static str, rows: usize) -> Self {
        let span =
            tracing::info_span!(target: "horizon_listbox::perf", "perf", operation = name, rows);
        Self {
            span: span.entered(),
        }
    }
}
