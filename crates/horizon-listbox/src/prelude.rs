//! Prelude module for Horizon ListBox.
//!
//! ```ignore
//! use horizon_listbox::prelude::*;
//! ```

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use horizon_listbox_core::{ConnectionId, Signal};

// ============================================================================
// Rows and Selection
// ============================================================================

pub use crate::model::{Direction, ListBoxRow, RowContent, RowId, SelectionMode};

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{ListBox, MovementStep, RowGeometry, Separator};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::ListBoxConfig;
pub use crate::error::{ListBoxError, Result};
