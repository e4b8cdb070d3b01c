//! Separator decoration placed before a list box row.
//!
//! A [`Separator`] is created by the list box's separator function and owned by
//! the row it precedes. It is either a plain dividing line or a section header
//! with a label.
//!
//! # Example
//!
//! ```
//! use horizon_listbox::widget::Separator;
//!
//! // A plain dividing line using the list box's default height
//! let line = Separator::line();
//! assert_eq!(line.height(1.0), 1.0);
//!
//! // A section header with its own height
//! let header = Separator::header("Fruit").with_height(24.0);
//! assert_eq!(header.label(), Some("Fruit"));
//! ```

/// A decoration drawn between two adjacent visible rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Separator {
    /// Optional section label.
    label: Option<String>,

    /// The line thickness in pixels.
    thickness: f32,

    /// Height override; `None` uses the list box's configured separator height.
    height: Option<f32>,
}

impl Separator {
    /// Create a plain dividing line.
    pub fn line() -> Self {
        Self {
            label: None,
            thickness: 1.0,
            height: None,
        }
    }

    /// Create a section header with a label.
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::line()
        }
    }

    // =========================================================================
    // Label
    // =========================================================================

    /// Get the label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// Get the line thickness.
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Set the line thickness.
    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness.max(0.1);
    }

    /// Set thickness using builder pattern.
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.set_thickness(thickness);
        self
    }

    /// Set an explicit height using builder pattern.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height.max(0.0));
        self
    }

    /// Height this separator occupies, falling back to `default_height`.
    ///
    /// Never less than the line thickness.
    pub fn height(&self, default_height: f32) -> f32 {
        self.height.unwrap_or(default_height).max(self.thickness)
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::line()
    }
}

// Ensure Separator is Send + Sync
static_assertions::assert_impl_all!(Separator: Send, Sync);
