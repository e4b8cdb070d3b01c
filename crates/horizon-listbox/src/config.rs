//! Construction-time configuration for [`ListBox`](crate::widget::ListBox).
//!
//! Defaults that would otherwise be process-wide (initial selection mode,
//! gesture mapping, decoration metrics) are passed explicitly through a
//! [`ListBoxConfig`]. Configurations can be built in code or read from TOML:
//!
//! ```
//! use horizon_listbox::{ListBoxConfig, SelectionMode};
//!
//! let config = ListBoxConfig::from_toml_str(r#"
//! selection_mode = "browse"
//! activate_on_single_click = false
//! page_size = 240.0
//! "#).unwrap();
//!
//! assert_eq!(config.selection_mode, SelectionMode::Browse);
//! assert!(!config.activate_on_single_click);
//! assert_eq!(config.separator_height, 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ListBoxError, Result};
use crate::model::SelectionMode;

/// Default height of a separator without an explicit height.
pub const DEFAULT_SEPARATOR_HEIGHT: f32 = 1.0;

/// Default viewport height used for page-wise cursor movement.
pub const DEFAULT_PAGE_SIZE: f32 = 400.0;

/// Configuration for a list box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListBoxConfig {
    /// Initial selection mode.
    pub selection_mode: SelectionMode,
    /// Whether a single click activates a row (otherwise a double click does).
    pub activate_on_single_click: bool,
    /// Height of separators that do not specify their own.
    pub separator_height: f32,
    /// Viewport height used by page-wise cursor movement.
    pub page_size: f32,
}

impl Default for ListBoxConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Single,
            activate_on_single_click: true,
            separator_height: DEFAULT_SEPARATOR_HEIGHT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListBoxConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Checks that every metric is finite and in range.
    pub fn validate(&self) -> Result<()> {
        if !self.separator_height.is_finite() || self.separator_height < 0.0 {
            return Err(ListBoxError::invalid_config(
                "separator_height",
                format!("expected a finite non-negative number, got {}", self.separator_height),
            ));
        }
        if !self.page_size.is_finite() || self.page_size <= 0.0 {
            return Err(ListBoxError::invalid_config(
                "page_size",
                format!("expected a finite positive number, got {}", self.page_size),
            ));
        }
        Ok(())
    }

    /// Set the selection mode using builder pattern.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set single-click activation using builder pattern.
    pub fn with_activate_on_single_click(mut self, single: bool) -> Self {
        self.activate_on_single_click = single;
        self
    }

    /// Set the default separator height using builder pattern.
    pub fn with_separator_height(mut self, height: f32) -> Self {
        self.separator_height = height;
        self
    }

    /// Set the page size using builder pattern.
    pub fn with_page_size(mut self, page_size: f32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ListBoxConfig::default();
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert!(config.activate_on_single_click);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ListBoxConfig::from_toml_str("").unwrap();
        assert_eq!(config, ListBoxConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ListBoxConfig::default()
            .with_selection_mode(SelectionMode::Multiple)
            .with_separator_height(6.0);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("selection_mode = \"multiple\""));
        assert_eq!(ListBoxConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = ListBoxConfig::from_toml_str("selection_mode = \"extended\"").unwrap_err();
        assert!(matches!(err, ListBoxError::ConfigParse(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = ListBoxConfig::from_toml_str("page_size = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ListBoxError::InvalidConfig {
                field: "page_size",
                ..
            }
        ));

        let err = ListBoxConfig::default()
            .with_separator_height(-1.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("separator_height"));
    }
}
