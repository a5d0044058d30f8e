//! Configuration for table reconstruction.
//!
//! The geometric thresholds are in page units (points). Defaults match the
//! layout of the reports this crate was built for: a narrow line-number column
//! on the left edge, rows a few points apart, and data columns at least 30
//! points wide.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default right-edge threshold for fragments in the index column.
pub const DEFAULT_INDEX_COLUMN_WIDTH: f32 = 40.0;

/// Default upward slack added to an index fragment's baseline.
pub const DEFAULT_ROW_DIVIDER_SLACK: f32 = 5.0;

/// Default minimum distance between two column dividers.
pub const DEFAULT_COLUMN_PADDING: f32 = 30.0;

/// Default text marking a section boundary.
pub const DEFAULT_BOUNDARY_MARKER: &str = "*****";

/// Default separator between fragments merged into one cell.
pub const DEFAULT_CELL_SEPARATOR: &str = "\\";

/// What a run does when a page fails to reconstruct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageErrorPolicy {
    /// Stop the run and return the page's error
    #[default]
    Abort,
    /// Log the failure, record the page as skipped and continue
    Skip,
}

/// Table reconstruction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Fragments whose right edge lies left of this x are index fragments.
    pub index_column_width: f32,

    /// Added to an index fragment's `y0` to form its row divider.
    pub row_divider_slack: f32,

    /// A column divider candidate is accepted only if it is further than this
    /// from every divider accepted before it.
    pub column_padding: f32,

    /// Substring identifying a section boundary fragment.
    pub boundary_marker: String,

    /// Joins fragments that land in the same cell.
    pub cell_separator: String,

    /// Behaviour of a multi-page run when one page fails.
    pub on_page_error: PageErrorPolicy,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconstructionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            index_column_width: DEFAULT_INDEX_COLUMN_WIDTH,
            row_divider_slack: DEFAULT_ROW_DIVIDER_SLACK,
            column_padding: DEFAULT_COLUMN_PADDING,
            boundary_marker: DEFAULT_BOUNDARY_MARKER.to_string(),
            cell_separator: DEFAULT_CELL_SEPARATOR.to_string(),
            on_page_error: PageErrorPolicy::Abort,
        }
    }

    /// Set the index column width.
    pub fn with_index_column_width(mut self, width: f32) -> Self {
        self.index_column_width = width;
        self
    }

    /// Set the row divider slack.
    pub fn with_row_divider_slack(mut self, slack: f32) -> Self {
        self.row_divider_slack = slack;
        self
    }

    /// Set the column padding.
    pub fn with_column_padding(mut self, padding: f32) -> Self {
        self.column_padding = padding;
        self
    }

    /// Set the boundary marker.
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.boundary_marker = marker.into();
        self
    }

    /// Set the cell separator.
    pub fn with_cell_separator(mut self, separator: impl Into<String>) -> Self {
        self.cell_separator = separator.into();
        self
    }

    /// Set the page error policy.
    pub fn with_page_error_policy(mut self, policy: PageErrorPolicy) -> Self {
        self.on_page_error = policy;
        self
    }

    /// Check that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a threshold is negative or not
    /// finite, or if the boundary marker is empty (an empty marker would turn
    /// every fragment into a boundary).
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("index_column_width", self.index_column_width),
            ("row_divider_slack", self.row_divider_slack),
            ("column_padding", self.column_padding),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.boundary_marker.is_empty() {
            return Err(Error::InvalidConfig("boundary_marker must not be empty".to_string()));
        }
        Ok(())
    }
}
