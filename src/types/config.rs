//! Grid configuration consumed by [`GridLayout::new`](crate::layout::GridLayout::new).

use serde::{Deserialize, Serialize};

use super::{Axis, Span};
use crate::error::Result;

/// Uniform gap between adjacent cells, also placed before the first and
/// after the last cell of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub width: f32,
    pub height: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Spacing {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Which axes tile their scrollable band infinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularScrolling {
    pub horizontal: bool,
    pub vertical: bool,
}

impl CircularScrolling {
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
    };
    pub const HORIZONTAL: Self = Self {
        horizontal: true,
        vertical: false,
    };
    pub const VERTICAL: Self = Self {
        horizontal: false,
        vertical: true,
    };
    pub const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };

    pub const fn along(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Everything needed to build a layout.
///
/// The grid has `column_widths.len()` columns and `row_heights.len()` rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub intercell_spacing: Spacing,
    pub frozen_columns: u32,
    pub frozen_rows: u32,
    pub circular_scrolling: CircularScrolling,
    pub merged_cells: Vec<Span>,
}

impl GridConfig {
    /// Grid of `columns` x `rows` cells, all the same size.
    pub fn uniform(columns: usize, rows: usize, column_width: f32, row_height: f32) -> Self {
        Self {
            column_widths: vec![column_width; columns],
            row_heights: vec![row_height; rows],
            ..Self::default()
        }
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    /// Returns [`GridError::Json`](crate::error::GridError::Json) on malformed
    /// input, including malformed A1 ranges in `merged_cells`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sizes along `axis`.
    pub fn sizes(&self, axis: Axis) -> &[f32] {
        match axis {
            Axis::Horizontal => &self.column_widths,
            Axis::Vertical => &self.row_heights,
        }
    }

    /// Frozen count along `axis`.
    pub const fn frozen(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.frozen_columns,
            Axis::Vertical => self.frozen_rows,
        }
    }

    #[must_use]
    pub fn with_spacing(mut self, width: f32, height: f32) -> Self {
        self.intercell_spacing = Spacing::new(width, height);
        self
    }

    #[must_use]
    pub fn with_frozen(mut self, columns: u32, rows: u32) -> Self {
        self.frozen_columns = columns;
        self.frozen_rows = rows;
        self
    }

    #[must_use]
    pub fn with_circular(mut self, circular: CircularScrolling) -> Self {
        self.circular_scrolling = circular;
        self
    }

    #[must_use]
    pub fn with_merges(mut self, spans: impl IntoIterator<Item = Span>) -> Self {
        self.merged_cells.extend(spans);
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Address;

    #[test]
    fn test_from_json_defaults() {
        let config = GridConfig::from_json(r#"{"column_widths": [10, 20], "row_heights": [5]}"#)
            .unwrap();
        assert_eq!(config.column_widths, vec![10.0, 20.0]);
        assert_eq!(config.intercell_spacing, Spacing::default());
        assert_eq!(config.circular_scrolling, CircularScrolling::NONE);
        assert!(config.merged_cells.is_empty());
    }

    #[test]
    fn test_from_json_full() {
        let config = GridConfig::from_json(
            r#"{
                "column_widths": [50, 50, 50],
                "row_heights": [20, 20],
                "intercell_spacing": {"width": 2, "height": 0},
                "frozen_columns": 1,
                "circular_scrolling": {"vertical": true},
                "merged_cells": ["B1:C2"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.frozen(Axis::Horizontal), 1);
        assert_eq!(config.frozen(Axis::Vertical), 0);
        assert!(config.circular_scrolling.along(Axis::Vertical));
        assert_eq!(config.intercell_spacing.along(Axis::Horizontal), 2.0);
        assert_eq!(
            config.merged_cells,
            vec![Span::new(Address::new(1, 0), Address::new(2, 1))]
        );
    }

    #[test]
    fn test_from_json_bad_range() {
        assert!(GridConfig::from_json(r#"{"merged_cells": ["A1:??"]}"#).is_err());
    }
}
