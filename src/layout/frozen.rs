//! Frozen pane splitting.
//!
//! Frozen bands are always the leading indices of an axis. They stay pinned at
//! the viewport origin; only the scrollable band moves with the scroll offset.

use super::dimensions::AxisDimensions;
use crate::error::{GridError, Result};
use crate::types::{Address, Axis};

/// Frozen band of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenBand {
    count: u32,
    extent: f32,
}

impl FrozenBand {
    /// # Errors
    /// [`GridError::FrozenOutOfRange`] if `count` exceeds the axis length.
    pub fn new(dims: &AxisDimensions, count: u32) -> Result<Self> {
        if count > dims.count() {
            return Err(GridError::FrozenOutOfRange {
                axis: dims.axis(),
                frozen: count,
                count: dims.count(),
            });
        }
        Ok(Self {
            count,
            extent: dims.prefix(count)?,
        })
    }

    /// Number of frozen indices.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Pixel extent of the frozen cells and their leading gaps.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Content position where the scrollable band begins.
    pub fn scrollable_origin(&self) -> f32 {
        self.extent
    }

    pub fn is_frozen(&self, index: u32) -> bool {
        index < self.count
    }
}

/// Which pane an address is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRegion {
    /// Frozen on both axes; never moves.
    FrozenCorner,
    /// Frozen column, scrolls vertically only.
    FrozenColumn,
    /// Frozen row, scrolls horizontally only.
    FrozenRow,
    /// Scrolls on both axes.
    Scrollable,
}

/// Frozen bands of both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenPanes {
    pub columns: FrozenBand,
    pub rows: FrozenBand,
}

impl FrozenPanes {
    pub fn band(&self, axis: Axis) -> &FrozenBand {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    pub fn frozen_extent(&self, axis: Axis) -> f32 {
        self.band(axis).extent()
    }

    pub fn region(&self, address: Address) -> CellRegion {
        match (
            self.columns.is_frozen(address.column),
            self.rows.is_frozen(address.row),
        ) {
            (true, true) => CellRegion::FrozenCorner,
            (true, false) => CellRegion::FrozenColumn,
            (false, true) => CellRegion::FrozenRow,
            (false, false) => CellRegion::Scrollable,
        }
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

    fn panes(frozen_columns: u32, frozen_rows: u32) -> FrozenPanes {
        let columns = AxisDimensions::new(Axis::Horizontal, &[40.0; 5], 2.0).unwrap();
        let rows = AxisDimensions::new(Axis::Vertical, &[20.0; 5], 0.0).unwrap();
        FrozenPanes {
            columns: FrozenBand::new(&columns, frozen_columns).unwrap(),
            rows: FrozenBand::new(&rows, frozen_rows).unwrap(),
        }
    }

    #[test]
    fn test_frozen_extent() {
        let panes = panes(2, 1);
        assert_eq!(panes.frozen_extent(Axis::Horizontal), 84.0);
        assert_eq!(panes.frozen_extent(Axis::Vertical), 20.0);
        assert_eq!(panes.columns.scrollable_origin(), 84.0);
    }

    #[test]
    fn test_no_frozen_band() {
        let panes = panes(0, 0);
        assert_eq!(panes.frozen_extent(Axis::Horizontal), 0.0);
        assert_eq!(panes.region(Address::new(0, 0)), CellRegion::Scrollable);
    }

    #[test]
    fn test_region_classification() {
        let panes = panes(2, 1);
        assert_eq!(panes.region(Address::new(1, 0)), CellRegion::FrozenCorner);
        assert_eq!(panes.region(Address::new(0, 3)), CellRegion::FrozenColumn);
        assert_eq!(panes.region(Address::new(4, 0)), CellRegion::FrozenRow);
        assert_eq!(panes.region(Address::new(2, 1)), CellRegion::Scrollable);
    }

    #[test]
    fn test_frozen_count_exceeding_grid() {
        let columns = AxisDimensions::new(Axis::Horizontal, &[40.0; 3], 0.0).unwrap();
        assert!(matches!(
            FrozenBand::new(&columns, 4),
            Err(GridError::FrozenOutOfRange { frozen: 4, count: 3, .. })
        ));
        assert!(FrozenBand::new(&columns, 3).is_ok());
    }
}
