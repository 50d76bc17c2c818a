//! Immutable layout of a whole grid.
//!
//! Built once from a [`GridConfig`] and never mutated; a configuration change
//! builds a new `GridLayout` that the owner swaps in wholesale. All queries take
//! `&self`, so a layout can be shared across threads.

use super::axis::AxisLayout;
use super::frozen::{CellRegion, FrozenPanes};
use super::merges::MergeIndex;
use super::viewport::Viewport;
use crate::error::{GridError, Result};
use crate::types::{Address, Axis, GridConfig, Offset, Rect, Span};

/// Pre-computed layout data for a grid
#[derive(Debug, Clone)]
pub struct GridLayout {
    columns: AxisLayout,
    rows: AxisLayout,
    merges: MergeIndex,
}

impl GridLayout {
    /// Build and validate a layout.
    ///
    /// # Errors
    /// Returns a configuration error if any size or spacing is invalid, a frozen
    /// count exceeds the grid, a circular axis has no scrollable band, or the
    /// merged spans are invalid or overlap. No partial layout is produced.
    pub fn new(config: &GridConfig) -> Result<Self> {
        let columns = AxisLayout::new(
            Axis::Horizontal,
            &config.column_widths,
            config.intercell_spacing.width,
            config.frozen_columns,
            config.circular_scrolling.horizontal,
        )?;
        let rows = AxisLayout::new(
            Axis::Vertical,
            &config.row_heights,
            config.intercell_spacing.height,
            config.frozen_rows,
            config.circular_scrolling.vertical,
        )?;
        let merges = MergeIndex::new(
            &config.merged_cells,
            columns.count(),
            rows.count(),
            (config.frozen_columns, config.frozen_rows),
        )?;

        log::debug!(
            "GridLayout: {}x{} cells, frozen {}x{}, circular h={} v={}, {} merged spans, content {}x{}",
            columns.count(),
            rows.count(),
            config.frozen_columns,
            config.frozen_rows,
            columns.is_circular(),
            rows.is_circular(),
            merges.spans().len(),
            columns.total(),
            rows.total(),
        );

        Ok(Self {
            columns,
            rows,
            merges,
        })
    }

    pub fn axis(&self, axis: Axis) -> &AxisLayout {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    pub fn column_count(&self) -> u32 {
        self.columns.count()
    }

    pub fn row_count(&self) -> u32 {
        self.rows.count()
    }

    pub fn merges(&self) -> &MergeIndex {
        &self.merges
    }

    pub fn frozen_panes(&self) -> FrozenPanes {
        FrozenPanes {
            columns: *self.columns.frozen(),
            rows: *self.rows.frozen(),
        }
    }

    /// Total content size (width, height); a circular axis reports one tile
    /// plus its frozen band.
    pub fn content_size(&self) -> (f32, f32) {
        (self.columns.total(), self.rows.total())
    }

    fn check(&self, address: Address) -> Result<()> {
        if address.column < self.column_count() && address.row < self.row_count() {
            Ok(())
        } else {
            Err(GridError::AddressOutOfRange(address))
        }
    }

    /// Span owning `address` (its unit span when unmerged).
    ///
    /// # Errors
    /// [`GridError::AddressOutOfRange`] if `address` is outside the grid.
    pub fn span_containing(&self, address: Address) -> Result<Span> {
        self.check(address)?;
        Ok(self.merges.span_containing(address))
    }

    /// Pane `address` is drawn in.
    ///
    /// # Errors
    /// [`GridError::AddressOutOfRange`] if `address` is outside the grid.
    pub fn region(&self, address: Address) -> Result<CellRegion> {
        self.check(address)?;
        Ok(self.frozen_panes().region(address))
    }

    /// Content-space rectangle of the cell (or merged span) at `address`.
    ///
    /// On circular axes this is the rectangle in the first tile.
    ///
    /// # Errors
    /// [`GridError::AddressOutOfRange`] if `address` is outside the grid.
    pub fn rect(&self, address: Address) -> Result<Rect> {
        let span = self.span_containing(address)?;
        let columns = self.columns.dimensions();
        let rows = self.rows.dimensions();
        Ok(Rect::new(
            columns.origin(span.from.column)?,
            rows.origin(span.from.row)?,
            columns.span_extent(span.from.column, span.to.column)?,
            rows.span_extent(span.from.row, span.to.row)?,
        ))
    }

    /// Viewport-space rectangle of the cell (or merged span) at `address`.
    ///
    /// Frozen axes are pinned at their content position, scrollable axes are
    /// shifted by the viewport offset. The rectangle is not clipped.
    ///
    /// # Errors
    /// [`GridError::AddressOutOfRange`] if `address` is outside the grid.
    pub fn frame_in_viewport(&self, address: Address, viewport: &Viewport) -> Result<Rect> {
        let span = self.span_containing(address)?;
        let rect = self.rect(address)?;
        Ok(Rect::new(
            self.columns
                .screen_origin(span.from.column, span.to.column, viewport.scroll_x)?,
            self.rows
                .screen_origin(span.from.row, span.to.row, viewport.scroll_y)?,
            rect.width,
            rect.height,
        ))
    }

    /// Cell drawn at viewport position (`x`, `y`), normalized to its span origin.
    ///
    /// Returns `None` outside the viewport, past the content, or in a spacing gap.
    pub fn cell_at_point(&self, viewport: &Viewport, x: f32, y: f32) -> Option<Address> {
        if x >= viewport.width || y >= viewport.height {
            return None;
        }
        let column = self.columns.index_at_screen(x, viewport.scroll_x)?;
        let row = self.rows.index_at_screen(y, viewport.scroll_y)?;
        Some(self.merges.origin_of(Address::new(column, row)))
    }

    /// Viewport offset clamped into the scrollable range of each non-circular axis.
    pub fn clamp_offset(&self, viewport: &Viewport) -> Offset {
        Offset::new(
            self.columns.clamp_offset(viewport.scroll_x, viewport.width),
            self.rows.clamp_offset(viewport.scroll_y, viewport.height),
        )
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
    use crate::types::CircularScrolling;

    fn config() -> GridConfig {
        GridConfig::uniform(10, 20, 50.0, 20.0)
            .with_spacing(2.0, 1.0)
            .with_frozen(1, 2)
            .with_merges([Span::parse("C4:D6").unwrap()])
    }

    #[test]
    fn test_basic_layout() {
        let layout = GridLayout::new(&config()).unwrap();
        assert_eq!(layout.column_count(), 10);
        assert_eq!(layout.row_count(), 20);
        assert_eq!(layout.content_size(), (522.0, 421.0));
    }

    #[test]
    fn test_rect_of_plain_cell() {
        let layout = GridLayout::new(&config()).unwrap();
        let rect = layout.rect(Address::new(1, 1)).unwrap();
        assert_eq!(rect, Rect::new(54.0, 22.0, 50.0, 20.0));
    }

    #[test]
    fn test_rect_of_merged_cell() {
        let layout = GridLayout::new(&config()).unwrap();
        let expected = Rect::new(106.0, 64.0, 102.0, 62.0);
        for address in Span::parse("C4:D6").unwrap().addresses() {
            assert_eq!(layout.rect(address).unwrap(), expected);
        }
    }

    #[test]
    fn test_out_of_range_address() {
        let layout = GridLayout::new(&config()).unwrap();
        assert!(matches!(
            layout.rect(Address::new(10, 0)),
            Err(GridError::AddressOutOfRange(_))
        ));
        assert!(layout.region(Address::new(0, 20)).is_err());
    }

    #[test]
    fn test_frame_in_viewport_pins_frozen_cells() {
        let layout = GridLayout::new(&config()).unwrap();
        let viewport = Viewport::new(300.0, 200.0).with_offset(Offset::new(100.0, 40.0));
        let corner = layout.frame_in_viewport(Address::new(0, 0), &viewport).unwrap();
        assert_eq!((corner.x, corner.y), (2.0, 1.0));
        let frozen_row = layout.frame_in_viewport(Address::new(5, 1), &viewport).unwrap();
        assert_eq!((frozen_row.x, frozen_row.y), (162.0, 22.0));
        let body = layout.frame_in_viewport(Address::new(3, 5), &viewport).unwrap();
        assert_eq!((body.x, body.y), (6.0, 24.0));
        assert_eq!(body.width, 102.0);
    }

    #[test]
    fn test_region() {
        let layout = GridLayout::new(&config()).unwrap();
        assert_eq!(
            layout.region(Address::new(0, 1)).unwrap(),
            CellRegion::FrozenCorner
        );
        assert_eq!(
            layout.region(Address::new(4, 4)).unwrap(),
            CellRegion::Scrollable
        );
    }

    #[test]
    fn test_cell_at_point() {
        let layout = GridLayout::new(&config()).unwrap();
        let viewport = Viewport::new(300.0, 200.0);
        assert_eq!(
            layout.cell_at_point(&viewport, 10.0, 10.0),
            Some(Address::new(0, 0))
        );
        assert_eq!(
            layout.cell_at_point(&viewport, 150.0, 100.0),
            Some(Address::new(2, 3))
        );
        assert_eq!(layout.cell_at_point(&viewport, 1.0, 10.0), None);
        assert_eq!(layout.cell_at_point(&viewport, 310.0, 10.0), None);
    }

    #[test]
    fn test_clamp_offset() {
        let layout = GridLayout::new(&config()).unwrap();
        let viewport = Viewport::new(300.0, 200.0).with_offset(Offset::new(-10.0, 9999.0));
        assert_eq!(layout.clamp_offset(&viewport), Offset::new(0.0, 221.0));
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(
            GridLayout::new(&config().with_frozen(11, 0)),
            Err(GridError::FrozenOutOfRange { .. })
        ));
        assert!(matches!(
            GridLayout::new(&config().with_merges([Span::parse("D6:E7").unwrap()])),
            Err(GridError::OverlappingSpans { .. })
        ));
        let mut bad = config();
        bad.row_heights[3] = -1.0;
        assert!(matches!(
            GridLayout::new(&bad),
            Err(GridError::InvalidSize {
                axis: Axis::Vertical,
                index: 3,
                ..
            })
        ));
        assert!(matches!(
            GridLayout::new(
                &config()
                    .with_frozen(10, 0)
                    .with_circular(CircularScrolling::HORIZONTAL)
            ),
            Err(GridError::EmptyCircularBand(Axis::Horizontal))
        ));
    }
}
