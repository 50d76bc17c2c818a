//! Visibility resolution: which logical cells a viewport shows.

use std::collections::BTreeSet;

use super::axis::AxisLayout;
use super::grid_layout::GridLayout;
use super::viewport::Viewport;
use crate::types::{Address, Axis};

/// Indices of one axis visible at `offset` in a viewport of size `extent`.
///
/// Frozen indices starting inside the viewport come first, then scrollable
/// indices in viewport order. A scrollable index is visible when its cell
/// overlaps `[offset + frozen_extent, offset + extent)` in content space by more
/// than `tolerance`, so slivers thinner than one device pixel are skipped. On a
/// circular axis each logical index is reported at most once even when the
/// viewport is wider than one tile.
pub fn visible_indices(axis: &AxisLayout, offset: f32, extent: f32, tolerance: f32) -> Vec<u32> {
    let dims = &axis.dims;
    let frozen = axis.frozen.count();
    let tolerance = tolerance.max(0.0);

    let pinned = dims.count_starting_before(extent - tolerance).min(frozen);
    let mut indices: Vec<u32> = (0..pinned).collect();

    let lo = offset + tolerance + axis.frozen_extent();
    let hi = offset + extent - tolerance;
    if hi <= lo {
        return indices;
    }

    match &axis.circular {
        None => {
            let first = dims.first_ending_after(frozen, lo);
            let last = dims.count_starting_before(hi);
            indices.extend(first..last.max(first));
        }
        Some(mapper) => {
            let wrapped = mapper.wrap(offset + tolerance);
            let mut index = mapper.index_at(dims, wrapped.offset);
            let mut cycle = wrapped.cycle;
            for _ in frozen..dims.count() {
                let Ok(start) = mapper.absolute_origin(dims, index, cycle) else {
                    break;
                };
                if start >= hi {
                    break;
                }
                let end = start + dims.size(index).unwrap_or(0.0);
                if end > lo {
                    indices.push(index);
                }
                let (next, wrapped_around) = mapper.successor(dims, index);
                if wrapped_around {
                    cycle += 1;
                }
                index = next;
            }
        }
    }
    indices
}

impl GridLayout {
    /// Visible column indices, frozen columns first.
    pub fn visible_columns(&self, viewport: &Viewport) -> Vec<u32> {
        visible_indices(
            self.axis(Axis::Horizontal),
            viewport.scroll_x,
            viewport.width,
            viewport.pixel_epsilon(),
        )
    }

    /// Visible row indices, frozen rows first.
    pub fn visible_rows(&self, viewport: &Viewport) -> Vec<u32> {
        visible_indices(
            self.axis(Axis::Vertical),
            viewport.scroll_y,
            viewport.height,
            viewport.pixel_epsilon(),
        )
    }

    /// Every cell the viewport shows, identified by its merge-span origin.
    ///
    /// A merged span is reported once, at its origin, as soon as any of its
    /// addresses is visible. The result is sorted by column, then row.
    pub fn visible_cells(&self, viewport: &Viewport) -> Vec<Address> {
        let columns = self.visible_columns(viewport);
        let rows = self.visible_rows(viewport);

        let mut cells = BTreeSet::new();
        for &column in &columns {
            for &row in &rows {
                cells.insert(self.merges().origin_of(Address::new(column, row)));
            }
        }
        log::trace!(
            "visible_cells: {} columns x {} rows -> {} cells",
            columns.len(),
            rows.len(),
            cells.len()
        );
        cells.into_iter().collect()
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
    use crate::types::{GridConfig, Span};

    // Ten 50px columns with 2px gaps: column i spans [2 + 52i, 52 + 52i).
    fn axis(frozen: u32, circular: bool) -> AxisLayout {
        AxisLayout::new(Axis::Horizontal, &[50.0; 10], 2.0, frozen, circular).unwrap()
    }

    #[test]
    fn test_visible_at_origin() {
        assert_eq!(visible_indices(&axis(0, false), 0.0, 150.0, 0.0), vec![0, 1, 2]);
        assert_eq!(visible_indices(&axis(0, false), 0.0, 159.0, 0.0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_scrolled_partially() {
        // Window [51, 201): column 0 ends at 52, column 3 starts at 158
        assert_eq!(visible_indices(&axis(0, false), 51.0, 150.0, 0.0), vec![0, 1, 2, 3]);
        // Window [52, 202): column 0 has fully scrolled out
        assert_eq!(visible_indices(&axis(0, false), 52.0, 150.0, 0.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_sliver_within_tolerance_is_hidden() {
        // Column 0 ends at 52: half a pixel of it remains at offset 51.5
        assert_eq!(visible_indices(&axis(0, false), 51.5, 150.0, 1.0), vec![1, 2, 3]);
        assert_eq!(visible_indices(&axis(0, false), 51.5, 150.0, 0.25), vec![0, 1, 2, 3]);
        // Column 3 starts at 158, half a pixel before the far edge
        assert_eq!(visible_indices(&axis(0, false), 8.5, 150.0, 1.0), vec![0, 1, 2]);
    }

    #[test]
    fn test_circular_sliver_within_tolerance_is_hidden() {
        // Column 9 of the previous tile ends at 0, column 0 starts at 2
        assert_eq!(visible_indices(&axis(0, true), -0.5, 100.0, 1.0), vec![0, 1]);
        assert_eq!(visible_indices(&axis(0, true), -0.5, 100.0, 0.0), vec![9, 0, 1]);
    }

    #[test]
    fn test_frozen_band_always_included() {
        // Frozen band [0, 104); scrollable window in content space [404, 600)
        let visible = visible_indices(&axis(2, false), 300.0, 300.0, 0.0);
        assert_eq!(visible, vec![0, 1, 7, 8, 9]);
    }

    #[test]
    fn test_viewport_smaller_than_frozen_band() {
        assert_eq!(visible_indices(&axis(3, false), 0.0, 60.0, 0.0), vec![0, 1]);
    }

    #[test]
    fn test_circular_wraps_past_the_end() {
        // Tile is 520px. Window [480, 680) covers column 9 then columns 0..=3
        let visible = visible_indices(&axis(0, true), 480.0, 200.0, 0.0);
        assert_eq!(visible, vec![9, 0, 1, 2, 3]);
    }

    #[test]
    fn test_circular_negative_offset() {
        let visible = visible_indices(&axis(0, true), -60.0, 100.0, 0.0);
        assert_eq!(visible, vec![8, 9, 0]);
    }

    #[test]
    fn test_circular_viewport_wider_than_tile_reports_each_index_once() {
        let visible = visible_indices(&axis(0, true), 0.0, 2000.0, 0.0);
        assert_eq!(visible, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_visible_cells_dedup_merges() {
        let layout = GridLayout::new(
            &GridConfig::uniform(4, 4, 50.0, 20.0)
                .with_spacing(0.0, 0.0)
                .with_merges([Span::parse("A1:B2").unwrap()]),
        )
        .unwrap();
        let cells = layout.visible_cells(&Viewport::new(200.0, 80.0));
        assert_eq!(cells.len(), 13);
        assert!(cells.contains(&Address::new(0, 0)));
        assert!(!cells.contains(&Address::new(1, 1)));
    }

    #[test]
    fn test_partially_visible_merge_reports_origin() {
        let layout = GridLayout::new(
            &GridConfig::uniform(4, 4, 50.0, 20.0)
                .with_spacing(0.0, 0.0)
                .with_merges([Span::parse("A1:B2").unwrap()]),
        )
        .unwrap();
        // Column 0 and row 0 have scrolled out but B2 is still visible
        let viewport = Viewport::new(60.0, 30.0).with_offset(crate::types::Offset::new(55.0, 25.0));
        let cells = layout.visible_cells(&viewport);
        assert!(cells.contains(&Address::new(0, 0)));
        assert!(!cells.contains(&Address::new(1, 1)));
    }
}
