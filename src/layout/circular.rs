//! Circular address mapping.
//!
//! On a circular axis the scrollable band (everything past the frozen band)
//! repeats forever. Content position `p` of the scrollable band in cycle `c`
//! corresponds to `p + c * tile` where `tile` is the scrollable band's extent
//! including one gap per cell, so the last cell of one cycle and the first cell
//! of the next are separated by exactly one spacing.

use super::dimensions::AxisDimensions;
use super::frozen::FrozenBand;
use crate::error::{GridError, Result};

/// An offset reduced into a single tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappedOffset {
    /// Position within the tile, in `[0, tile)`.
    pub offset: f32,
    /// Number of whole tiles skipped (negative before the first tile).
    pub cycle: i64,
}

/// Maps unbounded offsets on a circular axis onto the scrollable band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularMapper {
    /// Content position where each tile starts (the frozen extent).
    start: f32,
    tile: f32,
    first_index: u32,
}

impl CircularMapper {
    /// # Errors
    /// [`GridError::EmptyCircularBand`] if nothing remains to scroll past the
    /// frozen band.
    pub fn new(dims: &AxisDimensions, frozen: &FrozenBand) -> Result<Self> {
        let start = frozen.extent();
        let tile = dims.prefix(dims.count())? - start;
        if frozen.count() >= dims.count() || tile.is_nan() || tile <= 0.0 {
            return Err(GridError::EmptyCircularBand(dims.axis()));
        }
        Ok(Self {
            start,
            tile,
            first_index: frozen.count(),
        })
    }

    /// Length of one repetition of the scrollable band.
    pub fn tile_extent(&self) -> f32 {
        self.tile
    }

    /// Reduce `offset` into `[0, tile)`, counting the tiles skipped.
    ///
    /// `cycle * tile + offset` reconstructs the input, including inputs within
    /// rounding distance of a tile boundary.
    #[allow(clippy::cast_possible_truncation)]
    pub fn wrap(&self, offset: f32) -> WrappedOffset {
        let wrapped = offset.rem_euclid(self.tile);
        // rem_euclid can round up to exactly `tile` for tiny negative inputs
        let wrapped = if wrapped >= self.tile { 0.0 } else { wrapped };
        WrappedOffset {
            offset: wrapped,
            cycle: ((offset - wrapped) / self.tile).round() as i64,
        }
    }

    /// Scrollable index whose cell or leading gap contains the tile position `offset`.
    pub fn index_at(&self, dims: &AxisDimensions, offset: f32) -> u32 {
        let index = dims.first_ending_after(self.first_index, self.start + offset);
        index.min(dims.count().saturating_sub(1))
    }

    /// Content position of the scrollable band's origin in `cycle`.
    #[allow(clippy::cast_precision_loss)]
    pub fn cycle_shift(&self, cycle: i64) -> f32 {
        cycle as f32 * self.tile
    }

    /// Leading edge of `index` in `cycle`.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`] if `index` is not on the axis.
    pub fn absolute_origin(&self, dims: &AxisDimensions, index: u32, cycle: i64) -> Result<f32> {
        Ok(dims.origin(index)? + self.cycle_shift(cycle))
    }

    /// The tile instance of `offset` (`offset + k * tile`) closest to `reference`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn nearest_instance(&self, offset: f32, reference: f32) -> f32 {
        let k = ((reference - offset) / self.tile).round() as i64;
        offset + self.cycle_shift(k)
    }

    /// Next index after `index` within the scrollable band, wrapping to its start.
    pub fn successor(&self, dims: &AxisDimensions, index: u32) -> (u32, bool) {
        if index + 1 >= dims.count() {
            (self.first_index, true)
        } else {
            (index + 1, false)
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
    use crate::types::Axis;

    fn setup(frozen: u32) -> (AxisDimensions, CircularMapper) {
        let dims = AxisDimensions::new(Axis::Horizontal, &[10.0, 20.0, 30.0, 40.0], 1.0).unwrap();
        let band = FrozenBand::new(&dims, frozen).unwrap();
        let mapper = CircularMapper::new(&dims, &band).unwrap();
        (dims, mapper)
    }

    #[test]
    fn test_tile_extent() {
        let (_, mapper) = setup(0);
        assert_eq!(mapper.tile_extent(), 104.0);
        let (_, mapper) = setup(1);
        assert_eq!(mapper.tile_extent(), 93.0);
    }

    #[test]
    fn test_wrap_positive_and_negative() {
        let (_, mapper) = setup(0);
        assert_eq!(
            mapper.wrap(10.0),
            WrappedOffset {
                offset: 10.0,
                cycle: 0
            }
        );
        assert_eq!(
            mapper.wrap(214.0),
            WrappedOffset {
                offset: 6.0,
                cycle: 2
            }
        );
        assert_eq!(
            mapper.wrap(-4.0),
            WrappedOffset {
                offset: 100.0,
                cycle: -1
            }
        );
        assert_eq!(
            mapper.wrap(-104.0),
            WrappedOffset {
                offset: 0.0,
                cycle: -1
            }
        );
    }

    #[test]
    fn test_wrap_near_tile_boundary() {
        let (_, mapper) = setup(0);
        for k in -3i32..=3 {
            let boundary = k as f32 * 104.0;
            let neighbours = if k == 0 {
                [-1e-6, 1e-6]
            } else {
                [
                    f32::from_bits(boundary.to_bits() - 1),
                    f32::from_bits(boundary.to_bits() + 1),
                ]
            };
            for offset in neighbours {
                let wrapped = mapper.wrap(offset);
                assert!((0.0..104.0).contains(&wrapped.offset), "{offset}: {wrapped:?}");
                let rebuilt = mapper.cycle_shift(wrapped.cycle) + wrapped.offset;
                assert!((rebuilt - offset).abs() < 1e-3, "{offset}: {wrapped:?}");
            }
        }
        assert_eq!(
            mapper.wrap(-1e-6),
            WrappedOffset {
                offset: 0.0,
                cycle: 0
            }
        );
    }

    #[test]
    fn test_index_at() {
        let (dims, mapper) = setup(0);
        assert_eq!(mapper.index_at(&dims, 0.0), 0);
        assert_eq!(mapper.index_at(&dims, 10.5), 0);
        assert_eq!(mapper.index_at(&dims, 11.0), 1);
        assert_eq!(mapper.index_at(&dims, 103.5), 3);
    }

    #[test]
    fn test_index_at_skips_frozen() {
        let (dims, mapper) = setup(1);
        assert_eq!(mapper.index_at(&dims, 0.0), 1);
        assert_eq!(mapper.index_at(&dims, 92.0), 3);
    }

    #[test]
    fn test_wrap_boundary_adjacency() {
        let (dims, mapper) = setup(1);
        let last_end = dims.end(3).unwrap();
        let next_first = mapper.absolute_origin(&dims, 1, 1).unwrap();
        assert_eq!(next_first - last_end, dims.spacing());
        let last_origin = mapper.absolute_origin(&dims, 3, 0).unwrap();
        assert_eq!(next_first - last_origin, dims.size(3).unwrap() + dims.spacing());
    }

    #[test]
    fn test_nearest_instance() {
        let (_, mapper) = setup(0);
        assert_eq!(mapper.nearest_instance(10.0, 0.0), 10.0);
        assert_eq!(mapper.nearest_instance(10.0, 300.0), 322.0);
        assert_eq!(mapper.nearest_instance(100.0, 0.0), -4.0);
    }

    #[test]
    fn test_successor_wraps_to_first_scrollable() {
        let (dims, mapper) = setup(1);
        assert_eq!(mapper.successor(&dims, 2), (3, false));
        assert_eq!(mapper.successor(&dims, 3), (1, true));
    }

    #[test]
    fn test_fully_frozen_axis_cannot_be_circular() {
        let dims = AxisDimensions::new(Axis::Vertical, &[10.0, 10.0], 0.0).unwrap();
        let band = FrozenBand::new(&dims, 2).unwrap();
        assert!(matches!(
            CircularMapper::new(&dims, &band),
            Err(GridError::EmptyCircularBand(Axis::Vertical))
        ));
    }
}
