//! One axis of a grid layout: sizes, frozen band and optional circular mapping.

use super::circular::CircularMapper;
use super::dimensions::AxisDimensions;
use super::frozen::FrozenBand;
use crate::error::Result;
use crate::types::Axis;

/// Everything needed to place indices of one axis inside a viewport.
#[derive(Debug, Clone)]
pub struct AxisLayout {
    pub(crate) dims: AxisDimensions,
    pub(crate) frozen: FrozenBand,
    pub(crate) circular: Option<CircularMapper>,
}

impl AxisLayout {
    /// # Errors
    /// Any configuration error raised by the dimension table, the frozen band or
    /// the circular mapper.
    pub fn new(
        axis: Axis,
        sizes: &[f32],
        spacing: f32,
        frozen_count: u32,
        circular: bool,
    ) -> Result<Self> {
        let dims = AxisDimensions::new(axis, sizes, spacing)?;
        let frozen = FrozenBand::new(&dims, frozen_count)?;
        let circular = if circular {
            Some(CircularMapper::new(&dims, &frozen)?)
        } else {
            None
        };
        Ok(Self {
            dims,
            frozen,
            circular,
        })
    }

    pub fn dimensions(&self) -> &AxisDimensions {
        &self.dims
    }

    pub fn frozen(&self) -> &FrozenBand {
        &self.frozen
    }

    pub fn circular(&self) -> Option<&CircularMapper> {
        self.circular.as_ref()
    }

    pub fn is_circular(&self) -> bool {
        self.circular.is_some()
    }

    pub fn count(&self) -> u32 {
        self.dims.count()
    }

    pub fn frozen_extent(&self) -> f32 {
        self.frozen.extent()
    }

    pub fn total(&self) -> f32 {
        self.dims.total()
    }

    /// Largest non-circular offset that keeps the viewport inside the content.
    pub fn max_offset(&self, viewport_extent: f32) -> f32 {
        (self.total() - viewport_extent).max(0.0)
    }

    /// Clamp an offset into `[0, max_offset]`; circular axes accept any offset.
    pub fn clamp_offset(&self, offset: f32, viewport_extent: f32) -> f32 {
        if self.is_circular() {
            offset
        } else {
            offset.clamp(0.0, self.max_offset(viewport_extent))
        }
    }

    /// Viewport position of the leading edge of the inclusive range `[from, to]`.
    ///
    /// Frozen ranges are pinned. On a circular axis the first repetition whose
    /// trailing edge lies past the frozen band is used.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`](crate::error::GridError::IndexOutOfRange)
    /// if either index is out of range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn screen_origin(&self, from: u32, to: u32, offset: f32) -> Result<f32> {
        let origin = self.dims.origin(from)?;
        let extent = self.dims.span_extent(from, to)?;
        if self.frozen.is_frozen(from) {
            return Ok(origin);
        }
        match &self.circular {
            None => Ok(origin - offset),
            Some(mapper) => {
                let behind = offset + self.frozen_extent() - origin - extent;
                let cycle = (behind / mapper.tile_extent()).floor() as i64 + 1;
                Ok(origin + mapper.cycle_shift(cycle) - offset)
            }
        }
    }

    /// Index drawn at viewport position `position`, if any.
    ///
    /// Positions inside a spacing gap hit nothing.
    pub fn index_at_screen(&self, position: f32, offset: f32) -> Option<u32> {
        if position < 0.0 {
            return None;
        }
        if position < self.frozen_extent() {
            return self
                .dims
                .index_at(position)
                .filter(|&index| self.frozen.is_frozen(index));
        }
        let content = position + offset;
        match &self.circular {
            None => self
                .dims
                .index_at(content)
                .filter(|&index| !self.frozen.is_frozen(index)),
            Some(mapper) => {
                let wrapped = mapper.wrap(content - self.frozen_extent());
                let index = mapper.index_at(&self.dims, wrapped.offset);
                let origin = self.dims.origin(index).ok()?;
                (self.frozen_extent() + wrapped.offset >= origin).then_some(index)
            }
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

    // Ten 50px columns, 2px gaps: column i starts at 2 + 52 * i.
    fn axis(frozen: u32, circular: bool) -> AxisLayout {
        AxisLayout::new(Axis::Horizontal, &[50.0; 10], 2.0, frozen, circular).unwrap()
    }

    #[test]
    fn test_clamp_offset() {
        let axis = axis(0, false);
        assert_eq!(axis.total(), 522.0);
        assert_eq!(axis.clamp_offset(-5.0, 200.0), 0.0);
        assert_eq!(axis.clamp_offset(1000.0, 200.0), 322.0);
        assert_eq!(axis.clamp_offset(1000.0, 600.0), 0.0);
    }

    #[test]
    fn test_circular_offset_is_never_clamped() {
        let axis = axis(0, true);
        assert_eq!(axis.clamp_offset(-5000.0, 200.0), -5000.0);
    }

    #[test]
    fn test_screen_origin_scrolls_and_pins() {
        let axis = axis(2, false);
        assert_eq!(axis.screen_origin(0, 0, 100.0).unwrap(), 2.0);
        assert_eq!(axis.screen_origin(1, 1, 100.0).unwrap(), 54.0);
        assert_eq!(axis.screen_origin(4, 5, 100.0).unwrap(), 110.0);
    }

    #[test]
    fn test_screen_origin_circular_picks_next_repetition() {
        let axis = axis(0, true);
        // Column 0 has scrolled out; its next repetition starts one tile later.
        assert_eq!(axis.screen_origin(0, 0, 60.0).unwrap(), 462.0);
        // Column 9 from the previous tile is visible at a negative offset.
        assert_eq!(axis.screen_origin(9, 9, -40.0).unwrap(), -10.0);
    }

    #[test]
    fn test_index_at_screen() {
        let axis = axis(1, false);
        assert_eq!(axis.index_at_screen(10.0, 300.0), Some(0));
        // Content x 360 falls in column 6 (314..364)
        assert_eq!(axis.index_at_screen(60.0, 300.0), Some(6));
        // Content x 313 is the gap between columns 5 and 6
        assert_eq!(axis.index_at_screen(52.0, 261.0), None);
        assert_eq!(axis.index_at_screen(-1.0, 0.0), None);
    }

    #[test]
    fn test_index_at_screen_circular() {
        let axis = axis(0, true);
        assert_eq!(axis.index_at_screen(10.0, 520.0), Some(0));
        assert_eq!(axis.index_at_screen(10.0, -52.0), Some(9));
        assert_eq!(axis.index_at_screen(1.0, 520.0), None);
    }
}
