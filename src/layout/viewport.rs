//! Viewport state: the only mutable input of the layout engine.

use serde::{Deserialize, Serialize};

use crate::types::{Axis, Offset};

/// Visible area of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Horizontal scroll offset in content coordinates
    pub scroll_x: f32,
    /// Vertical scroll offset in content coordinates
    pub scroll_y: f32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// Device pixels per layout pixel (2.0 on a retina display)
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Viewport of the given size at offset zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.set_offset(offset);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn offset(&self) -> Offset {
        Offset::new(self.scroll_x, self.scroll_y)
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.scroll_x = offset.x;
        self.scroll_y = offset.y;
    }

    /// Scroll offset along `axis`.
    pub fn offset_along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.scroll_x,
            Axis::Vertical => self.scroll_y,
        }
    }

    /// Size along `axis`.
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// One device pixel in layout units; the tolerance for edge comparisons.
    pub fn pixel_epsilon(&self) -> f32 {
        if self.scale > 0.0 {
            1.0 / self.scale
        } else {
            1.0
        }
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Scroll by delta amounts, without clamping.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
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

    #[test]
    fn test_viewport_initial_scroll_zero() {
        let viewport = Viewport::new(320.0, 480.0);
        assert_eq!(viewport.offset(), Offset::new(0.0, 0.0));
        assert_eq!(viewport.extent(Axis::Horizontal), 320.0);
        assert_eq!(viewport.extent(Axis::Vertical), 480.0);
    }

    #[test]
    fn test_pixel_epsilon_follows_scale() {
        assert_eq!(Viewport::new(1.0, 1.0).pixel_epsilon(), 1.0);
        assert_eq!(Viewport::new(1.0, 1.0).with_scale(2.0).pixel_epsilon(), 0.5);
        assert_eq!(Viewport::new(1.0, 1.0).with_scale(0.0).pixel_epsilon(), 1.0);
    }

    #[test]
    fn test_scroll_by_accumulates() {
        let mut viewport = Viewport::new(100.0, 100.0).with_offset(Offset::new(5.0, 6.0));
        viewport.scroll_by(10.0, -6.0);
        assert_eq!(viewport.offset_along(Axis::Horizontal), 15.0);
        assert_eq!(viewport.offset_along(Axis::Vertical), 0.0);
    }
}
