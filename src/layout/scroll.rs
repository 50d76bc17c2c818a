//! Scroll target calculation: the offset that brings a cell to an alignment.
//!
//! For an axis with frozen extent `F`, viewport extent `V`, spacing `sp`, and a
//! target span whose cells cover `[s0, s1)` in content space:
//!
//! - leading: `s0 - sp - F` (span starts one gap after the frozen band)
//! - trailing: `s1 + sp - V` (one gap remains before the viewport edge)
//! - centered: `(s0 + s1) / 2 - (F + V) / 2` (centered in the scrollable part)
//!
//! Non-circular axes clamp the result into `[0, total - V]`. Circular axes never
//! clamp; they pick the repetition of the target closest to the current offset.

use serde::{Deserialize, Serialize};

use super::axis::AxisLayout;
use super::grid_layout::GridLayout;
use super::viewport::Viewport;
use crate::error::Result;
use crate::types::{Address, Axis, Offset};

/// Alignment along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisAlignment {
    Leading,
    Centered,
    Trailing,
}

/// Horizontal scroll alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    Left,
    CenteredHorizontally,
    Right,
}

/// Vertical scroll alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    CenteredVertically,
    Bottom,
}

impl From<HorizontalAlignment> for AxisAlignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => AxisAlignment::Leading,
            HorizontalAlignment::CenteredHorizontally => AxisAlignment::Centered,
            HorizontalAlignment::Right => AxisAlignment::Trailing,
        }
    }
}

impl From<VerticalAlignment> for AxisAlignment {
    fn from(alignment: VerticalAlignment) -> Self {
        match alignment {
            VerticalAlignment::Top => AxisAlignment::Leading,
            VerticalAlignment::CenteredVertically => AxisAlignment::Centered,
            VerticalAlignment::Bottom => AxisAlignment::Trailing,
        }
    }
}

/// Requested placement of a scroll target. `None` leaves that axis where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPosition {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
}

impl ScrollPosition {
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal: Some(horizontal),
            vertical: Some(vertical),
        }
    }

    pub const fn horizontal(alignment: HorizontalAlignment) -> Self {
        Self {
            horizontal: Some(alignment),
            vertical: None,
        }
    }

    pub const fn vertical(alignment: VerticalAlignment) -> Self {
        Self {
            horizontal: None,
            vertical: Some(alignment),
        }
    }

    pub fn along(&self, axis: Axis) -> Option<AxisAlignment> {
        match axis {
            Axis::Horizontal => self.horizontal.map(AxisAlignment::from),
            Axis::Vertical => self.vertical.map(AxisAlignment::from),
        }
    }
}

/// Offset along one axis that places the inclusive range `[from, to]` at
/// `alignment`, starting from `current` in a viewport of size `extent`.
///
/// Frozen targets are already pinned, so `current` is returned unchanged.
///
/// # Errors
/// [`GridError::IndexOutOfRange`](crate::error::GridError::IndexOutOfRange)
/// if either index is out of range.
pub fn axis_offset(
    axis: &AxisLayout,
    from: u32,
    to: u32,
    alignment: AxisAlignment,
    current: f32,
    extent: f32,
) -> Result<f32> {
    let dims = axis.dimensions();
    let start = dims.origin(from)?;
    let end = dims.end(to)?;
    if axis.frozen().is_frozen(from) {
        return Ok(current);
    }

    let frozen = axis.frozen_extent();
    let spacing = dims.spacing();
    let wanted = match alignment {
        AxisAlignment::Leading => start - spacing - frozen,
        AxisAlignment::Trailing => end + spacing - extent,
        AxisAlignment::Centered => (start + end) / 2.0 - (frozen + extent) / 2.0,
    };

    let offset = match axis.circular() {
        Some(mapper) => mapper.nearest_instance(wanted, current),
        None => {
            let clamped = axis.clamp_offset(wanted, extent);
            if (clamped - wanted).abs() > f32::EPSILON {
                log::trace!(
                    "{} {from}..={to} {alignment:?}: offset {wanted} clamped to {clamped}",
                    dims.axis()
                );
            }
            clamped
        }
    };
    Ok(offset)
}

impl GridLayout {
    /// Scroll offset that brings the cell at `target` to `position`.
    ///
    /// The target is resolved to its merged span first. Axes without a requested
    /// alignment, and axes on which the target is frozen, keep the viewport's
    /// current offset.
    ///
    /// # Errors
    /// [`GridError::AddressOutOfRange`](crate::error::GridError::AddressOutOfRange)
    /// if `target` is outside the grid.
    pub fn scroll_offset(
        &self,
        target: Address,
        position: ScrollPosition,
        viewport: &Viewport,
    ) -> Result<Offset> {
        let span = self.span_containing(target)?;
        let mut offset = viewport.offset();
        for axis in Axis::BOTH {
            let Some(alignment) = position.along(axis) else {
                continue;
            };
            let value = axis_offset(
                self.axis(axis),
                span.start(axis),
                span.end(axis),
                alignment,
                viewport.offset_along(axis),
                viewport.extent(axis),
            )?;
            match axis {
                Axis::Horizontal => offset.x = value,
                Axis::Vertical => offset.y = value,
            }
        }
        Ok(offset)
    }

    /// Apply [`scroll_offset`](Self::scroll_offset) to `viewport`.
    ///
    /// # Errors
    /// Same as [`scroll_offset`](Self::scroll_offset).
    pub fn scroll_to_item(
        &self,
        target: Address,
        position: ScrollPosition,
        viewport: &mut Viewport,
    ) -> Result<Offset> {
        let offset = self.scroll_offset(target, position, viewport)?;
        viewport.set_offset(offset);
        Ok(offset)
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
    use test_case::test_case;

    // Ten 50px columns with 2px gaps: column i spans [2 + 52i, 52 + 52i), total 522.
    fn axis(frozen: u32, circular: bool) -> AxisLayout {
        AxisLayout::new(Axis::Horizontal, &[50.0; 10], 2.0, frozen, circular).unwrap()
    }

    #[test_case(AxisAlignment::Leading, 156.0; "leading")]
    #[test_case(AxisAlignment::Centered, 83.0; "centered")]
    #[test_case(AxisAlignment::Trailing, 10.0; "trailing")]
    fn test_plain_alignment(alignment: AxisAlignment, expected: f32) {
        // Column 3 spans [158, 208) in a 200px viewport
        let offset = axis_offset(&axis(0, false), 3, 3, alignment, 0.0, 200.0).unwrap();
        assert_eq!(offset, expected);
    }

    #[test_case(AxisAlignment::Leading; "leading")]
    #[test_case(AxisAlignment::Centered; "centered")]
    #[test_case(AxisAlignment::Trailing; "trailing")]
    fn test_first_column_clamps_to_zero(alignment: AxisAlignment) {
        let offset = axis_offset(&axis(0, false), 0, 0, alignment, 120.0, 200.0).unwrap();
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn test_leading_past_the_end_clamps_to_max() {
        let offset = axis_offset(&axis(0, false), 9, 9, AxisAlignment::Leading, 0.0, 200.0).unwrap();
        assert_eq!(offset, 322.0);
    }

    #[test]
    fn test_frozen_band_shifts_leading_and_centered() {
        // Frozen extent 104: column 5 starts at 262
        let axis = axis(2, false);
        assert_eq!(
            axis_offset(&axis, 5, 5, AxisAlignment::Leading, 0.0, 300.0).unwrap(),
            156.0
        );
        assert_eq!(
            axis_offset(&axis, 5, 5, AxisAlignment::Centered, 0.0, 300.0).unwrap(),
            85.0
        );
    }

    #[test]
    fn test_frozen_target_keeps_current_offset() {
        let offset = axis_offset(&axis(2, false), 1, 1, AxisAlignment::Trailing, 77.0, 300.0).unwrap();
        assert_eq!(offset, 77.0);
    }

    #[test]
    fn test_content_smaller_than_viewport() {
        let offset = axis_offset(&axis(0, false), 5, 5, AxisAlignment::Centered, 0.0, 1000.0).unwrap();
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn test_circular_centering_is_not_clamped() {
        let offset = axis_offset(&axis(0, true), 0, 0, AxisAlignment::Centered, 0.0, 200.0).unwrap();
        assert_eq!(offset, -73.0);
    }

    #[test]
    fn test_circular_picks_nearest_repetition() {
        // Tile is 520px; column 2 leading is 104 + 520k
        let offset = axis_offset(&axis(0, true), 2, 2, AxisAlignment::Leading, 5000.0, 200.0).unwrap();
        assert_eq!(offset, 4784.0);
    }

    #[test]
    fn test_scroll_position_along() {
        let position = ScrollPosition::horizontal(HorizontalAlignment::Right);
        assert_eq!(position.along(Axis::Horizontal), Some(AxisAlignment::Trailing));
        assert_eq!(position.along(Axis::Vertical), None);
        let position = ScrollPosition::new(
            HorizontalAlignment::CenteredHorizontally,
            VerticalAlignment::Top,
        );
        assert_eq!(position.along(Axis::Horizontal), Some(AxisAlignment::Centered));
        assert_eq!(position.along(Axis::Vertical), Some(AxisAlignment::Leading));
    }

    #[test]
    fn test_scroll_position_json() {
        let position: ScrollPosition =
            serde_json::from_str(r#"{"horizontal": "right", "vertical": "centered_vertically"}"#)
                .unwrap();
        assert_eq!(
            position,
            ScrollPosition::new(
                HorizontalAlignment::Right,
                VerticalAlignment::CenteredVertically
            )
        );
    }
}
