//! Layout engine for computing cell positions, visibility and scroll targets.
//!
//! This module handles:
//! - Pre-computing cell positions from column widths, row heights and spacing
//! - Merge span lookup and validation
//! - Frozen pane splitting
//! - Circular (infinitely repeating) axes
//! - Visible cell resolution for a viewport
//! - Scroll offsets that align a cell to a requested edge

mod axis;
mod circular;
mod dimensions;
mod frozen;
mod grid_layout;
mod merges;
mod scroll;
mod viewport;
mod visibility;

pub use axis::AxisLayout;
pub use circular::{CircularMapper, WrappedOffset};
pub use dimensions::AxisDimensions;
pub use frozen::{CellRegion, FrozenBand, FrozenPanes};
pub use grid_layout::GridLayout;
pub use merges::MergeIndex;
pub use scroll::{
    axis_offset, AxisAlignment, HorizontalAlignment, ScrollPosition, VerticalAlignment,
};
pub use viewport::Viewport;
pub use visibility::visible_indices;
