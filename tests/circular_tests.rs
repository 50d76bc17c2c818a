//! Circular scrolling tests: tiling, wrap-around visibility, alignment to the
//! nearest repetition and hit testing across the seam.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

mod common;

use common::{build, merged_grid, phone_viewport, AxisOracle};
use gridlayout::layout::{GridLayout, HorizontalAlignment, ScrollPosition, Viewport};
use gridlayout::types::{Address, Axis, CircularScrolling, GridConfig, Offset};
use gridlayout::GridError;

/// Ten 50px columns with 2px gaps: column i starts at 2 + 52i, one tile is 520.
fn ring(frozen_columns: u32) -> GridLayout {
    let config = GridConfig::uniform(10, 5, 50.0, 20.0)
        .with_spacing(2.0, 2.0)
        .with_frozen(frozen_columns, 0)
        .with_circular(CircularScrolling::HORIZONTAL);
    build(&config)
}

// ============================================================================
// ADJACENCY ACROSS THE SEAM
// ============================================================================

#[test]
fn test_seam_keeps_single_spacing_gap() {
    let layout = ring(0);
    let viewport = Viewport::new(320.0, 100.0).with_offset(Offset::new(400.0, 0.0));

    let last = layout.frame_in_viewport(Address::new(9, 0), &viewport).unwrap();
    let first = layout.frame_in_viewport(Address::new(0, 0), &viewport).unwrap();
    assert_eq!(last.x, 70.0);
    assert_eq!(last.max_x(), 120.0);
    assert_eq!(first.x, 122.0);
    assert_eq!(first.x - last.max_x(), 2.0);
}

#[test]
fn test_seam_adjacency_with_uneven_columns() {
    let config = merged_grid(0, 0, CircularScrolling::HORIZONTAL);
    let layout = build(&config);
    let oracle = AxisOracle::from_config(&config, Axis::Horizontal);
    // Put the seam in the middle of the viewport.
    let viewport = phone_viewport().with_offset(Offset::new(oracle.tile() - 160.0, 0.0));

    let last = layout.frame_in_viewport(Address::new(58, 0), &viewport).unwrap();
    let first = layout.frame_in_viewport(Address::new(0, 0), &viewport).unwrap();
    // Next-cycle origin minus last origin is the last span's size plus one gap.
    assert!((first.x - last.x - (last.width + 1.0)).abs() < 1e-2);
    assert!((first.x - last.max_x() - 1.0).abs() < 1e-2);
}

// ============================================================================
// VISIBILITY
// ============================================================================

#[test]
fn test_visible_columns_wrap_in_viewport_order() {
    let layout = ring(0);
    let viewport = Viewport::new(320.0, 100.0).with_offset(Offset::new(400.0, 0.0));
    assert_eq!(layout.visible_columns(&viewport), vec![7, 8, 9, 0, 1, 2, 3]);
}

#[test]
fn test_negative_offset_wraps_backwards() {
    let layout = ring(0);
    let viewport = Viewport::new(320.0, 100.0).with_offset(Offset::new(-100.0, 0.0));
    assert_eq!(layout.visible_columns(&viewport), vec![8, 9, 0, 1, 2, 3, 4]);
}

#[test]
fn test_viewport_wider_than_tile_reports_each_index_once() {
    let config = GridConfig::uniform(3, 2, 50.0, 20.0)
        .with_spacing(0.0, 0.0)
        .with_circular(CircularScrolling::HORIZONTAL);
    let layout = build(&config);

    let viewport = Viewport::new(400.0, 40.0);
    assert_eq!(layout.visible_columns(&viewport), vec![0, 1, 2]);

    let viewport = viewport.with_offset(Offset::new(75.0, 0.0));
    assert_eq!(layout.visible_columns(&viewport), vec![1, 2, 0]);
    assert_eq!(layout.visible_cells(&viewport).len(), 6);
}

/// The two `f32` values adjacent to `x` (a microsecond-scale step around zero).
fn neighbours(x: f32) -> [f32; 2] {
    if x == 0.0 {
        [-1e-6, 1e-6]
    } else {
        [f32::from_bits(x.to_bits() - 1), f32::from_bits(x.to_bits() + 1)]
    }
}

#[test]
fn test_offsets_next_to_tile_boundary_keep_whole_viewport() {
    let layout = ring(0);
    let viewport = Viewport::new(320.0, 100.0);
    let expected: Vec<u32> = (0..=6).collect();
    assert_eq!(layout.visible_columns(&viewport), expected);

    for tiles in [-10.0f32, -1.0, 0.0, 1.0, 10.0] {
        for offset in neighbours(tiles * 520.0) {
            let viewport = viewport.with_offset(Offset::new(offset, 0.0));
            assert_eq!(layout.visible_columns(&viewport), expected, "offset {offset}");
            assert_eq!(
                layout.visible_cells(&viewport).len(),
                expected.len() * layout.visible_rows(&viewport).len(),
                "offset {offset}"
            );
        }
    }
}

#[test]
fn test_far_offsets_match_first_tile() {
    let layout = ring(0);
    let near = Viewport::new(320.0, 100.0).with_offset(Offset::new(130.0, 0.0));
    let far = near.with_offset(Offset::new(130.0 + 520.0 * 7.0, 0.0));
    let behind = near.with_offset(Offset::new(130.0 - 520.0 * 3.0, 0.0));
    assert_eq!(layout.visible_columns(&near), layout.visible_columns(&far));
    assert_eq!(layout.visible_columns(&near), layout.visible_columns(&behind));
}

#[test]
fn test_both_axes_circular_visible_cells() {
    let config = merged_grid(0, 0, CircularScrolling::BOTH);
    let layout = build(&config);
    let columns = AxisOracle::from_config(&config, Axis::Horizontal);
    let rows = AxisOracle::from_config(&config, Axis::Vertical);

    let viewport = phone_viewport().with_offset(Offset::new(
        columns.tile() - 100.0,
        rows.tile() * -2.0 - 50.0,
    ));
    let cells = layout.visible_cells(&viewport);
    for cell in &cells {
        assert_eq!(cell.column % 2, 0);
        assert_eq!(cell.row % 2, 0);
    }
    assert!(cells.contains(&Address::new(0, 0)));
    assert!(cells.contains(&Address::new(58, 58)));
}

// ============================================================================
// SCROLLING
// ============================================================================

#[test]
fn test_centered_first_column_is_not_clamped() {
    let layout = ring(0);
    let mut viewport = Viewport::new(320.0, 100.0);

    let offset = layout
        .scroll_to_item(
            Address::new(0, 0),
            ScrollPosition::horizontal(HorizontalAlignment::CenteredHorizontally),
            &mut viewport,
        )
        .unwrap();
    assert_eq!(offset.x, -133.0);

    let frame = layout.frame_in_viewport(Address::new(0, 0), &viewport).unwrap();
    assert_eq!(frame.mid_x(), 160.0);
    assert_eq!(layout.visible_columns(&viewport)[0], 7);
}

#[test]
fn test_scroll_picks_nearest_repetition() {
    let layout = ring(2);
    let mut viewport = Viewport::new(320.0, 100.0).with_offset(Offset::new(5000.0, 0.0));

    let offset = layout
        .scroll_to_item(
            Address::new(9, 0),
            ScrollPosition::horizontal(HorizontalAlignment::Left),
            &mut viewport,
        )
        .unwrap();
    // Base offset 364 plus 11 tiles of 416
    assert_eq!(offset.x, 4940.0);
    assert!((offset.x - 5000.0).abs() <= 416.0 / 2.0);
}

#[test]
fn test_leading_alignment_after_frozen_band() {
    let layout = ring(2);
    let mut viewport = Viewport::new(320.0, 100.0);

    for column in 2..10 {
        layout
            .scroll_to_item(
                Address::new(column, 0),
                ScrollPosition::horizontal(HorizontalAlignment::Left),
                &mut viewport,
            )
            .unwrap();
        let frame = layout
            .frame_in_viewport(Address::new(column, 0), &viewport)
            .unwrap();
        // Frozen band is 2 * 52 = 104 wide
        assert!((frame.x - 106.0).abs() < 1e-3, "column {column}: {}", frame.x);

        let visible = layout.visible_columns(&viewport);
        assert_eq!(&visible[..3], &[0, 1, column]);
    }
}

#[test]
fn test_trailing_alignment_on_circular_axis() {
    let layout = ring(0);
    let mut viewport = Viewport::new(320.0, 100.0);

    layout
        .scroll_to_item(
            Address::new(9, 0),
            ScrollPosition::horizontal(HorizontalAlignment::Right),
            &mut viewport,
        )
        .unwrap();
    // Column 9 ends at 520, so the trailing offset is 520 + 2 - 320
    assert_eq!(viewport.scroll_x, 202.0);
    let frame = layout.frame_in_viewport(Address::new(9, 0), &viewport).unwrap();
    assert_eq!(frame.max_x(), 318.0);
}

// ============================================================================
// HIT TESTING AND CONFIGURATION
// ============================================================================

#[test]
fn test_cell_at_point_across_seam() {
    let layout = ring(0);
    let viewport = Viewport::new(320.0, 100.0).with_offset(Offset::new(400.0, 0.0));
    assert_eq!(layout.cell_at_point(&viewport, 130.0, 5.0), Some(Address::new(0, 0)));
    assert_eq!(layout.cell_at_point(&viewport, 100.0, 5.0), Some(Address::new(9, 0)));
    // The gap at the seam hits nothing
    assert_eq!(layout.cell_at_point(&viewport, 121.0, 5.0), None);
}

#[test]
fn test_circular_axis_without_scrollable_band_is_rejected() {
    let config = GridConfig::uniform(4, 4, 10.0, 10.0)
        .with_frozen(4, 0)
        .with_circular(CircularScrolling::HORIZONTAL);
    assert!(matches!(
        GridLayout::new(&config),
        Err(GridError::EmptyCircularBand(Axis::Horizontal))
    ));

    let config = GridConfig::uniform(4, 0, 10.0, 10.0).with_circular(CircularScrolling::VERTICAL);
    assert!(matches!(
        GridLayout::new(&config),
        Err(GridError::EmptyCircularBand(Axis::Vertical))
    ));
}

#[test]
fn test_circular_axis_is_never_clamped() {
    let layout = ring(0);
    let viewport = Viewport::new(320.0, 100.0).with_offset(Offset::new(-5000.0, -10.0));
    assert_eq!(layout.clamp_offset(&viewport), Offset::new(-5000.0, 0.0));
}
