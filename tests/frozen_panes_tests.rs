//! Frozen pane tests: pinned bands, region classification and scrolling with
//! frozen leading columns and rows.
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

use common::{assert_within_pixel, build, merged_grid, phone_viewport, AxisOracle};
use gridlayout::layout::{
    CellRegion, GridLayout, HorizontalAlignment, ScrollPosition, VerticalAlignment, Viewport,
};
use gridlayout::types::{Address, Axis, CircularScrolling, GridConfig, Offset};
use gridlayout::GridError;

// ============================================================================
// SCROLL TO LAST SPAN WITH FROZEN HEADERS
// ============================================================================

#[test]
fn test_scroll_to_last_span_right_bottom_keeps_frozen_pinned() {
    let config = merged_grid(2, 2, CircularScrolling::NONE);
    let layout = build(&config);
    let mut viewport = phone_viewport();

    let target = Address::new(58, 58);
    let position = ScrollPosition::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
    let offset = layout.scroll_to_item(target, position, &mut viewport).unwrap();

    // The last span ends the content, so this is the maximum scroll offset.
    let (width, height) = layout.content_size();
    assert_within_pixel(offset.x, width - viewport.width, &viewport, "offset x");
    assert_within_pixel(offset.y, height - viewport.height, &viewport, "offset y");

    // Target's trailing edge plus one gap meets the viewport's far edge.
    let frame = layout.frame_in_viewport(target, &viewport).unwrap();
    assert_within_pixel(frame.max_x() + 1.0, viewport.width, &viewport, "trailing x");
    assert_within_pixel(frame.max_y() + 1.0, viewport.height, &viewport, "trailing y");

    // Frozen corner span (columns/rows 0-1) stays at its content position.
    let corner = layout.frame_in_viewport(Address::new(1, 1), &viewport).unwrap();
    assert_eq!(corner, layout.rect(Address::new(0, 0)).unwrap());

    let cells = layout.visible_cells(&viewport);
    assert!(cells.contains(&Address::new(0, 0)));
    assert!(cells.contains(&Address::new(0, 58)));
    assert!(cells.contains(&Address::new(58, 0)));
    assert!(cells.contains(&target));
}

#[test]
fn test_frozen_target_does_not_scroll() {
    let config = merged_grid(2, 2, CircularScrolling::NONE);
    let layout = build(&config);
    let viewport = phone_viewport().with_offset(Offset::new(500.0, 300.0));

    for position in [
        ScrollPosition::new(HorizontalAlignment::Left, VerticalAlignment::Top),
        ScrollPosition::new(
            HorizontalAlignment::CenteredHorizontally,
            VerticalAlignment::CenteredVertically,
        ),
        ScrollPosition::new(HorizontalAlignment::Right, VerticalAlignment::Bottom),
    ] {
        let offset = layout
            .scroll_offset(Address::new(0, 0), position, &viewport)
            .unwrap();
        assert_eq!(offset, Offset::new(500.0, 300.0));
    }
}

#[test]
fn test_frozen_column_pins_only_horizontally() {
    let config = merged_grid(2, 2, CircularScrolling::NONE);
    let layout = build(&config);
    let viewport = phone_viewport().with_offset(Offset::new(500.0, 300.0));
    let rows = AxisOracle::from_config(&config, Axis::Vertical);

    let frame = layout.frame_in_viewport(Address::new(0, 20), &viewport).unwrap();
    assert_eq!(frame.x, 1.0);
    assert!((frame.y - (rows.width_before(20) + 1.0 - 300.0)).abs() < 1e-3);
    assert_eq!(
        layout.region(Address::new(0, 20)).unwrap(),
        CellRegion::FrozenColumn
    );
}

#[test]
fn test_frozen_band_always_visible() {
    let config = merged_grid(2, 2, CircularScrolling::NONE);
    let layout = build(&config);
    let mut viewport = phone_viewport();

    for step in 0..20 {
        viewport.set_offset(Offset::new(step as f32 * 150.0, step as f32 * 90.0));
        viewport.set_offset(layout.clamp_offset(&viewport));
        let columns = layout.visible_columns(&viewport);
        let rows = layout.visible_rows(&viewport);
        assert_eq!(&columns[..2], &[0, 1]);
        assert_eq!(&rows[..2], &[0, 1]);
        assert!(layout.visible_cells(&viewport).contains(&Address::new(0, 0)));
    }
}

#[test]
fn test_scrollable_cells_hidden_under_frozen_band_are_not_visible() {
    let config = GridConfig::uniform(10, 10, 100.0, 30.0)
        .with_spacing(0.0, 0.0)
        .with_frozen(1, 0);
    let layout = build(&config);
    // Content window for the scrollable band is [150 + 100, 150 + 300) = [250, 450)
    let viewport = Viewport::new(300.0, 100.0).with_offset(Offset::new(150.0, 0.0));
    assert_eq!(layout.visible_columns(&viewport), vec![0, 2, 3, 4]);
}

// ============================================================================
// ALIGNMENT WITH A FROZEN BAND
// ============================================================================

#[test]
fn test_leading_alignment_lands_after_frozen_band() {
    let config = GridConfig::uniform(20, 20, 50.0, 20.0)
        .with_spacing(2.0, 2.0)
        .with_frozen(3, 0);
    let layout = build(&config);
    let mut viewport = Viewport::new(400.0, 200.0);

    layout
        .scroll_to_item(
            Address::new(10, 0),
            ScrollPosition::horizontal(HorizontalAlignment::Left),
            &mut viewport,
        )
        .unwrap();
    let frame = layout.frame_in_viewport(Address::new(10, 0), &viewport).unwrap();
    // Frozen band is 3 * 52 = 156 wide
    assert_eq!(frame.x, 158.0);
    assert_eq!(viewport.scroll_y, 0.0);
}

#[test]
fn test_centered_alignment_uses_scrollable_part_of_viewport() {
    let config = GridConfig::uniform(20, 20, 50.0, 20.0)
        .with_spacing(2.0, 2.0)
        .with_frozen(3, 0);
    let layout = build(&config);
    let mut viewport = Viewport::new(400.0, 200.0);

    layout
        .scroll_to_item(
            Address::new(10, 0),
            ScrollPosition::horizontal(HorizontalAlignment::CenteredHorizontally),
            &mut viewport,
        )
        .unwrap();
    let frame = layout.frame_in_viewport(Address::new(10, 0), &viewport).unwrap();
    assert_eq!(frame.mid_x(), (156.0 + 400.0) / 2.0);
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[test]
fn test_frozen_counts_exceeding_grid_are_rejected() {
    let config = GridConfig::uniform(4, 4, 10.0, 10.0).with_frozen(5, 0);
    assert!(matches!(
        GridLayout::new(&config),
        Err(GridError::FrozenOutOfRange {
            axis: Axis::Horizontal,
            frozen: 5,
            count: 4
        })
    ));
    let config = GridConfig::uniform(4, 4, 10.0, 10.0).with_frozen(0, 9);
    assert!(matches!(
        GridLayout::new(&config),
        Err(GridError::FrozenOutOfRange {
            axis: Axis::Vertical,
            ..
        })
    ));
}

#[test]
fn test_fully_frozen_grid_is_allowed() {
    let config = GridConfig::uniform(4, 4, 10.0, 10.0).with_frozen(4, 4);
    let layout = build(&config);
    let viewport = Viewport::new(100.0, 100.0).with_offset(Offset::new(30.0, 30.0));
    assert_eq!(layout.visible_cells(&viewport).len(), 16);
    for cell in layout.visible_cells(&viewport) {
        assert_eq!(layout.region(cell).unwrap(), CellRegion::FrozenCorner);
    }
}

#[test]
fn test_merge_across_frozen_boundary_is_rejected() {
    // 2x2 merges starting at odd indices straddle a boundary at 2
    let config = merged_grid(3, 0, CircularScrolling::NONE);
    assert!(matches!(
        GridLayout::new(&config),
        Err(GridError::SpanCrossesFrozenBoundary {
            axis: Axis::Horizontal,
            ..
        })
    ));
}
