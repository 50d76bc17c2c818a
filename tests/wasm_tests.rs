//! `GridView` tests through the JavaScript-facing API (run with `wasm-pack test`).
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use gridlayout::layout::{HorizontalAlignment, ScrollPosition, VerticalAlignment};
use gridlayout::GridView;
use wasm_bindgen_test::*;

const CONFIG: &str = r#"{
    "column_widths": [60, 60, 60, 60, 60, 60, 60, 60, 60, 60],
    "row_heights": [20, 20, 20, 20, 20, 20, 20, 20, 20, 20],
    "intercell_spacing": {"width": 0, "height": 0},
    "frozen_columns": 1,
    "merged_cells": ["B2:C3"]
}"#;

#[wasm_bindgen_test]
fn test_view_from_json() {
    let view = GridView::new(CONFIG, 200.0, 100.0, 2.0).unwrap();
    assert_eq!(view.content_width(), 600.0);
    assert_eq!(view.content_height(), 200.0);
    assert_eq!(view.cell_at(130.0, 30.0), Some(vec![1, 1]));
}

#[wasm_bindgen_test]
fn test_invalid_json_is_rejected() {
    assert!(GridView::new("{", 200.0, 100.0, 1.0).is_err());
    let mut view = GridView::new(CONFIG, 200.0, 100.0, 1.0).unwrap();
    assert!(view.configure(r#"{"column_widths": [10], "frozen_columns": 3}"#).is_err());
    assert_eq!(view.content_width(), 600.0);
}

#[wasm_bindgen_test]
fn test_scroll_to_item_from_js_position() {
    let mut view = GridView::new(CONFIG, 200.0, 100.0, 1.0).unwrap();
    let position = serde_wasm_bindgen::to_value(&ScrollPosition::new(
        HorizontalAlignment::Right,
        VerticalAlignment::Bottom,
    ))
    .unwrap();
    view.scroll_to_item(9, 9, position).unwrap();
    assert_eq!(view.scroll_x(), 400.0);
    assert_eq!(view.scroll_y(), 100.0);
    assert!(view.visible_cells().is_ok());
}
