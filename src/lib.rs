//! gridlayout - layout and scroll positioning for grid views
//!
//! Computes everything a grid or spreadsheet view needs to place its cells:
//! - Cell rectangles from column widths, row heights and inter-cell spacing
//! - Merged cells, normalized to their span origin
//! - Frozen leading columns/rows pinned to the viewport edge
//! - Circular (infinitely repeating) scrolling per axis
//! - The set of cells visible in a viewport
//! - The scroll offset that aligns a cell left/center/right, top/center/bottom
//!
//! Rendering, view recycling and gesture handling are left to the caller.
//!
//! # Usage
//!
//! ```
//! use gridlayout::layout::{GridLayout, HorizontalAlignment, ScrollPosition, VerticalAlignment, Viewport};
//! use gridlayout::types::{Address, GridConfig};
//!
//! let config = GridConfig::uniform(100, 100, 80.0, 24.0).with_frozen(1, 1);
//! let layout = GridLayout::new(&config)?;
//! let mut viewport = Viewport::new(320.0, 480.0);
//!
//! let position = ScrollPosition::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
//! layout.scroll_to_item(Address::new(40, 60), position, &mut viewport)?;
//! assert!(layout.visible_cells(&viewport).contains(&Address::new(40, 60)));
//! # Ok::<(), gridlayout::error::GridError>(())
//! ```

pub mod cell_ref;
pub mod error;
pub mod layout;
pub mod types;
pub mod viewer;

pub use error::{GridError, Result};
pub use layout::{GridLayout, ScrollPosition, Viewport};
pub use types::{Address, GridConfig, Rect, Span};
pub use viewer::GridView;

use wasm_bindgen::prelude::*;

/// Build a layout from a JSON configuration and return the cells visible in a
/// `width` x `height` viewport at offset (`scroll_x`, `scroll_y`) as JSON.
///
/// # Errors
/// Returns an error if the configuration is malformed or invalid.
#[wasm_bindgen]
pub fn visible_cells_json(
    config_json: &str,
    scroll_x: f32,
    scroll_y: f32,
    width: f32,
    height: f32,
) -> std::result::Result<String, JsValue> {
    visible_cells_for(config_json, scroll_x, scroll_y, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn visible_cells_for(
    config_json: &str,
    scroll_x: f32,
    scroll_y: f32,
    width: f32,
    height: f32,
) -> Result<String> {
    let layout = GridLayout::new(&GridConfig::from_json(config_json)?)?;
    let viewport =
        Viewport::new(width, height).with_offset(types::Offset::new(scroll_x, scroll_y));
    Ok(serde_json::to_string(&layout.visible_cells(&viewport))?)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
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
    fn test_visible_cells_for_json() {
        let json = visible_cells_for(
            r#"{"column_widths": [50, 50, 50], "row_heights": [20, 20], "intercell_spacing": {"width": 0, "height": 0}, "merged_cells": ["A1:B1"]}"#,
            0.0,
            0.0,
            100.0,
            20.0,
        )
        .unwrap();
        assert_eq!(json, r#"[{"column":0,"row":0}]"#);
    }

    #[test]
    fn test_visible_cells_for_rejects_bad_config() {
        assert!(matches!(
            visible_cells_for(r#"{"column_widths": [-1]}"#, 0.0, 0.0, 10.0, 10.0),
            Err(GridError::InvalidSize { .. })
        ));
    }
}
