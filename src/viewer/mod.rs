//! `GridView` - the WASM-exported handle around a [`GridLayout`].
//!
//! The handle owns the only mutable state of the engine (the viewport) and an
//! immutable layout behind an `Arc`. Reconfiguring builds a complete new layout
//! off to the side and swaps it in, so readers holding the previous `Arc` are
//! never affected by a half-built layout.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::error;
use crate::layout::{GridLayout, ScrollPosition, Viewport};
use crate::types::{Address, GridConfig, Offset, Rect};

/// Grid layout plus viewport, exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    layout: Arc<GridLayout>,
    viewport: Viewport,
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl GridView {
    /// Create a view from a JSON [`GridConfig`] and a viewport size in logical pixels.
    ///
    /// # Errors
    /// Returns an error string if the configuration is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, width: f32, height: f32, dpr: f32) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let config = GridConfig::from_json(config_json).map_err(to_js_error)?;
        Self::from_config(&config, width, height, dpr).map_err(to_js_error)
    }

    /// Replace the layout with one built from a JSON [`GridConfig`].
    ///
    /// On error the current layout stays in place.
    ///
    /// # Errors
    /// Returns an error string if the configuration is malformed or invalid.
    pub fn configure(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = GridConfig::from_json(config_json).map_err(to_js_error)?;
        self.reconfigure(&config).map_err(to_js_error)
    }

    /// Resize the viewport (logical pixels)
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        self.viewport.resize(width, height);
        self.viewport.scale = dpr;
        self.clamp();
    }

    /// Scroll by delta amounts, clamped on non-circular axes
    pub fn scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.viewport.scroll_by(delta_x, delta_y);
        self.clamp();
    }

    /// Set absolute scroll position, clamped on non-circular axes
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.viewport.set_offset(Offset::new(x, y));
        self.clamp();
    }

    pub fn scroll_x(&self) -> f32 {
        self.viewport.scroll_x
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y
    }

    pub fn content_width(&self) -> f32 {
        self.layout.content_size().0
    }

    pub fn content_height(&self) -> f32 {
        self.layout.content_size().1
    }

    /// Visible cells as an array of `{column, row}` objects.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn visible_cells(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.visible()).map_err(to_js_error)
    }

    /// Viewport-space rectangle of a cell as `{x, y, width, height}`.
    ///
    /// # Errors
    /// Returns an error if the cell is outside the grid.
    pub fn cell_rect(&self, column: u32, row: u32) -> Result<JsValue, JsValue> {
        let rect = self.frame(Address::new(column, row)).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
    }

    /// Scroll so the cell lands at `position` (`{horizontal, vertical}`, e.g.
    /// `{horizontal: "right", vertical: "top"}`) and return the new `{x, y}` offset.
    ///
    /// # Errors
    /// Returns an error if the position is malformed or the cell is outside the grid.
    pub fn scroll_to_item(
        &mut self,
        column: u32,
        row: u32,
        position: JsValue,
    ) -> Result<JsValue, JsValue> {
        let position: ScrollPosition =
            serde_wasm_bindgen::from_value(position).map_err(to_js_error)?;
        let offset = self
            .scroll_to(Address::new(column, row), position)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&offset).map_err(to_js_error)
    }

    /// Cell under a viewport point as `[column, row]`.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Vec<u32>> {
        self.layout
            .cell_at_point(&self.viewport, x, y)
            .map(|a| vec![a.column, a.row])
    }
}

impl GridView {
    /// Build a view from an already parsed configuration.
    ///
    /// # Errors
    /// Any configuration error from [`GridLayout::new`].
    pub fn from_config(config: &GridConfig, width: f32, height: f32, dpr: f32) -> error::Result<Self> {
        let layout = Arc::new(GridLayout::new(config)?);
        Ok(Self {
            layout,
            viewport: Viewport::new(width, height).with_scale(dpr),
        })
    }

    /// Swap in a layout built from `config`, keeping the viewport.
    ///
    /// # Errors
    /// Any configuration error from [`GridLayout::new`]; the current layout is kept.
    pub fn reconfigure(&mut self, config: &GridConfig) -> error::Result<()> {
        let layout = GridLayout::new(config)?;
        self.layout = Arc::new(layout);
        self.clamp();
        Ok(())
    }

    /// Shared handle to the current layout.
    pub fn layout(&self) -> Arc<GridLayout> {
        Arc::clone(&self.layout)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn visible(&self) -> Vec<Address> {
        self.layout.visible_cells(&self.viewport)
    }

    /// # Errors
    /// [`GridError::AddressOutOfRange`](crate::error::GridError::AddressOutOfRange)
    /// if `address` is outside the grid.
    pub fn frame(&self, address: Address) -> error::Result<Rect> {
        self.layout.frame_in_viewport(address, &self.viewport)
    }

    /// Move the viewport so `target` lands at `position`.
    ///
    /// # Errors
    /// [`GridError::AddressOutOfRange`](crate::error::GridError::AddressOutOfRange)
    /// if `target` is outside the grid.
    pub fn scroll_to(&mut self, target: Address, position: ScrollPosition) -> error::Result<Offset> {
        self.layout
            .scroll_to_item(target, position, &mut self.viewport)
    }

    fn clamp(&mut self) {
        let offset = self.layout.clamp_offset(&self.viewport);
        self.viewport.set_offset(offset);
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
    use crate::layout::{HorizontalAlignment, VerticalAlignment};
    use crate::types::CircularScrolling;

    fn view() -> GridView {
        let config = GridConfig::uniform(20, 40, 60.0, 20.0).with_spacing(0.0, 0.0);
        GridView::from_config(&config, 300.0, 200.0, 2.0).unwrap()
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = view();
        view.scroll(-50.0, 5000.0);
        assert_eq!(view.scroll_x(), 0.0);
        assert_eq!(view.scroll_y(), 600.0);
        view.set_scroll(2000.0, 10.0);
        assert_eq!(view.scroll_x(), 900.0);
    }

    #[test]
    fn test_reconfigure_swaps_layout_and_keeps_old_handle() {
        let mut view = view();
        let before = view.layout();
        view.reconfigure(&GridConfig::uniform(5, 5, 60.0, 20.0).with_spacing(0.0, 0.0))
            .unwrap();
        assert_eq!(before.column_count(), 20);
        assert_eq!(view.layout().column_count(), 5);
        assert_eq!(view.content_width(), 300.0);
    }

    #[test]
    fn test_failed_reconfigure_keeps_layout() {
        let mut view = view();
        let bad = GridConfig::uniform(5, 5, 60.0, 20.0).with_frozen(6, 0);
        assert!(view.reconfigure(&bad).is_err());
        assert_eq!(view.layout().column_count(), 20);
    }

    #[test]
    fn test_scroll_to_moves_viewport() {
        let mut view = view();
        let offset = view
            .scroll_to(
                Address::new(10, 20),
                ScrollPosition::new(HorizontalAlignment::Left, VerticalAlignment::Top),
            )
            .unwrap();
        assert_eq!(offset, Offset::new(600.0, 400.0));
        assert_eq!(view.frame(Address::new(10, 20)).unwrap().x, 0.0);
        assert_eq!(view.cell_at(1.0, 1.0), Some(vec![10, 20]));
    }

    #[test]
    fn test_circular_scroll_is_not_clamped() {
        let config = GridConfig::uniform(20, 40, 60.0, 20.0)
            .with_spacing(0.0, 0.0)
            .with_circular(CircularScrolling::HORIZONTAL);
        let mut view = GridView::from_config(&config, 300.0, 200.0, 1.0).unwrap();
        view.scroll(-100.0, -100.0);
        assert_eq!(view.scroll_x(), -100.0);
        assert_eq!(view.scroll_y(), 0.0);
        assert_eq!(view.visible().first(), Some(&Address::new(0, 0)));
    }
}
