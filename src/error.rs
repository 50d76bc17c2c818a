//! Structured error types for gridlayout.
//!
//! Configuration errors are raised while building a [`GridLayout`] and mean the
//! layout refuses construction. Range errors are contract violations reported by
//! queries that were handed an address or index outside the grid.
//!
//! [`GridLayout`]: crate::layout::GridLayout

use crate::types::{Address, Axis, Span};

/// All errors that can occur while building or querying a grid layout.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Two merged spans cover at least one common address.
    #[error("Merged spans {first} and {second} overlap")]
    OverlappingSpans {
        /// Span registered first.
        first: Span,
        /// Span that collided with it.
        second: Span,
    },

    /// A span whose start lies after its end on some axis.
    #[error("Invalid span {0}: start lies after end")]
    InvalidSpan(Span),

    /// A span that extends past the last column or row.
    #[error("Span {0} extends past the grid bounds")]
    SpanOutOfBounds(Span),

    /// A span that covers both frozen and scrollable indices on one axis.
    #[error("Span {span} crosses the frozen {axis} boundary")]
    SpanCrossesFrozenBoundary {
        /// Offending span.
        span: Span,
        /// Axis whose boundary is crossed.
        axis: Axis,
    },

    /// More frozen columns or rows than the grid has.
    #[error("Frozen {axis} count {frozen} exceeds grid size {count}")]
    FrozenOutOfRange {
        /// Axis of the frozen band.
        axis: Axis,
        /// Requested frozen count.
        frozen: u32,
        /// Number of indices on the axis.
        count: u32,
    },

    /// A negative or non-finite column width or row height.
    #[error("Invalid {axis} size {size} at index {index}")]
    InvalidSize {
        /// Axis the size belongs to.
        axis: Axis,
        /// Index of the offending entry.
        index: u32,
        /// The rejected value.
        size: f32,
    },

    /// A negative or non-finite inter-cell spacing.
    #[error("Invalid {axis} spacing {spacing}")]
    InvalidSpacing {
        /// Axis the spacing applies to.
        axis: Axis,
        /// The rejected value.
        spacing: f32,
    },

    /// Circular scrolling requested on an axis with nothing to scroll.
    #[error("Circular scrolling on the {0} axis needs a non-empty scrollable band")]
    EmptyCircularBand(Axis),

    /// More indices than the layout can address.
    #[error("Too many {axis} entries: {len}")]
    TooManyEntries {
        /// Axis with too many entries.
        axis: Axis,
        /// Number of entries supplied.
        len: usize,
    },

    /// Query for an address outside the grid.
    #[error("Address {0} is outside the grid")]
    AddressOutOfRange(Address),

    /// Query for an axis index outside `[0, count)`.
    #[error("{axis} index {index} out of range (count {count})")]
    IndexOutOfRange {
        /// Axis queried.
        axis: Axis,
        /// Requested index.
        index: u32,
        /// Number of indices on the axis.
        count: u32,
    },

    /// Invalid A1-style cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// JSON configuration error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
