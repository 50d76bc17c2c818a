//! Geometry primitives shared by every layout component.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell_ref;
use crate::error::GridError;

/// One of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Columns, laid out along x.
    Horizontal,
    /// Rows, laid out along y.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("column"),
            Axis::Vertical => f.write_str("row"),
        }
    }
}

/// Logical grid coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Address {
    pub column: u32,
    pub row: u32,
}

impl Address {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Index of this address along `axis`.
    pub const fn index(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.column,
            Axis::Vertical => self.row,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&cell_ref::format_cell_ref(self.column, self.row))
    }
}

/// Inclusive rectangular range of addresses forming one merged cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpanRepr")]
pub struct Span {
    pub from: Address,
    pub to: Address,
}

impl Span {
    pub const fn new(from: Address, to: Address) -> Self {
        Self { from, to }
    }

    /// The span covering only `address`.
    pub const fn unit(address: Address) -> Self {
        Self {
            from: address,
            to: address,
        }
    }

    /// Parse an A1-style range such as `"A1:B2"`.
    ///
    /// # Errors
    /// Returns [`GridError::CellRef`] if the range is malformed.
    pub fn parse(range: &str) -> Result<Self, GridError> {
        let (from_column, from_row, to_column, to_row) = cell_ref::parse_cell_range(range)
            .ok_or_else(|| GridError::CellRef(range.to_string()))?;
        Ok(Self::new(
            Address::new(from_column, from_row),
            Address::new(to_column, to_row),
        ))
    }

    /// First index covered along `axis`.
    pub const fn start(&self, axis: Axis) -> u32 {
        self.from.index(axis)
    }

    /// Last index covered along `axis` (inclusive).
    pub const fn end(&self, axis: Axis) -> u32 {
        self.to.index(axis)
    }

    pub fn is_unit(&self) -> bool {
        self.from == self.to
    }

    /// Every address covered by the span, column-major.
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        (self.from.column..=self.to.column).flat_map(move |column| {
            (self.from.row..=self.to.row).map(move |row| Address::new(column, row))
        })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

/// Accepted JSON shapes for a merged span.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpanRepr {
    Reference(String),
    Bounds { from: Address, to: Address },
}

impl TryFrom<SpanRepr> for Span {
    type Error = GridError;

    fn try_from(repr: SpanRepr) -> Result<Self, Self::Error> {
        match repr {
            SpanRepr::Reference(range) => Span::parse(&range),
            SpanRepr::Bounds { from, to } => Ok(Span::new(from, to)),
        }
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Scroll offset (content pixels) of the viewport's origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
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

    #[test]
    fn test_span_parse_a1_range() {
        let span = Span::parse("B3:D4").unwrap();
        assert_eq!(span.from, Address::new(1, 2));
        assert_eq!(span.to, Address::new(3, 3));
        assert_eq!(span.to_string(), "B3:D4");
    }

    #[test]
    fn test_span_parse_single_cell() {
        let span = Span::parse("C7").unwrap();
        assert!(span.is_unit());
        assert_eq!(span.from, Address::new(2, 6));
    }

    #[test]
    fn test_span_parse_rejects_garbage() {
        assert!(matches!(Span::parse("::"), Err(GridError::CellRef(_))));
    }

    #[test]
    fn test_span_deserializes_both_shapes() {
        let spans: Vec<Span> = serde_json::from_str(
            r#"["A1:B2", {"from": {"column": 4, "row": 0}, "to": {"column": 5, "row": 1}}]"#,
        )
        .unwrap();
        assert_eq!(spans[0], Span::new(Address::new(0, 0), Address::new(1, 1)));
        assert_eq!(spans[1], Span::new(Address::new(4, 0), Address::new(5, 1)));
    }

    #[test]
    fn test_span_addresses_cover_rectangle() {
        let span = Span::parse("A1:B3").unwrap();
        let all: Vec<_> = span.addresses().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all.first(), Some(&Address::new(0, 0)));
        assert_eq!(all.get(2), Some(&Address::new(0, 2)));
        assert_eq!(all.last(), Some(&Address::new(1, 2)));
    }
}
