//! Merge index: maps every address covered by a merged span to that span.

use std::collections::HashMap;

use crate::error::{GridError, Result};
use crate::types::{Address, Axis, Span};

/// Validated set of non-overlapping merged spans.
#[derive(Debug, Clone, Default)]
pub struct MergeIndex {
    /// Every covered address, origin included, keyed to its span
    covered: HashMap<Address, Span>,
    spans: Vec<Span>,
}

impl MergeIndex {
    /// Build the index for a `columns` x `rows` grid with the given frozen counts.
    ///
    /// The whole configuration is rejected on the first invalid span; there is no
    /// precedence rule between overlapping spans.
    ///
    /// # Errors
    /// - [`GridError::InvalidSpan`] if a span starts after it ends
    /// - [`GridError::SpanOutOfBounds`] if a span extends past the grid
    /// - [`GridError::SpanCrossesFrozenBoundary`] if a span is partly frozen
    /// - [`GridError::OverlappingSpans`] if two spans share an address
    pub fn new(spans: &[Span], columns: u32, rows: u32, frozen: (u32, u32)) -> Result<Self> {
        let mut covered = HashMap::new();
        let mut kept = Vec::with_capacity(spans.len());

        for &span in spans {
            if span.from.column > span.to.column || span.from.row > span.to.row {
                return Err(GridError::InvalidSpan(span));
            }
            if span.to.column >= columns || span.to.row >= rows {
                return Err(GridError::SpanOutOfBounds(span));
            }
            for (axis, frozen_count) in [(Axis::Horizontal, frozen.0), (Axis::Vertical, frozen.1)] {
                if span.start(axis) < frozen_count && span.end(axis) >= frozen_count {
                    return Err(GridError::SpanCrossesFrozenBoundary { span, axis });
                }
            }
            for address in span.addresses() {
                if let Some(&first) = covered.get(&address) {
                    return Err(GridError::OverlappingSpans {
                        first,
                        second: span,
                    });
                }
                covered.insert(address, span);
            }
            if !span.is_unit() {
                kept.push(span);
            }
        }

        Ok(Self {
            covered,
            spans: kept,
        })
    }

    /// The span owning `address`, or its unit span when unmerged.
    pub fn span_containing(&self, address: Address) -> Span {
        self.covered
            .get(&address)
            .copied()
            .unwrap_or_else(|| Span::unit(address))
    }

    /// Canonical identity of `address`: the origin of its span.
    pub fn origin_of(&self, address: Address) -> Address {
        self.covered.get(&address).map_or(address, |span| span.from)
    }

    /// Merged spans (unit spans dropped), in configuration order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
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

    fn span(range: &str) -> Span {
        Span::parse(range).unwrap()
    }

    #[test]
    fn test_lookup_normalizes_to_origin() {
        let index = MergeIndex::new(&[span("B2:C3")], 10, 10, (0, 0)).unwrap();
        for address in span("B2:C3").addresses() {
            assert_eq!(index.span_containing(address), span("B2:C3"));
            assert_eq!(index.origin_of(address), Address::new(1, 1));
        }
        let lone = Address::new(0, 0);
        assert_eq!(index.span_containing(lone), Span::unit(lone));
        assert_eq!(index.origin_of(lone), lone);
    }

    #[test]
    fn test_overlap_rejects_configuration() {
        let err = MergeIndex::new(&[span("A1:B2"), span("B2:C3")], 10, 10, (0, 0)).unwrap_err();
        match err {
            GridError::OverlappingSpans { first, second } => {
                assert_eq!(first, span("A1:B2"));
                assert_eq!(second, span("B2:C3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_adjacent_spans_are_fine() {
        let index = MergeIndex::new(&[span("A1:B2"), span("C1:D2")], 10, 10, (0, 0)).unwrap();
        assert_eq!(index.spans().len(), 2);
    }

    #[test]
    fn test_reversed_span_rejected() {
        let reversed = Span::new(Address::new(3, 0), Address::new(1, 0));
        assert!(matches!(
            MergeIndex::new(&[reversed], 10, 10, (0, 0)),
            Err(GridError::InvalidSpan(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert!(matches!(
            MergeIndex::new(&[span("I1:J2")], 9, 10, (0, 0)),
            Err(GridError::SpanOutOfBounds(_))
        ));
    }

    #[test]
    fn test_frozen_boundary_crossing_rejected() {
        assert!(matches!(
            MergeIndex::new(&[span("B1:C1")], 10, 10, (2, 0)),
            Err(GridError::SpanCrossesFrozenBoundary {
                axis: Axis::Horizontal,
                ..
            })
        ));
        assert!(MergeIndex::new(&[span("A1:B1"), span("C1:D1")], 10, 10, (2, 0)).is_ok());
    }

    #[test]
    fn test_unit_spans_are_ignored() {
        let index = MergeIndex::new(&[span("C3")], 10, 10, (0, 0)).unwrap();
        assert!(index.spans().is_empty());
        assert_eq!(
            index.span_containing(Address::new(2, 2)),
            Span::unit(Address::new(2, 2))
        );
    }

    #[test]
    fn test_unit_span_inside_merge_overlaps() {
        assert!(matches!(
            MergeIndex::new(&[span("B2"), span("A1:C3")], 10, 10, (0, 0)),
            Err(GridError::OverlappingSpans { .. })
        ));
    }
}
