//! Common test utilities: grid builders and an independent geometry oracle.
//!
//! The oracle recomputes positions by plain accumulation over the configured
//! sizes so tests never check the layout engine against itself.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_lossless
)]

use std::collections::BTreeSet;

use gridlayout::layout::{AxisAlignment, GridLayout, Viewport};
use gridlayout::types::{Address, Axis, CircularScrolling, GridConfig, Span};

/// Grid size used by the merged-cell scenarios.
pub const GRID_SIZE: u32 = 60;

/// Viewport used by the merged-cell scenarios (a phone screen at 2x).
pub fn phone_viewport() -> Viewport {
    Viewport::new(320.0, 480.0).with_scale(2.0)
}

/// Deterministic but uneven column widths.
pub fn column_widths(count: u32) -> Vec<f32> {
    (0..count).map(|i| 40.0 + ((i * 7) % 30) as f32).collect()
}

/// Deterministic but uneven row heights.
pub fn row_heights(count: u32) -> Vec<f32> {
    (0..count).map(|i| 20.0 + ((i * 5) % 17) as f32).collect()
}

/// Every even (column, row) pair merged with its odd neighbours into a 2x2 span.
pub fn two_by_two_merges(columns: u32, rows: u32) -> Vec<Span> {
    let mut spans = Vec::new();
    for column in (0..columns).step_by(2) {
        for row in (0..rows).step_by(2) {
            spans.push(Span::new(
                Address::new(column, row),
                Address::new(column + 1, row + 1),
            ));
        }
    }
    spans
}

/// The 60x60 grid of 2x2 merged cells.
pub fn merged_grid(frozen_columns: u32, frozen_rows: u32, circular: CircularScrolling) -> GridConfig {
    GridConfig {
        column_widths: column_widths(GRID_SIZE),
        row_heights: row_heights(GRID_SIZE),
        ..GridConfig::default()
    }
    .with_spacing(1.0, 1.0)
    .with_frozen(frozen_columns, frozen_rows)
    .with_circular(circular)
    .with_merges(two_by_two_merges(GRID_SIZE, GRID_SIZE))
}

pub fn build(config: &GridConfig) -> GridLayout {
    GridLayout::new(config).expect("layout should build")
}

/// Plain-accumulation model of one axis.
pub struct AxisOracle {
    pub sizes: Vec<f32>,
    pub spacing: f32,
    pub frozen: u32,
    pub circular: bool,
}

impl AxisOracle {
    pub fn from_config(config: &GridConfig, axis: Axis) -> Self {
        Self {
            sizes: config.sizes(axis).to_vec(),
            spacing: config.intercell_spacing.along(axis),
            frozen: config.frozen(axis),
            circular: config.circular_scrolling.along(axis),
        }
    }

    /// Sum of `size + spacing` over `0..index`.
    pub fn width_before(&self, index: u32) -> f32 {
        let mut width = 0.0;
        for size in &self.sizes[..index as usize] {
            width += size + self.spacing;
        }
        width
    }

    pub fn frozen_width(&self) -> f32 {
        self.width_before(self.frozen)
    }

    pub fn total(&self) -> f32 {
        self.width_before(self.sizes.len() as u32) + self.spacing
    }

    pub fn tile(&self) -> f32 {
        self.width_before(self.sizes.len() as u32) - self.frozen_width()
    }

    /// Extent of the inclusive range `[from, to]` with inner gaps.
    pub fn span_size(&self, from: u32, to: u32) -> f32 {
        let mut size = 0.0;
        for index in from..=to {
            size += self.sizes[index as usize];
        }
        size + self.spacing * (to - from) as f32
    }

    /// Indices overlapping the window at `offset` in a viewport of `extent` by
    /// more than `tolerance`, by brute force.
    pub fn visible(&self, offset: f32, extent: f32, tolerance: f32) -> BTreeSet<u32> {
        let mut visible = BTreeSet::new();
        for index in 0..self.frozen {
            if self.width_before(index) + self.spacing < extent - tolerance {
                visible.insert(index);
            }
        }
        let lo = offset + self.frozen_width() + tolerance;
        let hi = offset + extent - tolerance;
        let cycles = if self.circular {
            let tile = self.tile();
            ((offset / tile).floor() as i64 - 1)..=((hi / tile).floor() as i64 + 1)
        } else {
            0..=0
        };
        for cycle in cycles {
            let shift = cycle as f32 * if self.circular { self.tile() } else { 0.0 };
            for index in self.frozen..self.sizes.len() as u32 {
                let origin = self.width_before(index) + self.spacing + shift;
                let end = origin + self.sizes[index as usize];
                if end > lo && origin < hi {
                    visible.insert(index);
                }
            }
        }
        visible
    }

    /// Expected viewport-space leading edge of `[from, to]` after scrolling to
    /// `alignment` in a viewport of `extent`, following the reference rules:
    /// pinned when frozen, otherwise aligned and clamped to the content edges.
    pub fn expected_origin(&self, from: u32, to: u32, alignment: AxisAlignment, extent: f32) -> f32 {
        let width = self.width_before(from);
        let sp = self.spacing;
        let frozen = self.frozen_width();
        let span = self.span_size(from, to);
        let total = self.total();

        if from < self.frozen {
            return width + sp;
        }
        match alignment {
            AxisAlignment::Leading => {
                if self.circular || width <= total - extent + frozen {
                    frozen + sp
                } else {
                    extent - (total - width) + sp
                }
            }
            AxisAlignment::Centered => {
                let centered = (extent + frozen - span) / 2.0;
                if self.circular {
                    centered
                } else if width + sp + span / 2.0 - frozen <= (extent - frozen) / 2.0 {
                    width + sp
                } else if width + sp + span / 2.0 >= total - (extent - frozen) / 2.0 {
                    extent - (total - width) + sp
                } else {
                    centered
                }
            }
            AxisAlignment::Trailing => {
                if !self.circular && width - frozen + span + sp * 2.0 <= extent - frozen {
                    width + sp
                } else {
                    extent - sp - span
                }
            }
        }
    }
}

/// Assert `actual` is within one device pixel of `expected`.
pub fn assert_within_pixel(actual: f32, expected: f32, viewport: &Viewport, context: &str) {
    let epsilon = viewport.pixel_epsilon();
    assert!(
        (actual - expected).abs() <= epsilon,
        "{context}: expected {expected}, got {actual} (tolerance {epsilon})"
    );
}

/// Number of distinct merge-span origins among `indices` for the 2x2 grid.
pub fn span_count(indices: &BTreeSet<u32>) -> usize {
    indices
        .iter()
        .map(|i| i - i % 2)
        .collect::<BTreeSet<_>>()
        .len()
}
