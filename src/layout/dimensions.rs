//! Per-axis size table with precomputed prefix sums.
//!
//! Every cell is preceded by one spacing gap and the axis ends with one more,
//! so for `count` cells:
//!
//! - `prefix(i)` = sum of `size(k) + spacing` for `k < i`
//! - `origin(i)` = `prefix(i) + spacing`
//! - `end(i)` = `origin(i) + size(i)` = `prefix(i + 1)`
//! - `total()` = `prefix(count) + spacing`

use crate::error::{GridError, Result};
use crate::types::Axis;

/// Sizes and cumulative positions for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDimensions {
    axis: Axis,
    sizes: Vec<f32>,
    /// `prefixes[i]` = `prefix(i)`, with `count + 1` entries.
    prefixes: Vec<f32>,
    spacing: f32,
}

impl AxisDimensions {
    /// Build the table, validating every size and the spacing.
    ///
    /// # Errors
    /// [`GridError::InvalidSize`] for a negative or non-finite size,
    /// [`GridError::InvalidSpacing`] for a negative or non-finite spacing.
    pub fn new(axis: Axis, sizes: &[f32], spacing: f32) -> Result<Self> {
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(GridError::InvalidSpacing { axis, spacing });
        }
        if u32::try_from(sizes.len()).is_err() {
            return Err(GridError::TooManyEntries {
                axis,
                len: sizes.len(),
            });
        }

        let mut prefixes = Vec::with_capacity(sizes.len() + 1);
        let mut acc: f32 = 0.0;
        for (index, &size) in (0u32..).zip(sizes) {
            if !size.is_finite() || size < 0.0 {
                return Err(GridError::InvalidSize { axis, index, size });
            }
            prefixes.push(acc);
            acc += size + spacing;
        }
        prefixes.push(acc); // Final edge

        Ok(Self {
            axis,
            sizes: sizes.to_vec(),
            prefixes,
            spacing,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of cells on this axis.
    #[allow(clippy::cast_possible_truncation)]
    pub fn count(&self) -> u32 {
        // Length validated against u32 in `new`.
        self.sizes.len() as u32
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    fn out_of_range(&self, index: u32) -> GridError {
        GridError::IndexOutOfRange {
            axis: self.axis,
            index,
            count: self.count(),
        }
    }

    /// Size of a single cell.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`] if `index >= count`.
    pub fn size(&self, index: u32) -> Result<f32> {
        self.sizes
            .get(index as usize)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Cumulative extent of the cells before `index`, each with its leading gap.
    ///
    /// `index == count` is allowed and yields the position of the final gap.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`] if `index > count`.
    pub fn prefix(&self, index: u32) -> Result<f32> {
        self.prefixes
            .get(index as usize)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Leading edge of a cell.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`] if `index >= count`.
    pub fn origin(&self, index: u32) -> Result<f32> {
        self.size(index)?;
        Ok(self.prefix(index)? + self.spacing)
    }

    /// Trailing edge of a cell.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`] if `index >= count`.
    pub fn end(&self, index: u32) -> Result<f32> {
        self.size(index)?;
        self.prefix(index + 1)
    }

    /// Extent of the inclusive range `[from, to]`, inner gaps included.
    ///
    /// # Errors
    /// [`GridError::IndexOutOfRange`] if either index is out of range.
    pub fn span_extent(&self, from: u32, to: u32) -> Result<f32> {
        Ok(self.end(to)? - self.origin(from)?)
    }

    /// Total extent of the axis, trailing gap included.
    pub fn total(&self) -> f32 {
        self.prefixes.last().copied().unwrap_or(0.0) + self.spacing
    }

    /// First index in `[from, count)` whose trailing edge lies strictly past `position`.
    ///
    /// Returns `count` if there is none.
    pub fn first_ending_after(&self, from: u32, position: f32) -> u32 {
        let ends = self.prefixes.get(from as usize + 1..).unwrap_or(&[]);
        let skipped = ends.partition_point(|&end| end <= position);
        from.saturating_add(u32::try_from(skipped).unwrap_or(u32::MAX))
            .min(self.count())
    }

    /// Number of indices whose leading edge lies strictly before `position`.
    pub fn count_starting_before(&self, position: f32) -> u32 {
        let starts = self
            .prefixes
            .get(..self.sizes.len())
            .unwrap_or(&[]);
        let n = starts.partition_point(|&prefix| prefix + self.spacing < position);
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    /// Index whose cell (not its leading gap) contains `position`.
    pub fn index_at(&self, position: f32) -> Option<u32> {
        let index = self.first_ending_after(0, position);
        let origin = self.origin(index).ok()?;
        (position >= origin).then_some(index)
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

    fn columns() -> AxisDimensions {
        AxisDimensions::new(Axis::Horizontal, &[10.0, 20.0, 30.0], 1.0).unwrap()
    }

    #[test]
    fn test_prefix_sums() {
        let dims = columns();
        assert_eq!(dims.count(), 3);
        assert_eq!(dims.prefix(0).unwrap(), 0.0);
        assert_eq!(dims.prefix(1).unwrap(), 11.0);
        assert_eq!(dims.prefix(2).unwrap(), 32.0);
        assert_eq!(dims.prefix(3).unwrap(), 63.0);
        assert_eq!(dims.total(), 64.0);
    }

    #[test]
    fn test_origin_and_end() {
        let dims = columns();
        assert_eq!(dims.origin(0).unwrap(), 1.0);
        assert_eq!(dims.end(0).unwrap(), 11.0);
        assert_eq!(dims.origin(2).unwrap(), 33.0);
        assert_eq!(dims.end(2).unwrap(), 63.0);
        assert_eq!(dims.span_extent(0, 1).unwrap(), 31.0);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let dims = columns();
        assert!(matches!(
            dims.size(3),
            Err(GridError::IndexOutOfRange { index: 3, count: 3, .. })
        ));
        assert!(dims.origin(3).is_err());
        assert!(dims.prefix(3).is_ok());
        assert!(dims.prefix(4).is_err());
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(matches!(
            AxisDimensions::new(Axis::Vertical, &[1.0, -2.0], 0.0),
            Err(GridError::InvalidSize { index: 1, .. })
        ));
        assert!(AxisDimensions::new(Axis::Vertical, &[f32::NAN], 0.0).is_err());
        assert!(matches!(
            AxisDimensions::new(Axis::Vertical, &[1.0], -1.0),
            Err(GridError::InvalidSpacing { .. })
        ));
    }

    #[test]
    fn test_empty_axis() {
        let dims = AxisDimensions::new(Axis::Horizontal, &[], 2.0).unwrap();
        assert_eq!(dims.count(), 0);
        assert_eq!(dims.total(), 2.0);
        assert_eq!(dims.index_at(1.0), None);
    }

    #[test]
    fn test_first_ending_after() {
        let dims = columns();
        assert_eq!(dims.first_ending_after(0, 0.0), 0);
        assert_eq!(dims.first_ending_after(0, 10.9), 0);
        assert_eq!(dims.first_ending_after(0, 11.0), 1);
        assert_eq!(dims.first_ending_after(0, 62.0), 2);
        assert_eq!(dims.first_ending_after(0, 63.0), 3);
        assert_eq!(dims.first_ending_after(2, 0.0), 2);
    }

    #[test]
    fn test_count_starting_before() {
        let dims = columns();
        assert_eq!(dims.count_starting_before(1.0), 0);
        assert_eq!(dims.count_starting_before(1.5), 1);
        assert_eq!(dims.count_starting_before(33.0), 2);
        assert_eq!(dims.count_starting_before(1000.0), 3);
    }

    #[test]
    fn test_index_at() {
        let dims = columns();
        assert_eq!(dims.index_at(0.5), None); // leading gap
        assert_eq!(dims.index_at(1.0), Some(0));
        assert_eq!(dims.index_at(11.0), None); // gap between 0 and 1
        assert_eq!(dims.index_at(12.0), Some(1));
        assert_eq!(dims.index_at(62.9), Some(2));
        assert_eq!(dims.index_at(63.5), None);
    }
}
