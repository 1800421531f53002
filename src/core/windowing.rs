use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::data_set::{DataSet, Rounding};

/// Window of entry indices of one data set that can intersect the visible
/// x-range.
///
/// `min` is the last entry at or left of the low edge, `max` the last entry
/// sharing the first x at or right of the high edge, so edge entries that are
/// partially visible are included. `range` is `max - min` scaled by the
/// x animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XBounds {
    pub min: usize,
    pub max: usize,
    pub range: usize,
}

impl XBounds {
    /// Returns `None` for an empty data set.
    #[must_use]
    pub fn compute(set: &DataSet, low_x: f64, high_x: f64, phase_x: f64) -> Option<Self> {
        let last = set.entry_count().checked_sub(1)?;
        let (low_x, high_x) = if low_x <= high_x {
            (low_x, high_x)
        } else {
            (high_x, low_x)
        };

        let min = set
            .entry_index_for_x(low_x, None, Rounding::Down)
            .unwrap_or(0);
        let max = set
            .entry_index_for_x(high_x, None, Rounding::Up)
            .and_then(|index| set.entry(index))
            .map_or(last, |entry| set.index_range_for_x(entry.x()).end - 1)
            .max(min);

        let phase_x = if phase_x.is_finite() {
            phase_x.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let range = ((max - min) as f64 * phase_x) as usize;
        Some(Self { min, max, range })
    }

    /// Entry indices to lay out, inclusive on both ends.
    #[must_use]
    pub fn indices(self) -> RangeInclusive<usize> {
        self.min..=self.min + self.range
    }
}
