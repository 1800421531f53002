use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::entry::Entry;
use crate::core::types::AxisDependency;
use crate::error::{ChartError, ChartResult};

/// How an x-query snaps to an entry when no entry sits exactly on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rounding {
    /// Smallest x that is `>=` the query.
    Up,
    /// Largest x that is `<=` the query.
    Down,
    /// Nearest x; equal distances resolve upward.
    #[default]
    Closest,
}

/// One logical series: entries sorted by ascending x plus per-series options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    label: String,
    entries: Vec<Entry>,
    axis_dependency: AxisDependency,
    visible: bool,
    highlight_enabled: bool,
    bar_border_width: f64,
    corner_radius: f64,
    min_bar_height: f64,
}

impl DataSet {
    /// Builds a data set, sorting entries by x.
    ///
    /// The sort is stable so entries sharing an x keep their insertion order.
    #[must_use]
    pub fn new(label: impl Into<String>, mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| a.x().total_cmp(&b.x()));
        Self {
            label: label.into(),
            entries,
            axis_dependency: AxisDependency::Left,
            visible: true,
            highlight_enabled: true,
            bar_border_width: 0.0,
            corner_radius: 0.0,
            min_bar_height: 0.0,
        }
    }

    #[must_use]
    pub fn with_axis_dependency(mut self, axis: AxisDependency) -> Self {
        self.axis_dependency = axis;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_highlight_enabled(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    pub fn with_bar_border_width(mut self, width: f64) -> ChartResult<Self> {
        self.bar_border_width = non_negative(width, "bar border width")?;
        Ok(self)
    }

    pub fn with_corner_radius(mut self, radius: f64) -> ChartResult<Self> {
        self.corner_radius = non_negative(radius, "corner radius")?;
        Ok(self)
    }

    /// Minimum drawn bar height in pixels.
    pub fn with_min_bar_height(mut self, height: f64) -> ChartResult<Self> {
        self.min_bar_height = non_negative(height, "min bar height")?;
        Ok(self)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn axis_dependency(&self) -> AxisDependency {
        self.axis_dependency
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_enabled = enabled;
    }

    #[must_use]
    pub fn bar_border_width(&self) -> f64 {
        self.bar_border_width
    }

    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    #[must_use]
    pub fn min_bar_height(&self) -> f64 {
        self.min_bar_height
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.entries.iter().any(Entry::is_stacked)
    }

    /// Maximum stack depth over all entries; individual entries may have fewer
    /// slices.
    #[must_use]
    pub fn stack_size(&self) -> usize {
        self.entries
            .iter()
            .map(Entry::stack_depth)
            .max()
            .unwrap_or(1)
    }

    #[must_use]
    pub fn x_min(&self) -> Option<f64> {
        self.entries.first().map(Entry::x)
    }

    #[must_use]
    pub fn x_max(&self) -> Option<f64> {
        self.entries.last().map(Entry::x)
    }

    /// Lowest drawn y; stacked entries contribute their negative sum.
    #[must_use]
    pub fn y_min(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| entry.value_extent().0)
            .reduce(f64::min)
    }

    #[must_use]
    pub fn y_max(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| entry.value_extent().1)
            .reduce(f64::max)
    }

    /// Index range of entries whose x equals `x` exactly.
    #[must_use]
    pub fn index_range_for_x(&self, x: f64) -> Range<usize> {
        let start = self.entries.partition_point(|entry| entry.x() < x);
        let end = self.entries.partition_point(|entry| entry.x() <= x);
        start..end.max(start)
    }

    #[must_use]
    pub fn entries_for_x(&self, x: f64) -> &[Entry] {
        &self.entries[self.index_range_for_x(x)]
    }

    #[must_use]
    pub fn contains_x(&self, x: f64) -> bool {
        !self.index_range_for_x(x).is_empty()
    }

    /// Finds the entry index for an x-query.
    ///
    /// When several entries share the matched x, `closest_to_y` picks the one
    /// with the nearest y (later entries win ties); otherwise the first of them
    /// is returned.
    #[must_use]
    pub fn entry_index_for_x(
        &self,
        x: f64,
        closest_to_y: Option<f64>,
        rounding: Rounding,
    ) -> Option<usize> {
        if self.entries.is_empty() || !x.is_finite() {
            return None;
        }

        let below = self.entries.partition_point(|entry| entry.x() <= x);
        let above = self.entries.partition_point(|entry| entry.x() < x);
        let down = below.checked_sub(1);
        let up = (above < self.entries.len()).then_some(above);

        let matched = match rounding {
            Rounding::Down => down?,
            Rounding::Up => up?,
            Rounding::Closest => match (down, up) {
                (Some(d), Some(u)) => {
                    let dist_down = x - self.entries[d].x();
                    let dist_up = self.entries[u].x() - x;
                    if dist_down < dist_up { d } else { u }
                }
                (Some(d), None) => d,
                (None, Some(u)) => u,
                (None, None) => return None,
            },
        };

        let group = self.index_range_for_x(self.entries[matched].x());
        match closest_to_y {
            Some(target) if target.is_finite() => {
                let mut best = group.start;
                for index in group {
                    let distance = (self.entries[index].y() - target).abs();
                    if distance <= (self.entries[best].y() - target).abs() {
                        best = index;
                    }
                }
                Some(best)
            }
            _ => Some(group.start),
        }
    }

    #[must_use]
    pub fn entry_for_x(
        &self,
        x: f64,
        closest_to_y: Option<f64>,
        rounding: Rounding,
    ) -> Option<&Entry> {
        self.entry_index_for_x(x, closest_to_y, rounding)
            .and_then(|index| self.entries.get(index))
    }
}

fn non_negative(value: f64, name: &str) -> ChartResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(value)
}
