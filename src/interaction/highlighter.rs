//! Pointer position to [`Highlight`] resolution.
//!
//! Resolution runs in three steps:
//!
//! 1. Every visible, highlight-enabled data set contributes the entries at
//!    the pointer's x-value, or at the x found with the configured
//!    [`Rounding`] when nothing sits exactly there.
//! 2. The y-axis whose candidates lie closest to the pointer vertically wins.
//! 3. The nearest candidate on that axis inside the maximum distance is
//!    selected. Stacked bars are then narrowed to the slice under the
//!    pointer unless whole-bar selection is on.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{
    AxisDependency, ChartData, CoordinateTransformer, DataSet, EntryAddress, Viewport,
};
use crate::interaction::{Highlight, HighlightBehavior};

type Candidates = SmallVec<[Highlight; 4]>;

#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    data: &'a ChartData,
    transformer: &'a CoordinateTransformer,
    viewport: Viewport,
    behavior: HighlightBehavior,
}

impl<'a> Highlighter<'a> {
    #[must_use]
    pub fn new(
        data: &'a ChartData,
        transformer: &'a CoordinateTransformer,
        viewport: Viewport,
        behavior: HighlightBehavior,
    ) -> Self {
        Self {
            data,
            transformer,
            viewport,
            behavior,
        }
    }

    /// Resolves a pointer position. `None` when no entry qualifies.
    #[must_use]
    pub fn resolve(&self, x_px: f64, y_px: f64) -> Option<Highlight> {
        if !x_px.is_finite() || !y_px.is_finite() || self.data.entry_count() == 0 {
            return None;
        }

        let x_value = self.transformer.x_pixel_to_value(x_px);
        let candidates = self.highlights_at_x(x_value);
        let axis = self.closest_axis(&candidates, y_px)?;

        let closest = candidates
            .iter()
            .filter(|candidate| candidate.axis() == axis)
            .map(|candidate| (OrderedFloat(self.distance(x_px, y_px, candidate)), *candidate))
            .filter(|(distance, _)| distance.0 < self.behavior.max_highlight_distance_px)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)?;

        let highlight = if self.data.is_bar() && !self.behavior.highlight_full_bar_enabled {
            self.narrow_to_stack_slice(closest, x_px, y_px)
        } else {
            closest
        };

        trace!(
            x_px,
            y_px,
            candidates = candidates.len(),
            data_set_index = highlight.data_set_index(),
            x = highlight.x(),
            stack_index = ?highlight.stack_index(),
            "resolved highlight"
        );
        Some(highlight)
    }

    /// Highlight for a known entry, positioned at its value point. Whole-bar;
    /// no stack slice is selected.
    #[must_use]
    pub fn highlight_for_entry(&self, address: EntryAddress) -> Option<Highlight> {
        let set = self.data.data_set(address.data_set_index)?;
        if !set.is_highlight_enabled() {
            return None;
        }
        let entry = set.entry(address.entry_index)?;
        let axis = set.axis_dependency();
        let pixel = self.transformer.value_to_pixel(entry.x(), entry.y(), axis);
        Some(Highlight::new(
            entry.x(),
            entry.y(),
            pixel.x,
            pixel.y,
            address.data_set_index,
            axis,
        ))
    }

    /// Candidates from every eligible data set at `x_value`.
    #[must_use]
    pub fn highlights_at_x(&self, x_value: f64) -> Candidates {
        let mut candidates = Candidates::new();
        if !x_value.is_finite() {
            return candidates;
        }
        for (index, set) in self.data.data_sets().iter().enumerate() {
            if !set.is_visible() || !set.is_highlight_enabled() || set.is_empty() {
                continue;
            }
            self.push_data_set_candidates(&mut candidates, index, set, x_value);
        }
        candidates
    }

    fn push_data_set_candidates(
        &self,
        candidates: &mut Candidates,
        data_set_index: usize,
        set: &DataSet,
        x_value: f64,
    ) {
        let mut range = set.index_range_for_x(x_value);
        if range.is_empty() {
            let Some(closest) = set.entry_for_x(x_value, None, self.behavior.rounding) else {
                return;
            };
            range = set.index_range_for_x(closest.x());
        }

        let axis = set.axis_dependency();
        for entry in &set.entries()[range] {
            if !self.is_x_visible(entry.x()) {
                continue;
            }
            let pixel = self.transformer.value_to_pixel(entry.x(), entry.y(), axis);
            candidates.push(Highlight::new(
                entry.x(),
                entry.y(),
                pixel.x,
                pixel.y,
                data_set_index,
                axis,
            ));
        }
    }

    fn is_x_visible(&self, x: f64) -> bool {
        let (low, high) = self.viewport.visible_x_range();
        let half = self.data.bar_width().unwrap_or(0.0) * 0.5;
        x >= low - half && x <= high + half
    }

    /// Axis whose candidates come closest to `y_px`; the right axis wins ties.
    fn closest_axis(&self, candidates: &[Highlight], y_px: f64) -> Option<AxisDependency> {
        if candidates.is_empty() {
            return None;
        }
        let left = min_y_distance(candidates, y_px, AxisDependency::Left);
        let right = min_y_distance(candidates, y_px, AxisDependency::Right);
        Some(if left < right {
            AxisDependency::Left
        } else {
            AxisDependency::Right
        })
    }

    fn distance(&self, x_px: f64, y_px: f64, candidate: &Highlight) -> f64 {
        let dx = x_px - candidate.x_px();
        if self.behavior.highlight_full_bar_enabled || self.behavior.group_selection_enabled {
            dx.abs()
        } else {
            dx.hypot(y_px - candidate.y_px())
        }
    }

    /// Replaces a whole-bar highlight on a stacked entry with the slice under
    /// the pointer, anchored at the top of that slice.
    fn narrow_to_stack_slice(&self, highlight: Highlight, x_px: f64, y_px: f64) -> Highlight {
        let Some(set) = self.data.data_set(highlight.data_set_index()) else {
            return highlight;
        };
        let axis = highlight.axis();
        let (_, y_value) = self.transformer.pixel_to_value(x_px, y_px, axis);
        let Some(entry) = set
            .entries_for_x(highlight.x())
            .iter()
            .min_by_key(|entry| OrderedFloat((entry.y() - highlight.y()).abs()))
        else {
            return highlight;
        };
        let Some(stack_index) = entry.stack_index_for_value(y_value) else {
            return highlight;
        };
        let Some(slice) = entry.stack_ranges().get(stack_index).copied() else {
            return highlight;
        };

        let pixel = self.transformer.value_to_pixel(highlight.x(), slice.to, axis);
        Highlight::new(
            entry.x(),
            entry.y(),
            pixel.x,
            pixel.y,
            highlight.data_set_index(),
            axis,
        )
        .with_stack_index(Some(stack_index))
    }
}

fn min_y_distance(candidates: &[Highlight], y_px: f64, axis: AxisDependency) -> f64 {
    candidates
        .iter()
        .filter(|candidate| candidate.axis() == axis)
        .map(|candidate| (candidate.y_px() - y_px).abs())
        .fold(f64::INFINITY, f64::min)
}
