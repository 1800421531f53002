use indexmap::IndexMap;
use tracing::trace;

use crate::core::{AnimationPhase, AxisDependency, AxisRange, ChartData, Rounding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HighlightBehavior;
use crate::render::GeometryRenderer;

use super::{ChartEngine, ChartEngineConfig};

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Sets or updates deterministic series metadata.
    ///
    /// `IndexMap` is used to preserve insertion order for stable snapshots.
    pub fn set_series_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.series_metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn series_metadata(&self) -> &IndexMap<String, String> {
        &self.series_metadata
    }

    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn highlight_behavior(&self) -> HighlightBehavior {
        self.config.highlight_behavior()
    }

    pub fn set_highlight_full_bar_enabled(&mut self, enabled: bool) {
        self.config.highlight_full_bar_enabled = enabled;
    }

    pub fn set_group_selection_enabled(&mut self, enabled: bool) {
        self.config.group_selection_enabled = enabled;
    }

    pub fn set_rounding(&mut self, rounding: Rounding) {
        self.config.rounding = rounding;
    }

    #[must_use]
    pub fn data(&self) -> Option<&ChartData> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replaces the viewport, keeping its visible x-range as given.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    /// Resizes the widget, keeping insets and the visible x-range.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let mut viewport = self.viewport;
        viewport.resize(width, height);
        self.set_viewport(viewport)
    }

    #[must_use]
    pub fn animation_phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Sets animation progress; values are clamped into `0..=1`.
    pub fn set_animation_phase(&mut self, phase_x: f64, phase_y: f64) {
        self.phase = AnimationPhase::new(phase_x, phase_y);
        trace!(phase_x = self.phase.x, phase_y = self.phase.y, "set animation phase");
    }

    #[must_use]
    pub fn axis_range(&self, axis: AxisDependency) -> AxisRange {
        match axis {
            AxisDependency::Left => self.left_axis,
            AxisDependency::Right => self.right_axis,
        }
    }

    /// Pins an axis range; it stays until data is replaced with autoscaling on.
    pub fn set_axis_range(&mut self, axis: AxisDependency, range: AxisRange) {
        match axis {
            AxisDependency::Left => self.left_axis = range,
            AxisDependency::Right => self.right_axis = range,
        }
    }

    pub fn set_axis_inverted(&mut self, axis: AxisDependency, inverted: bool) {
        let range = self.axis_range(axis).with_inverted(inverted);
        self.set_axis_range(axis, range);
    }
}
