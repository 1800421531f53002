use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_POINT_SIZE_PX, Rounding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DEFAULT_MAX_HIGHLIGHT_DISTANCE_PX, HighlightBehavior};

/// Default half width, in x-value units, of line entry accessibility bounds.
pub const DEFAULT_LINE_BOUNDS_HALF_WIDTH: f64 = 0.1;

/// Width multipliers applied to bars while a selection is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightEmphasis {
    /// Width scale of the highlighted bar.
    pub enlarge_highlighted: f64,
    /// Width scale of every other bar.
    pub shrink_unhighlighted: f64,
}

impl Default for HighlightEmphasis {
    fn default() -> Self {
        Self {
            enlarge_highlighted: 1.0,
            shrink_unhighlighted: 1.0,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub highlight_full_bar_enabled: bool,
    #[serde(default)]
    pub group_selection_enabled: bool,
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default = "default_max_highlight_distance_px")]
    pub max_highlight_distance_px: f64,
    #[serde(default)]
    pub fit_bars: bool,
    #[serde(default = "default_auto_scale_axes")]
    pub auto_scale_axes: bool,
    #[serde(default = "default_point_size_px")]
    pub point_size_px: f64,
    #[serde(default = "default_line_bounds_half_width")]
    pub line_bounds_half_width: f64,
    #[serde(default)]
    pub highlight_emphasis: HighlightEmphasis,
    #[serde(default)]
    pub draw_bar_shadow: bool,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            highlight_full_bar_enabled: false,
            group_selection_enabled: false,
            rounding: Rounding::default(),
            max_highlight_distance_px: default_max_highlight_distance_px(),
            fit_bars: false,
            auto_scale_axes: default_auto_scale_axes(),
            point_size_px: default_point_size_px(),
            line_bounds_half_width: default_line_bounds_half_width(),
            highlight_emphasis: HighlightEmphasis::default(),
            draw_bar_shadow: false,
        }
    }

    /// Selects whole stacked bars instead of single slices.
    #[must_use]
    pub fn with_highlight_full_bar_enabled(mut self, enabled: bool) -> Self {
        self.highlight_full_bar_enabled = enabled;
        self
    }

    /// Addresses entries by distinct x-value across data sets.
    #[must_use]
    pub fn with_group_selection_enabled(mut self, enabled: bool) -> Self {
        self.group_selection_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    #[must_use]
    pub fn with_max_highlight_distance_px(mut self, distance: f64) -> Self {
        self.max_highlight_distance_px = distance;
        self
    }

    /// Widens the data x-range by half a bar on each side.
    #[must_use]
    pub fn with_fit_bars(mut self, enabled: bool) -> Self {
        self.fit_bars = enabled;
        self
    }

    /// Refits axis ranges and the visible x-range whenever data changes.
    #[must_use]
    pub fn with_auto_scale_axes(mut self, enabled: bool) -> Self {
        self.auto_scale_axes = enabled;
        self
    }

    #[must_use]
    pub fn with_point_size_px(mut self, size: f64) -> Self {
        self.point_size_px = size;
        self
    }

    #[must_use]
    pub fn with_line_bounds_half_width(mut self, half_width: f64) -> Self {
        self.line_bounds_half_width = half_width;
        self
    }

    #[must_use]
    pub fn with_highlight_emphasis(mut self, emphasis: HighlightEmphasis) -> Self {
        self.highlight_emphasis = emphasis;
        self
    }

    #[must_use]
    pub fn with_draw_bar_shadow(mut self, enabled: bool) -> Self {
        self.draw_bar_shadow = enabled;
        self
    }

    #[must_use]
    pub fn highlight_behavior(self) -> HighlightBehavior {
        HighlightBehavior {
            highlight_full_bar_enabled: self.highlight_full_bar_enabled,
            group_selection_enabled: self.group_selection_enabled,
            rounding: self.rounding,
            max_highlight_distance_px: self.max_highlight_distance_px,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.max_highlight_distance_px.is_finite() || self.max_highlight_distance_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "max highlight distance must be finite and > 0".to_owned(),
            ));
        }
        if !self.point_size_px.is_finite() || self.point_size_px < 0.0 {
            return Err(ChartError::InvalidData(
                "point size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.line_bounds_half_width.is_finite() || self.line_bounds_half_width < 0.0 {
            return Err(ChartError::InvalidData(
                "line bounds half width must be finite and >= 0".to_owned(),
            ));
        }
        for (name, scale) in [
            ("enlarge", self.highlight_emphasis.enlarge_highlighted),
            ("shrink", self.highlight_emphasis.shrink_unhighlighted),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "highlight {name} scale must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_max_highlight_distance_px() -> f64 {
    DEFAULT_MAX_HIGHLIGHT_DISTANCE_PX
}

fn default_auto_scale_axes() -> bool {
    true
}

fn default_point_size_px() -> f64 {
    DEFAULT_POINT_SIZE_PX
}

fn default_line_bounds_half_width() -> f64 {
    DEFAULT_LINE_BOUNDS_HALF_WIDTH
}
