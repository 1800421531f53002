use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Which vertical axis a data set is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisDependency {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel space (`top < bottom` on screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PixelRect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        (self.left + self.right) * 0.5
    }

    /// Returns a copy with `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        let r = self.normalized();
        x >= r.left && x <= r.right && y >= r.top && y <= r.bottom
    }

    /// Truncates every edge toward zero, as integer pixel bounds are reported
    /// to accessibility hosts.
    #[must_use]
    pub fn to_int_rect(self) -> IntRect {
        IntRect {
            left: self.left as i32,
            top: self.top as i32,
            right: self.right as i32,
            bottom: self.bottom as i32,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.left.is_finite()
            || !self.top.is_finite()
            || !self.right.is_finite()
            || !self.bottom.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect edges must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Integer pixel bounds handed to virtual-view hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Rectangle in value space. `top`/`bottom` are y-values, not screen edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ValueRect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Animation progress scalars in `0..=1`.
///
/// `x` limits how many entries are laid out, `y` scales displayed magnitude.
/// Stored data is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationPhase {
    pub x: f64,
    pub y: f64,
}

impl Default for AnimationPhase {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl AnimationPhase {
    /// Builds phases clamped into `0..=1`; non-finite inputs count as `1`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_phase(x),
            y: clamp_phase(y),
        }
    }
}

fn clamp_phase(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Visible chart surface: widget size, the content rectangle where data is
/// plotted, and the x-value range currently scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    insets: ContentInsets,
    #[serde(default = "default_visible_x")]
    visible_x: (f64, f64),
}

fn default_visible_x() -> (f64, f64) {
    (0.0, 1.0)
}

impl Viewport {
    /// Creates a viewport whose content area fills the widget and shows the
    /// x-range `0..=1` until a range is set.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            insets: ContentInsets::default(),
            visible_x: default_visible_x(),
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        let content = self.content_rect();
        self.width > 0 && self.height > 0 && content.width() > 0.0 && content.height() > 0.0
    }

    /// Reserves space around the content rect (axis labels, legends).
    pub fn with_content_insets(mut self, insets: ContentInsets) -> ChartResult<Self> {
        self.set_content_insets(insets)?;
        Ok(self)
    }

    pub fn with_visible_x_range(mut self, low: f64, high: f64) -> ChartResult<Self> {
        self.set_visible_x_range(low, high)?;
        Ok(self)
    }

    pub fn set_content_insets(&mut self, insets: ContentInsets) -> ChartResult<()> {
        let values = [insets.left, insets.top, insets.right, insets.bottom];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ChartError::InvalidData(
                "content insets must be finite and >= 0".to_owned(),
            ));
        }
        self.insets = insets;
        Ok(())
    }

    #[must_use]
    pub fn content_insets(self) -> ContentInsets {
        self.insets
    }

    /// Content rectangle; collapses to zero size rather than inverting when
    /// the insets exceed the widget.
    #[must_use]
    pub fn content_rect(self) -> PixelRect {
        let left = self.insets.left.min(f64::from(self.width));
        let top = self.insets.top.min(f64::from(self.height));
        let right = (f64::from(self.width) - self.insets.right).max(left);
        let bottom = (f64::from(self.height) - self.insets.bottom).max(top);
        PixelRect::new(left, top, right, bottom)
    }

    #[must_use]
    pub fn content_left(self) -> f64 {
        self.content_rect().left
    }

    #[must_use]
    pub fn content_right(self) -> f64 {
        self.content_rect().right
    }

    #[must_use]
    pub fn content_top(self) -> f64 {
        self.content_rect().top
    }

    #[must_use]
    pub fn content_bottom(self) -> f64 {
        self.content_rect().bottom
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn visible_x_range(self) -> (f64, f64) {
        self.visible_x
    }

    #[must_use]
    pub fn lowest_visible_x(self) -> f64 {
        self.visible_x.0
    }

    #[must_use]
    pub fn highest_visible_x(self) -> f64 {
        self.visible_x.1
    }

    /// Sets the visible x-range. `low == high` is accepted and maps with the
    /// identity policy of the transformer.
    pub fn set_visible_x_range(&mut self, low: f64, high: f64) -> ChartResult<()> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ChartError::InvalidData(
                "visible x range must be finite".to_owned(),
            ));
        }
        self.visible_x = if low <= high { (low, high) } else { (high, low) };
        Ok(())
    }

    /// Scrolls the visible range by `delta_x` value units.
    pub fn pan_by(&mut self, delta_x: f64) -> ChartResult<()> {
        if !delta_x.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        self.visible_x = (self.visible_x.0 + delta_x, self.visible_x.1 + delta_x);
        Ok(())
    }

    /// Scrolls by a pixel drag distance; dragging right reveals lower x.
    pub fn pan_by_pixels(&mut self, delta_px: f64) -> ChartResult<()> {
        let content_width = self.content_rect().width();
        if content_width <= 0.0 {
            return Ok(());
        }
        let span = self.visible_x.1 - self.visible_x.0;
        self.pan_by(-delta_px * span / content_width)
    }

    /// Zooms around `center_x`; `factor > 1` zooms in.
    pub fn zoom_around(&mut self, center_x: f64, factor: f64) -> ChartResult<()> {
        if !center_x.is_finite() || !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom center must be finite and factor must be > 0".to_owned(),
            ));
        }
        let (low, high) = self.visible_x;
        self.visible_x = (
            center_x - (center_x - low) / factor,
            center_x + (high - center_x) / factor,
        );
        Ok(())
    }

    #[must_use]
    pub fn is_in_bounds_left(self, x_px: f64) -> bool {
        x_px >= self.content_left()
    }

    #[must_use]
    pub fn is_in_bounds_right(self, x_px: f64) -> bool {
        x_px <= self.content_right()
    }

    #[must_use]
    pub fn is_in_bounds_y(self, y_px: f64) -> bool {
        y_px >= self.content_top() && y_px <= self.content_bottom()
    }

    #[must_use]
    pub fn contains(self, x_px: f64, y_px: f64) -> bool {
        self.content_rect().contains(x_px, y_px)
    }
}
