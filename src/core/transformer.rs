use serde::{Deserialize, Serialize};

use crate::core::scale::LinearScale;
use crate::core::types::{AxisDependency, PixelPoint, PixelRect, ValueRect, Viewport};
use crate::error::{ChartError, ChartResult};

/// Padding applied on each side of an axis fitted to a single value.
pub const FLAT_SPAN_PADDING: f64 = 1.0;

/// Value range of one y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    /// When set, `min` is drawn at the top of the content rect.
    #[serde(default)]
    pub inverted: bool,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            inverted: false,
        }
    }
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "axis range must be finite".to_owned(),
            ));
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Ok(Self {
            min,
            max,
            inverted: false,
        })
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Fits a range around aggregated data extents.
    ///
    /// Non-finite extents (no data on this axis) fall back to `0..1`.
    /// `include_zero` pins the baseline into view, as bars grow from zero.
    /// A zero span is widened by one unit on each side so flat data still
    /// maps through the content rect.
    #[must_use]
    pub fn from_data(min: f64, max: f64, include_zero: bool) -> Self {
        if !min.is_finite() || !max.is_finite() {
            return Self::default();
        }
        let (mut min, mut max) = if min <= max { (min, max) } else { (max, min) };
        if include_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if min == max {
            min -= FLAT_SPAN_PADDING;
            max += FLAT_SPAN_PADDING;
        }
        Self {
            min,
            max,
            inverted: false,
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Value/pixel mapping for a single axis dependency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    x: LinearScale,
    y: LinearScale,
    range: AxisRange,
}

impl AxisTransform {
    fn new(viewport: Viewport, range: AxisRange) -> Self {
        let content = viewport.content_rect();
        let (low_x, high_x) = viewport.visible_x_range();
        let x = LinearScale::new(low_x, high_x, content.left, content.right)
            .unwrap_or_else(|_| LinearScale::identity());
        let (y_start_px, y_end_px) = if range.inverted {
            (content.top, content.bottom)
        } else {
            (content.bottom, content.top)
        };
        let y = LinearScale::new(range.min, range.max, y_start_px, y_end_px)
            .unwrap_or_else(|_| LinearScale::identity());
        Self { x, y, range }
    }

    #[must_use]
    pub fn x_scale(self) -> LinearScale {
        self.x
    }

    #[must_use]
    pub fn y_scale(self) -> LinearScale {
        self.y
    }

    #[must_use]
    pub fn value_to_pixel(self, x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(self.x.value_to_pixel(x), self.y.value_to_pixel(y))
    }

    #[must_use]
    pub fn pixel_to_value(self, x_px: f64, y_px: f64) -> (f64, f64) {
        (self.x.pixel_to_value(x_px), self.y.pixel_to_value(y_px))
    }
}

/// Bidirectional mapping between data values and pixels for both y-axes.
///
/// Built from the viewport's content rect and visible x-range plus one
/// [`AxisRange`] per y-axis. It is a plain value: rebuild it whenever the
/// viewport or an axis range changes instead of mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransformer {
    left: AxisTransform,
    right: AxisTransform,
}

impl CoordinateTransformer {
    #[must_use]
    pub fn new(viewport: Viewport, left: AxisRange, right: AxisRange) -> Self {
        Self {
            left: AxisTransform::new(viewport, left),
            right: AxisTransform::new(viewport, right),
        }
    }

    #[must_use]
    pub fn axis(&self, axis: AxisDependency) -> AxisTransform {
        match axis {
            AxisDependency::Left => self.left,
            AxisDependency::Right => self.right,
        }
    }

    #[must_use]
    pub fn axis_range(&self, axis: AxisDependency) -> AxisRange {
        self.axis(axis).range
    }

    #[must_use]
    pub fn is_inverted(&self, axis: AxisDependency) -> bool {
        self.axis(axis).range.inverted
    }

    #[must_use]
    pub fn value_to_pixel(&self, x: f64, y: f64, axis: AxisDependency) -> PixelPoint {
        self.axis(axis).value_to_pixel(x, y)
    }

    /// Maps a value with the y component scaled by the animation phase.
    #[must_use]
    pub fn value_to_pixel_phase(
        &self,
        x: f64,
        y: f64,
        axis: AxisDependency,
        phase_y: f64,
    ) -> PixelPoint {
        self.axis(axis).value_to_pixel(x, y * phase_y)
    }

    #[must_use]
    pub fn pixel_to_value(&self, x_px: f64, y_px: f64, axis: AxisDependency) -> (f64, f64) {
        self.axis(axis).pixel_to_value(x_px, y_px)
    }

    /// The x mapping is shared by both axes.
    #[must_use]
    pub fn x_value_to_pixel(&self, x: f64) -> f64 {
        self.left.x.value_to_pixel(x)
    }

    #[must_use]
    pub fn x_pixel_to_value(&self, x_px: f64) -> f64 {
        self.left.x.pixel_to_value(x_px)
    }

    #[must_use]
    pub fn y_value_to_pixel(&self, y: f64, axis: AxisDependency) -> f64 {
        self.axis(axis).y.value_to_pixel(y)
    }

    #[must_use]
    pub fn y_pixel_to_value(&self, y_px: f64, axis: AxisDependency) -> f64 {
        self.axis(axis).y.pixel_to_value(y_px)
    }

    /// Converts value-space points to pixels in place.
    pub fn points_value_to_pixel(&self, points: &mut [PixelPoint], axis: AxisDependency) {
        let transform = self.axis(axis);
        for point in points.iter_mut() {
            *point = transform.value_to_pixel(point.x, point.y);
        }
    }

    /// Converts pixel points back to value space in place.
    pub fn points_pixel_to_value(&self, points: &mut [PixelPoint], axis: AxisDependency) {
        let transform = self.axis(axis);
        for point in points.iter_mut() {
            let (x, y) = transform.pixel_to_value(point.x, point.y);
            *point = PixelPoint::new(x, y);
        }
    }

    /// Maps a value rectangle to a normalized pixel rectangle.
    #[must_use]
    pub fn rect_value_to_pixel(&self, rect: ValueRect, axis: AxisDependency) -> PixelRect {
        self.rect_to_pixel_phase(rect, axis, 1.0)
    }

    /// Maps a value rectangle with its y-values scaled by `phase_y`.
    #[must_use]
    pub fn rect_to_pixel_phase(
        &self,
        rect: ValueRect,
        axis: AxisDependency,
        phase_y: f64,
    ) -> PixelRect {
        let transform = self.axis(axis);
        let top_left = transform.value_to_pixel(rect.left, rect.top * phase_y);
        let bottom_right = transform.value_to_pixel(rect.right, rect.bottom * phase_y);
        PixelRect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y).normalized()
    }
}
