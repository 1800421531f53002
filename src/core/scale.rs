use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear mapping from a value domain onto a pixel span.
///
/// The pixel span may run backwards (`range_start > range_end`), which is how
/// y-axes grow upward on screen. When either span is zero the scale falls back
/// to the identity mapping so callers never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn identity() -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 0.0,
            range_start: 0.0,
            range_end: 0.0,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end || self.range_start == self.range_end
    }

    /// Pixels per value unit, signed. `1.0` for a degenerate scale.
    #[must_use]
    pub fn pixels_per_unit(self) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        (self.range_end - self.range_start) / (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return value;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        if self.is_degenerate() {
            return pixel;
        }
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}
