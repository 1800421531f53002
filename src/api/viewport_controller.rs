use tracing::trace;

use crate::error::ChartResult;
use crate::render::GeometryRenderer;

use super::ChartEngine;

impl<R: GeometryRenderer> ChartEngine<R> {
    #[must_use]
    pub fn visible_x_range(&self) -> (f64, f64) {
        self.viewport.visible_x_range()
    }

    pub fn set_visible_x_range(&mut self, low: f64, high: f64) -> ChartResult<()> {
        self.viewport.set_visible_x_range(low, high)?;
        trace!(low, high, "set visible x range");
        Ok(())
    }

    /// Scrolls by a pointer drag of `delta_px` pixels.
    pub fn pan_by_pixels(&mut self, delta_px: f64) -> ChartResult<()> {
        self.viewport.pan_by_pixels(delta_px)?;
        let (low, high) = self.viewport.visible_x_range();
        trace!(delta_px, low, high, "pan visible range");
        Ok(())
    }

    pub fn pan_by_value(&mut self, delta_x: f64) -> ChartResult<()> {
        self.viewport.pan_by(delta_x)
    }

    /// Zooms around the x-value under pixel `center_px`; `factor > 1` zooms in.
    pub fn zoom_around_pixel(&mut self, center_px: f64, factor: f64) -> ChartResult<()> {
        let center_x = self.transformer().x_pixel_to_value(center_px);
        self.viewport.zoom_around(center_x, factor)?;
        let (low, high) = self.viewport.visible_x_range();
        trace!(center_px, center_x, factor, low, high, "zoom visible range");
        Ok(())
    }
}
