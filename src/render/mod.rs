mod frame;
mod null_renderer;

pub use frame::GeometryFrame;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive fully materialized pixel geometry, so painting code stays
/// isolated from chart data, selection and traversal logic.
pub trait GeometryRenderer {
    fn render(&mut self, frame: &GeometryFrame) -> ChartResult<()>;
}
