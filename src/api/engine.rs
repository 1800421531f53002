use std::cell::RefCell;

use indexmap::IndexMap;

use crate::core::{AnimationPhase, AxisRange, ChartData, CoordinateTransformer, Viewport};
use crate::error::ChartResult;
use crate::interaction::SelectionState;
use crate::render::GeometryRenderer;

use super::ChartEngineConfig;
use super::accessibility::SortedIndexCache;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the chart data, viewport, axis ranges, animation
/// phases and selection, and hands materialized geometry to the renderer.
pub struct ChartEngine<R: GeometryRenderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) viewport: Viewport,
    pub(super) data: Option<ChartData>,
    pub(super) left_axis: AxisRange,
    pub(super) right_axis: AxisRange,
    pub(super) phase: AnimationPhase,
    pub(super) selection: SelectionState,
    pub(super) series_metadata: IndexMap<String, String>,
    pub(super) sorted_index_cache: RefCell<SortedIndexCache>,
}

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Value/pixel mapping for the current viewport and axis ranges.
    #[must_use]
    pub fn transformer(&self) -> CoordinateTransformer {
        CoordinateTransformer::new(self.viewport, self.left_axis, self.right_axis)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
