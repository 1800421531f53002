use std::cell::RefCell;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{AnimationPhase, AxisRange};
use crate::error::ChartResult;
use crate::interaction::SelectionState;
use crate::render::GeometryRenderer;

use super::accessibility::SortedIndexCache;
use super::{ChartEngine, ChartEngineConfig};

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Creates an engine without data.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            full_bar = config.highlight_full_bar_enabled,
            group_selection = config.group_selection_enabled,
            "create chart engine"
        );

        Ok(Self {
            renderer,
            config,
            viewport: config.viewport,
            data: None,
            left_axis: AxisRange::default(),
            right_axis: AxisRange::default(),
            phase: AnimationPhase::default(),
            selection: SelectionState::default(),
            series_metadata: IndexMap::new(),
            sorted_index_cache: RefCell::new(SortedIndexCache::default()),
        })
    }
}
