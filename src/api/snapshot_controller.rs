use crate::error::{ChartError, ChartResult};
use crate::render::GeometryRenderer;

use super::{ChartEngine, DataSetSummary, EngineSnapshot};

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    pub fn snapshot(&self) -> ChartResult<EngineSnapshot> {
        let data_sets = self
            .data
            .as_ref()
            .map(|data| {
                data.data_sets()
                    .iter()
                    .map(|set| DataSetSummary {
                        label: set.label().to_owned(),
                        entry_count: set.entry_count(),
                        axis: set.axis_dependency(),
                        visible: set.is_visible(),
                        stacked: set.is_stacked(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(EngineSnapshot {
            viewport: self.viewport,
            left_axis: self.left_axis,
            right_axis: self.right_axis,
            phase: self.phase,
            revision: self.data.as_ref().map(|data| data.revision()),
            data_sets,
            highlight: self.selection.highlighted(),
            frame: self.build_frame()?,
            series_metadata: self.series_metadata.clone(),
        })
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
