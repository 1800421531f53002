use tracing::{debug, warn};

use crate::core::{AxisDependency, AxisRange, ChartData, DataRevision};
use crate::error::{ChartError, ChartResult};
use crate::render::GeometryRenderer;

use super::ChartEngine;

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Replaces the chart data wholesale and drops the selection.
    pub fn set_data(&mut self, data: ChartData) {
        debug!(
            data_sets = data.data_set_count(),
            entries = data.entry_count(),
            bar = data.is_bar(),
            revision = data.revision().value(),
            "set chart data"
        );
        self.data = Some(data);
        self.selection.clear();
        if self.config.auto_scale_axes {
            self.autoscale_axes();
        }
    }

    /// Removes the data and returns it.
    pub fn take_data(&mut self) -> Option<ChartData> {
        self.selection.clear();
        self.data.take()
    }

    /// Lays bar data sets out side by side; see [`ChartData::group_bars`].
    ///
    /// Fails with `NoData` when no data has been set. The selection is
    /// cleared because every entry moves.
    pub fn group_bars(
        &mut self,
        from_x: f64,
        group_space: f64,
        bar_space: f64,
    ) -> ChartResult<DataRevision> {
        let data = self.data.as_mut().ok_or(ChartError::NoData)?;
        let revision = data.group_bars(from_x, group_space, bar_space)?;
        self.selection.clear();
        if self.config.auto_scale_axes {
            self.autoscale_axes();
        }
        Ok(revision)
    }

    pub fn set_data_set_visible(
        &mut self,
        data_set_index: usize,
        visible: bool,
    ) -> ChartResult<()> {
        let data = self.data.as_mut().ok_or(ChartError::NoData)?;
        let len = data.data_set_count();
        let set = data
            .data_set_mut(data_set_index)
            .ok_or(ChartError::IndexOutOfRange {
                index: data_set_index,
                len,
            })?;
        set.set_visible(visible);
        if !visible
            && self
                .selection
                .highlighted()
                .is_some_and(|highlight| highlight.data_set_index() == data_set_index)
        {
            self.selection.clear();
        }
        Ok(())
    }

    /// Fits both y-axes and the visible x-range to the current data.
    ///
    /// Bar data keeps zero in view. Axis inversion flags are preserved.
    pub fn autoscale_axes(&mut self) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let include_zero = data.is_bar();
        let fit = |axis: AxisDependency, current: AxisRange| {
            AxisRange::from_data(
                data.y_min(axis).unwrap_or(f64::NAN),
                data.y_max(axis).unwrap_or(f64::NAN),
                include_zero,
            )
            .with_inverted(current.inverted)
        };
        self.left_axis = fit(AxisDependency::Left, self.left_axis);
        self.right_axis = fit(AxisDependency::Right, self.right_axis);

        if let Some((low, high)) = data.x_range(self.config.fit_bars) {
            let (low, high) = if low == high {
                (low - 0.5, high + 0.5)
            } else {
                (low, high)
            };
            if let Err(err) = self.viewport.set_visible_x_range(low, high) {
                warn!(error = %err, "skipping visible range refit after data change");
            }
        }
    }
}
