#[cfg(feature = "parallel-buffers")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::chart_data::{ChartData, DataRevision};
use crate::core::transformer::CoordinateTransformer;
use crate::core::types::{AnimationPhase, PixelPoint, PixelRect, Viewport};
use crate::core::windowing::XBounds;
use crate::error::{ChartError, ChartResult};

/// Default marker size in pixels for line entries.
pub const DEFAULT_POINT_SIZE_PX: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub entry_index: usize,
    pub center: PixelPoint,
    /// Square of `point_size` pixels around `center`.
    pub bounds: PixelRect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBuffer {
    pub data_set_index: usize,
    pub revision: DataRevision,
    pub points: Vec<LinePoint>,
}

impl LineBuffer {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn point_for_entry(&self, entry_index: usize) -> Option<&LinePoint> {
        self.points
            .binary_search_by_key(&entry_index, |point| point.entry_index)
            .ok()
            .map(|index| &self.points[index])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineBufferOptions {
    pub phase: AnimationPhase,
    pub point_size_px: f64,
}

impl Default for LineBufferOptions {
    fn default() -> Self {
        Self {
            phase: AnimationPhase::default(),
            point_size_px: DEFAULT_POINT_SIZE_PX,
        }
    }
}

/// Projects the visible entries of a data set to pixel points.
#[derive(Debug, Clone, Copy)]
pub struct LineBufferBuilder<'a> {
    data: &'a ChartData,
    transformer: &'a CoordinateTransformer,
    viewport: Viewport,
}

impl<'a> LineBufferBuilder<'a> {
    #[must_use]
    pub fn new(
        data: &'a ChartData,
        transformer: &'a CoordinateTransformer,
        viewport: Viewport,
    ) -> Self {
        Self {
            data,
            transformer,
            viewport,
        }
    }

    pub fn build(
        &self,
        data_set_index: usize,
        options: LineBufferOptions,
    ) -> ChartResult<LineBuffer> {
        let set = self
            .data
            .data_set(data_set_index)
            .ok_or(ChartError::IndexOutOfRange {
                index: data_set_index,
                len: self.data.data_set_count(),
            })?;
        if !options.point_size_px.is_finite() || options.point_size_px < 0.0 {
            return Err(ChartError::InvalidData(
                "point size must be finite and >= 0".to_owned(),
            ));
        }

        let mut buffer = LineBuffer {
            data_set_index,
            revision: self.data.revision(),
            points: Vec::new(),
        };
        let (low, high) = self.viewport.visible_x_range();
        let Some(bounds) = XBounds::compute(set, low, high, options.phase.x) else {
            return Ok(buffer);
        };

        let axis = set.axis_dependency();
        let half = options.point_size_px * 0.5;
        for entry_index in bounds.indices() {
            let Some(entry) = set.entry(entry_index) else {
                break;
            };
            let center = self.transformer.value_to_pixel_phase(
                entry.x(),
                entry.y(),
                axis,
                options.phase.y,
            );
            buffer.points.push(LinePoint {
                entry_index,
                center,
                bounds: PixelRect::new(
                    center.x - half,
                    center.y - half,
                    center.x + half,
                    center.y + half,
                ),
            });
        }

        trace!(
            data_set_index,
            min = bounds.min,
            max = bounds.max,
            points = buffer.points.len(),
            "built line buffer"
        );
        Ok(buffer)
    }

    /// Builds buffers for every visible data set in `ChartData` order.
    pub fn build_all(&self, options: LineBufferOptions) -> ChartResult<Vec<LineBuffer>> {
        let visible: Vec<usize> = self
            .data
            .data_sets()
            .iter()
            .enumerate()
            .filter(|(_, set)| set.is_visible())
            .map(|(index, _)| index)
            .collect();

        #[cfg(feature = "parallel-buffers")]
        {
            visible
                .par_iter()
                .map(|index| self.build(*index, options))
                .collect()
        }

        #[cfg(not(feature = "parallel-buffers"))]
        {
            visible
                .iter()
                .map(|index| self.build(*index, options))
                .collect()
        }
    }
}
