//! Bar geometry: data set entries expanded into pixel rectangles.
//!
//! The builder is a pure function of the data, the transformer and the
//! viewport. It never draws; the resulting [`BarBuffer`] is handed to a
//! renderer. Rectangles keep entry order, and the slices of a stacked entry
//! keep stack-value order, so every rect maps back to
//! `(entry_index, stack_index)`.

use ordered_float::OrderedFloat;
#[cfg(feature = "parallel-buffers")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::chart_data::{ChartData, DataRevision};
use crate::core::data_set::DataSet;
use crate::core::entry::Entry;
use crate::core::transformer::CoordinateTransformer;
use crate::core::types::{AnimationPhase, AxisDependency, PixelRect, ValueRect, Viewport};
use crate::core::windowing::XBounds;
use crate::error::{ChartError, ChartResult};
use crate::interaction::Highlight;

/// Screen direction a bar grows from its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundedEdge {
    Top,
    Bottom,
}

/// Corners to round on one rect: both corners of `edge`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRounding {
    pub radius: f64,
    pub edge: RoundedEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub entry_index: usize,
    /// Stack slice for stacked entries, `None` for a plain bar.
    pub stack_index: Option<usize>,
    pub rect: PixelRect,
    pub direction: BarDirection,
    pub rounding: Option<CornerRounding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarBuffer {
    pub data_set_index: usize,
    pub revision: DataRevision,
    pub border_width: f64,
    pub bars: Vec<BarRect>,
    /// Full-height background rects, one per laid-out entry, when requested.
    pub shadows: Vec<PixelRect>,
}

impl BarBuffer {
    fn empty(data_set_index: usize, revision: DataRevision, border_width: f64) -> Self {
        Self {
            data_set_index,
            revision,
            border_width,
            bars: Vec::new(),
            shadows: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Rects belonging to one entry.
    #[must_use]
    pub fn bars_for_entry(&self, entry_index: usize) -> &[BarRect] {
        let start = self
            .bars
            .partition_point(|bar| bar.entry_index < entry_index);
        let end = self
            .bars
            .partition_point(|bar| bar.entry_index <= entry_index);
        &self.bars[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarBufferOptions {
    pub phase: AnimationPhase,
    /// Multiplier on the data's bar width.
    pub width_scale: f64,
    pub draw_shadow: bool,
}

impl Default for BarBufferOptions {
    fn default() -> Self {
        Self {
            phase: AnimationPhase::default(),
            width_scale: 1.0,
            draw_shadow: false,
        }
    }
}

/// Grows a rect that is thinner than `min_height` pixels away from its
/// baseline. Zero-height rects (zero values) and rects already tall enough
/// are returned unchanged.
#[must_use]
pub fn clamp_bar_height(rect: PixelRect, direction: BarDirection, min_height: f64) -> PixelRect {
    let height = rect.height();
    if height <= 0.0 || height >= min_height {
        return rect;
    }
    match direction {
        BarDirection::Up => PixelRect {
            top: rect.bottom - min_height,
            ..rect
        },
        BarDirection::Down => PixelRect {
            bottom: rect.top + min_height,
            ..rect
        },
    }
}

/// Value-space segment of one rect before projection.
#[derive(Debug, Clone, Copy)]
struct Segment {
    stack_index: Option<usize>,
    base: f64,
    far: f64,
    grows_up: bool,
}

fn entry_segments(entry: &Entry) -> SmallVec<[Segment; 4]> {
    let mut segments = SmallVec::new();
    match entry.stack_values() {
        None => segments.push(Segment {
            stack_index: None,
            base: 0.0,
            far: entry.y(),
            grows_up: entry.y() >= 0.0,
        }),
        Some(values) => {
            for (index, (value, range)) in values.iter().zip(entry.stack_ranges()).enumerate() {
                let grows_up = *value >= 0.0;
                let (base, far) = if grows_up {
                    (range.from, range.to)
                } else {
                    (range.to, range.from)
                };
                segments.push(Segment {
                    stack_index: Some(index),
                    base,
                    far,
                    grows_up,
                });
            }
        }
    }
    segments
}

/// Slice that carries the rounded corners: the last non-zero positive slice,
/// or, when nothing is positive, the first negative one (negative slices
/// stack downward from the most negative end).
fn outermost_segment(entry: &Entry) -> Option<usize> {
    match entry.stack_values() {
        None => Some(0),
        Some(values) => values
            .iter()
            .rposition(|value| *value > 0.0)
            .or_else(|| values.iter().position(|value| *value < 0.0)),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BarBufferBuilder<'a> {
    data: &'a ChartData,
    transformer: &'a CoordinateTransformer,
    viewport: Viewport,
}

impl<'a> BarBufferBuilder<'a> {
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

    fn bar_width(&self) -> ChartResult<f64> {
        self.data.bar_width().ok_or(ChartError::NotBarData)
    }

    fn data_set(&self, data_set_index: usize) -> ChartResult<&'a DataSet> {
        self.data
            .data_set(data_set_index)
            .ok_or(ChartError::IndexOutOfRange {
                index: data_set_index,
                len: self.data.data_set_count(),
            })
    }

    /// Builds rects for the entries of one data set that can be visible.
    pub fn build(
        &self,
        data_set_index: usize,
        options: BarBufferOptions,
    ) -> ChartResult<BarBuffer> {
        let set = self.data_set(data_set_index)?;
        let bar_width = self.bar_width()? * sanitized_scale(options.width_scale);
        let half = bar_width * 0.5;
        let (low, high) = self.viewport.visible_x_range();

        let Some(bounds) = XBounds::compute(set, low - half, high + half, options.phase.x) else {
            return Ok(BarBuffer::empty(
                data_set_index,
                self.data.revision(),
                set.bar_border_width(),
            ));
        };

        let buffer = self.build_entries(data_set_index, set, bounds.indices(), bar_width, options);
        trace!(
            data_set_index,
            min = bounds.min,
            max = bounds.max,
            rects = buffer.bars.len(),
            "built bar buffer"
        );
        Ok(buffer)
    }

    /// Builds rects for one entry only, e.g. to redraw a highlighted bar with
    /// its own width scale.
    pub fn build_for_entry(
        &self,
        data_set_index: usize,
        entry_index: usize,
        options: BarBufferOptions,
    ) -> ChartResult<BarBuffer> {
        let set = self.data_set(data_set_index)?;
        if entry_index >= set.entry_count() {
            return Err(ChartError::IndexOutOfRange {
                index: entry_index,
                len: set.entry_count(),
            });
        }
        let bar_width = self.bar_width()? * sanitized_scale(options.width_scale);
        Ok(self.build_entries(
            data_set_index,
            set,
            entry_index..=entry_index,
            bar_width,
            options,
        ))
    }

    /// Builds buffers for every visible data set in `ChartData` order.
    pub fn build_all(&self, options: BarBufferOptions) -> ChartResult<Vec<BarBuffer>> {
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

    fn build_entries(
        &self,
        data_set_index: usize,
        set: &DataSet,
        indices: impl Iterator<Item = usize>,
        bar_width: f64,
        options: BarBufferOptions,
    ) -> BarBuffer {
        let axis = set.axis_dependency();
        let inverted = self.transformer.is_inverted(axis);
        let half = bar_width * 0.5;
        let radius = set.corner_radius();
        let min_height = set.min_bar_height();
        let content = self.viewport.content_rect();

        let mut buffer = BarBuffer::empty(
            data_set_index,
            self.data.revision(),
            set.bar_border_width(),
        );

        for entry_index in indices {
            let Some(entry) = set.entry(entry_index) else {
                break;
            };
            let outermost = if radius > 0.0 {
                outermost_segment(entry)
            } else {
                None
            };

            for (position, segment) in entry_segments(entry).into_iter().enumerate() {
                let direction = if segment.grows_up != inverted {
                    BarDirection::Up
                } else {
                    BarDirection::Down
                };
                let rect = self.segment_rect(entry.x(), half, segment, axis, options.phase.y);
                let rect = clamp_bar_height(rect, direction, min_height);
                let rounding = (outermost == Some(position)).then_some(CornerRounding {
                    radius,
                    edge: match direction {
                        BarDirection::Up => RoundedEdge::Top,
                        BarDirection::Down => RoundedEdge::Bottom,
                    },
                });

                buffer.bars.push(BarRect {
                    entry_index,
                    stack_index: segment.stack_index,
                    rect,
                    direction,
                    rounding,
                });
            }

            if options.draw_shadow {
                let x_left = self.transformer.x_value_to_pixel(entry.x() - half);
                let x_right = self.transformer.x_value_to_pixel(entry.x() + half);
                buffer.shadows.push(
                    PixelRect::new(x_left, content.top, x_right, content.bottom).normalized(),
                );
            }
        }

        buffer
    }

    fn segment_rect(
        &self,
        x: f64,
        half_width: f64,
        segment: Segment,
        axis: AxisDependency,
        phase_y: f64,
    ) -> PixelRect {
        self.transformer.rect_to_pixel_phase(
            ValueRect::new(x - half_width, segment.far, x + half_width, segment.base),
            axis,
            phase_y,
        )
    }

    /// Pixel rect that outlines a highlighted bar.
    ///
    /// A stacked entry is outlined by its highlighted slice, or by the whole
    /// bar from `-negative_sum` to `positive_sum` when `full_bar` is set or the
    /// highlight names no slice. Plain bars span `0..y`. Returns `None` when
    /// the entry cannot be found, highlighting is disabled for its data set,
    /// or the x animation phase has not revealed it yet.
    #[must_use]
    pub fn highlight_rect(
        &self,
        highlight: &Highlight,
        full_bar: bool,
        options: BarBufferOptions,
    ) -> Option<PixelRect> {
        let bar_width = self.data.bar_width()? * sanitized_scale(options.width_scale);
        let set = self.data.data_set(highlight.data_set_index())?;
        if !set.is_highlight_enabled() {
            return None;
        }

        let entry_index = set.index_range_for_x(highlight.x()).min_by_key(|index| {
            OrderedFloat((set.entries()[*index].y() - highlight.y()).abs())
        })?;
        if entry_index as f64 >= set.entry_count() as f64 * options.phase.x {
            return None;
        }
        let entry = set.entry(entry_index)?;

        let (y1, y2) = match (entry.is_stacked(), highlight.stack_index()) {
            (true, Some(stack_index)) if !full_bar => {
                let slice = entry.stack_ranges().get(stack_index).copied()?;
                (slice.to, slice.from)
            }
            (true, _) => (entry.positive_sum(), -entry.negative_sum()),
            (false, _) => (entry.y(), 0.0),
        };

        let half = bar_width * 0.5;
        Some(self.transformer.rect_to_pixel_phase(
            ValueRect::new(entry.x() - half, y1, entry.x() + half, y2),
            set.axis_dependency(),
            options.phase.y,
        ))
    }
}

fn sanitized_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
