use tracing::trace;

use crate::core::{
    BarBufferBuilder, BarBufferOptions, ChartData, CoordinateTransformer, DataRevision,
    LineBufferBuilder, LineBufferOptions, PixelRect, Rounding,
};
use crate::error::ChartResult;
use crate::interaction::Highlight;
use crate::render::{GeometryFrame, GeometryRenderer};

use super::ChartEngine;

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Materializes the geometry of the current state without rendering it.
    pub fn build_frame(&self) -> ChartResult<GeometryFrame> {
        let Some(data) = self.data.as_ref() else {
            return Ok(GeometryFrame::new(self.viewport, DataRevision::default()));
        };
        let transformer = self.transformer();
        let mut frame = GeometryFrame::new(self.viewport, data.revision());
        let selected = self.selection.highlighted();

        if data.is_bar() {
            self.build_bar_geometry(&mut frame, data, &transformer, selected)?;
        } else {
            self.build_line_geometry(&mut frame, data, &transformer, selected)?;
        }

        trace!(
            revision = data.revision().value(),
            bars = frame.bar_count(),
            points = frame.point_count(),
            highlights = frame.highlight_rects.len(),
            "built geometry frame"
        );
        Ok(frame)
    }

    fn build_bar_geometry(
        &self,
        frame: &mut GeometryFrame,
        data: &ChartData,
        transformer: &CoordinateTransformer,
        selected: Option<Highlight>,
    ) -> ChartResult<()> {
        let emphasis = self.config.highlight_emphasis;
        let builder = BarBufferBuilder::new(data, transformer, self.viewport);
        let options = BarBufferOptions {
            phase: self.phase,
            width_scale: if selected.is_some() {
                emphasis.shrink_unhighlighted
            } else {
                1.0
            },
            draw_shadow: self.config.draw_bar_shadow,
        };
        frame.bars = builder.build_all(options)?;

        let Some(highlight) = selected else {
            return Ok(());
        };
        let highlight_options = BarBufferOptions {
            width_scale: emphasis.enlarge_highlighted,
            draw_shadow: false,
            ..options
        };
        if let Some(entry_index) = selected_entry_index(data, &highlight) {
            frame.highlighted_bar = Some(builder.build_for_entry(
                highlight.data_set_index(),
                entry_index,
                highlight_options,
            )?);
        }
        if let Some(rect) = builder.highlight_rect(
            &highlight,
            self.config.highlight_full_bar_enabled,
            highlight_options,
        ) {
            frame.highlight_rects.push(rect);
        }
        Ok(())
    }

    fn build_line_geometry(
        &self,
        frame: &mut GeometryFrame,
        data: &ChartData,
        transformer: &CoordinateTransformer,
        selected: Option<Highlight>,
    ) -> ChartResult<()> {
        let options = LineBufferOptions {
            phase: self.phase,
            point_size_px: self.config.point_size_px,
        };
        frame.lines = LineBufferBuilder::new(data, transformer, self.viewport).build_all(options)?;

        if let Some(highlight) = selected {
            let center = transformer.value_to_pixel_phase(
                highlight.x(),
                highlight.y(),
                highlight.axis(),
                self.phase.y,
            );
            let half = self.config.point_size_px * 0.5;
            frame.highlight_rects.push(PixelRect::new(
                center.x - half,
                center.y - half,
                center.x + half,
                center.y + half,
            ));
        }
        Ok(())
    }
}

fn selected_entry_index(data: &ChartData, highlight: &Highlight) -> Option<usize> {
    let set = data.data_set(highlight.data_set_index())?;
    let index = set.entry_index_for_x(highlight.x(), Some(highlight.y()), Rounding::Closest)?;
    (set.entry(index)?.x() == highlight.x()).then_some(index)
}
