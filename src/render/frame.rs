use serde::{Deserialize, Serialize};

use crate::core::{BarBuffer, DataRevision, LineBuffer, PixelRect, Viewport};
use crate::error::{ChartError, ChartResult};

/// Backend-agnostic geometry for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryFrame {
    pub viewport: Viewport,
    pub revision: DataRevision,
    pub bars: Vec<BarBuffer>,
    /// Selected bar redrawn at its emphasis width, on top of `bars`.
    pub highlighted_bar: Option<BarBuffer>,
    pub lines: Vec<LineBuffer>,
    pub highlight_rects: Vec<PixelRect>,
}

impl GeometryFrame {
    #[must_use]
    pub fn new(viewport: Viewport, revision: DataRevision) -> Self {
        Self {
            viewport,
            revision,
            bars: Vec::new(),
            highlighted_bar: None,
            lines: Vec::new(),
            highlight_rects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bar_buffer(mut self, buffer: BarBuffer) -> Self {
        self.bars.push(buffer);
        self
    }

    #[must_use]
    pub fn with_line_buffer(mut self, buffer: LineBuffer) -> Self {
        self.lines.push(buffer);
        self
    }

    #[must_use]
    pub fn with_highlight_rect(mut self, rect: PixelRect) -> Self {
        self.highlight_rects.push(rect);
        self
    }

    /// Rejects invalid viewports, non-finite geometry and buffers built from
    /// another data revision.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for buffer in self.bars.iter().chain(self.highlighted_bar.as_ref()) {
            self.check_revision(buffer.revision)?;
            for bar in &buffer.bars {
                bar.rect.validate()?;
            }
            for shadow in &buffer.shadows {
                shadow.validate()?;
            }
        }
        for buffer in &self.lines {
            self.check_revision(buffer.revision)?;
            for point in &buffer.points {
                point.bounds.validate()?;
            }
        }
        for rect in &self.highlight_rects {
            rect.validate()?;
        }

        Ok(())
    }

    fn check_revision(&self, revision: DataRevision) -> ChartResult<()> {
        if revision != self.revision {
            return Err(ChartError::InvalidData(format!(
                "buffer revision {} does not match frame revision {}",
                revision.value(),
                self.revision.value()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.bars.iter().map(BarBuffer::len).sum()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(LineBuffer::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bar_count() == 0 && self.point_count() == 0 && self.highlight_rects.is_empty()
    }
}
