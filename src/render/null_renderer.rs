use crate::error::ChartResult;
use crate::render::{GeometryFrame, GeometryRenderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_bar_count: usize,
    pub last_point_count: usize,
    pub last_highlight_count: usize,
    pub frames_rendered: u64,
}

impl GeometryRenderer for NullRenderer {
    fn render(&mut self, frame: &GeometryFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_bar_count = frame.bar_count();
        self.last_point_count = frame.point_count();
        self.last_highlight_count = frame.highlight_rects.len();
        self.frames_rendered += 1;
        Ok(())
    }
}
