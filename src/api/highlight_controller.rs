use tracing::trace;

use crate::core::{BarBufferBuilder, BarBufferOptions, Entry, EntryAddress, PixelRect, Rounding};
use crate::interaction::{Highlight, Highlighter};
use crate::render::GeometryRenderer;

use super::ChartEngine;

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Resolves a pointer position without touching the selection.
    #[must_use]
    pub fn resolve_highlight(&self, x_px: f64, y_px: f64) -> Option<Highlight> {
        let data = self.data.as_ref()?;
        let transformer = self.transformer();
        Highlighter::new(data, &transformer, self.viewport, self.highlight_behavior())
            .resolve(x_px, y_px)
    }

    /// Resolves a pointer position and makes the result the selection.
    ///
    /// A miss clears the selection.
    pub fn highlight_at(&mut self, x_px: f64, y_px: f64) -> Option<Highlight> {
        let highlight = self.resolve_highlight(x_px, y_px);
        self.selection.select(highlight);
        highlight
    }

    /// Tap semantics: tapping the selected entry again deselects it.
    pub fn tap_at(&mut self, x_px: f64, y_px: f64) -> Option<Highlight> {
        let highlight = self.resolve_highlight(x_px, y_px);
        let selected = self.selection.toggle(highlight);
        trace!(x_px, y_px, selected = selected.is_some(), "tap");
        selected
    }

    /// Selects a known entry as a whole.
    pub fn highlight_entry(&mut self, address: EntryAddress) -> Option<Highlight> {
        let data = self.data.as_ref()?;
        let transformer = self.transformer();
        let highlight =
            Highlighter::new(data, &transformer, self.viewport, self.highlight_behavior())
                .highlight_for_entry(address)?;
        self.selection.select(Some(highlight));
        Some(highlight)
    }

    pub fn clear_highlight(&mut self) {
        self.selection.clear();
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<Highlight> {
        self.selection.highlighted()
    }

    /// Entry behind the current selection, for the host's selection callback.
    #[must_use]
    pub fn selected_entry(&self) -> Option<(&Entry, Highlight)> {
        let highlight = self.selection.highlighted()?;
        let set = self.data.as_ref()?.data_set(highlight.data_set_index())?;
        let entry = set.entry_for_x(highlight.x(), Some(highlight.y()), Rounding::Closest)?;
        (entry.x() == highlight.x()).then_some((entry, highlight))
    }

    /// Pixel outline of the selected bar, or `None` for line data.
    #[must_use]
    pub fn highlight_rect(&self) -> Option<PixelRect> {
        let highlight = self.selection.highlighted()?;
        let data = self.data.as_ref()?;
        let transformer = self.transformer();
        BarBufferBuilder::new(data, &transformer, self.viewport).highlight_rect(
            &highlight,
            self.config.highlight_full_bar_enabled,
            BarBufferOptions {
                phase: self.phase,
                width_scale: self.config.highlight_emphasis.enlarge_highlighted,
                draw_shadow: false,
            },
        )
    }
}
