mod highlight;
mod highlighter;

pub use highlight::Highlight;
pub use highlighter::Highlighter;

use serde::{Deserialize, Serialize};

use crate::core::Rounding;

/// Default pointer-to-entry cut-off in pixels.
pub const DEFAULT_MAX_HIGHLIGHT_DISTANCE_PX: f64 = 500.0;

/// Flags that shape pointer resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightBehavior {
    /// Select whole stacked bars instead of single slices; distance ignores y.
    pub highlight_full_bar_enabled: bool,
    /// Select by x-value across data sets; distance ignores y.
    pub group_selection_enabled: bool,
    pub rounding: Rounding,
    /// Candidates farther than this from the pointer are ignored.
    pub max_highlight_distance_px: f64,
}

impl Default for HighlightBehavior {
    fn default() -> Self {
        Self {
            highlight_full_bar_enabled: false,
            group_selection_enabled: false,
            rounding: Rounding::Closest,
            max_highlight_distance_px: DEFAULT_MAX_HIGHLIGHT_DISTANCE_PX,
        }
    }
}

/// Current selection held by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    highlighted: Option<Highlight>,
}

impl SelectionState {
    #[must_use]
    pub fn highlighted(self) -> Option<Highlight> {
        self.highlighted
    }

    #[must_use]
    pub fn has_selection(self) -> bool {
        self.highlighted.is_some()
    }

    pub fn select(&mut self, highlight: Option<Highlight>) {
        self.highlighted = highlight;
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
    }

    /// Tap semantics: selecting the current target again deselects it.
    ///
    /// Returns the selection after the toggle.
    pub fn toggle(&mut self, highlight: Option<Highlight>) -> Option<Highlight> {
        self.highlighted = match (self.highlighted, highlight) {
            (Some(current), Some(next)) if current.same_target(&next) => None,
            (_, next) => next,
        };
        self.highlighted
    }
}
