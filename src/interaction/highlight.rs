use serde::{Deserialize, Serialize};

use crate::core::AxisDependency;

/// A resolved selection: one entry, optionally one stack slice of it.
///
/// Created fresh for every pointer event. The only mutation is
/// [`Highlight::set_draw`], which caches where the indicator was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    x: f64,
    y: f64,
    x_px: f64,
    y_px: f64,
    data_set_index: usize,
    stack_index: Option<usize>,
    axis: AxisDependency,
    draw_x: Option<f64>,
    draw_y: Option<f64>,
}

impl Highlight {
    #[must_use]
    pub fn new(
        x: f64,
        y: f64,
        x_px: f64,
        y_px: f64,
        data_set_index: usize,
        axis: AxisDependency,
    ) -> Self {
        Self {
            x,
            y,
            x_px,
            y_px,
            data_set_index,
            stack_index: None,
            axis,
            draw_x: None,
            draw_y: None,
        }
    }

    #[must_use]
    pub fn with_stack_index(mut self, stack_index: Option<usize>) -> Self {
        self.stack_index = stack_index;
        self
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn x_px(&self) -> f64 {
        self.x_px
    }

    #[must_use]
    pub fn y_px(&self) -> f64 {
        self.y_px
    }

    #[must_use]
    pub fn data_set_index(&self) -> usize {
        self.data_set_index
    }

    /// `None` selects the whole bar.
    #[must_use]
    pub fn stack_index(&self) -> Option<usize> {
        self.stack_index
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stack_index.is_some()
    }

    #[must_use]
    pub fn axis(&self) -> AxisDependency {
        self.axis
    }

    #[must_use]
    pub fn draw_position(&self) -> Option<(f64, f64)> {
        Some((self.draw_x?, self.draw_y?))
    }

    pub fn set_draw(&mut self, x: f64, y: f64) {
        self.draw_x = Some(x);
        self.draw_y = Some(y);
    }

    /// Same entry and slice, ignoring pixel and draw positions.
    #[must_use]
    pub fn same_target(&self, other: &Highlight) -> bool {
        self.data_set_index == other.data_set_index
            && self.x == other.x
            && self.y == other.y
            && self.stack_index == other.stack_index
    }
}
