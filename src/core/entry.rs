use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Opaque icon handle; the drawing layer owns what it points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconHandle(pub u64);

/// Value-space span of one stack slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackRange {
    pub from: f64,
    pub to: f64,
}

impl StackRange {
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Half-open on the baseline side: `from < value <= to`.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value > self.from && value <= self.to
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.from == self.to
    }

    fn distance_to(self, value: f64) -> f64 {
        if value < self.from {
            self.from - value
        } else if value > self.to {
            value - self.to
        } else {
            0.0
        }
    }
}

pub type StackRanges = SmallVec<[StackRange; 4]>;

/// A single data point, optionally split into signed stack values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    x: f64,
    y: f64,
    stack_values: Option<Vec<f64>>,
    icon: Option<IconHandle>,
    accessibility_label: String,
}

impl Entry {
    pub fn new(x: f64, y: f64) -> ChartResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "entry values must be finite".to_owned(),
            ));
        }
        Ok(Self {
            x,
            y,
            stack_values: None,
            icon: None,
            accessibility_label: String::new(),
        })
    }

    /// Builds a stacked entry; `y` becomes the sum of all stack values.
    pub fn stacked(x: f64, stack_values: Vec<f64>) -> ChartResult<Self> {
        if stack_values.is_empty() {
            return Err(ChartError::InvalidData(
                "stack values must not be empty".to_owned(),
            ));
        }
        if !x.is_finite() || stack_values.iter().any(|v| !v.is_finite()) {
            return Err(ChartError::InvalidData(
                "entry values must be finite".to_owned(),
            ));
        }
        let y = stack_values.iter().sum();
        Ok(Self {
            x,
            y,
            stack_values: Some(stack_values),
            icon: None,
            accessibility_label: String::new(),
        })
    }

    pub fn from_decimal(x: Decimal, y: Decimal) -> ChartResult<Self> {
        Self::new(decimal_value(x, "x")?, decimal_value(y, "y")?)
    }

    /// Time-series entry: `x` becomes fractional unix seconds.
    pub fn from_decimal_time(time: DateTime<Utc>, y: Decimal) -> ChartResult<Self> {
        Self::new(unix_seconds(time), decimal_value(y, "y")?)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility_label = label.into();
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: IconHandle) -> Self {
        self.icon = Some(icon);
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

    pub(crate) fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    #[must_use]
    pub fn icon(&self) -> Option<IconHandle> {
        self.icon
    }

    #[must_use]
    pub fn accessibility_label(&self) -> &str {
        &self.accessibility_label
    }

    #[must_use]
    pub fn stack_values(&self) -> Option<&[f64]> {
        self.stack_values.as_deref()
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stack_values.is_some()
    }

    /// Number of stack slices; an unstacked entry counts as one.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack_values.as_ref().map_or(1, Vec::len)
    }

    #[must_use]
    pub fn positive_sum(&self) -> f64 {
        match &self.stack_values {
            Some(values) => values.iter().filter(|v| **v > 0.0).sum(),
            None => self.y.max(0.0),
        }
    }

    /// Magnitude of the negative part, reported as a non-negative number.
    #[must_use]
    pub fn negative_sum(&self) -> f64 {
        match &self.stack_values {
            Some(values) => values.iter().filter(|v| **v < 0.0).map(|v| -v).sum(),
            None => (-self.y).max(0.0),
        }
    }

    /// Lowest and highest value the drawn bar reaches.
    #[must_use]
    pub fn value_extent(&self) -> (f64, f64) {
        if self.is_stacked() {
            (-self.negative_sum(), self.positive_sum())
        } else {
            (self.y, self.y)
        }
    }

    /// One range per stack value, in stack order.
    ///
    /// Negative values stack downward from `-negative_sum`, everything else
    /// upward from zero. A `0.0` value yields an empty range on the positive
    /// side. Empty for unstacked entries.
    #[must_use]
    pub fn stack_ranges(&self) -> StackRanges {
        let mut ranges = StackRanges::new();
        let Some(values) = &self.stack_values else {
            return ranges;
        };

        let mut neg_remain = -self.negative_sum();
        let mut pos_remain = 0.0;
        for value in values {
            if *value < 0.0 {
                ranges.push(StackRange::new(neg_remain, neg_remain - value));
                neg_remain -= value;
            } else {
                ranges.push(StackRange::new(pos_remain, pos_remain + value));
                pos_remain += value;
            }
        }
        ranges
    }

    /// Index of the stack slice that holds `value`.
    ///
    /// Falls back to the nearest non-empty slice when `value` lies outside
    /// every range. `None` for unstacked entries.
    #[must_use]
    pub fn stack_index_for_value(&self, value: f64) -> Option<usize> {
        let ranges = self.stack_ranges();
        if ranges.is_empty() {
            return None;
        }
        if let Some(index) = ranges.iter().position(|range| range.contains(value)) {
            return Some(index);
        }

        ranges
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| {
                a.distance_to(value)
                    .total_cmp(&b.distance_to(value))
                    .then(a.is_empty().cmp(&b.is_empty()))
                    .then(ia.cmp(ib))
            })
            .map(|(index, _)| index)
    }
}

fn decimal_value(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("entry {field_name} cannot be represented as f64"))
    })
}

fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}
