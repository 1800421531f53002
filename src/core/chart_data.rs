use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::data_set::DataSet;
use crate::core::types::AxisDependency;
use crate::error::{ChartError, ChartResult};

/// Default bar width in x-value units.
pub const DEFAULT_BAR_WIDTH: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar { bar_width: f64 },
    Line,
}

/// Token identifying one state of the data.
///
/// Every constructed [`ChartData`] and every mutation through it draws a new
/// revision from one process-wide counter, so tokens never repeat across
/// data replacements. Buffers and frames record the revision they were built
/// from, so a consumer can tell a stale buffer apart from a current one by
/// comparing tokens. `DataRevision::default()` (zero) is never issued to data
/// and marks frames built without any.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct DataRevision(u64);

impl DataRevision {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    fn issue() -> Self {
        Self(NEXT_REVISION.fetch_add(1, Ordering::Relaxed))
    }
}

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Ordered collection of data sets. Order defines z-order and the default
/// global index order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    kind: ChartKind,
    data_sets: Vec<DataSet>,
    revision: DataRevision,
}

impl ChartData {
    pub fn bar(data_sets: Vec<DataSet>, bar_width: f64) -> ChartResult<Self> {
        if !bar_width.is_finite() || bar_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            kind: ChartKind::Bar { bar_width },
            data_sets,
            revision: DataRevision::issue(),
        })
    }

    #[must_use]
    pub fn line(data_sets: Vec<DataSet>) -> Self {
        Self {
            kind: ChartKind::Line,
            data_sets,
            revision: DataRevision::issue(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn is_bar(&self) -> bool {
        matches!(self.kind, ChartKind::Bar { .. })
    }

    #[must_use]
    pub fn bar_width(&self) -> Option<f64> {
        match self.kind {
            ChartKind::Bar { bar_width } => Some(bar_width),
            ChartKind::Line => None,
        }
    }

    #[must_use]
    pub fn revision(&self) -> DataRevision {
        self.revision
    }

    #[must_use]
    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    #[must_use]
    pub fn data_set(&self, index: usize) -> Option<&DataSet> {
        self.data_sets.get(index)
    }

    /// Mutable access to one data set. Counts as a mutation: the revision
    /// advances even if the caller ends up changing nothing.
    pub fn data_set_mut(&mut self, index: usize) -> Option<&mut DataSet> {
        let data_set = self.data_sets.get_mut(index)?;
        self.revision = DataRevision::issue();
        Some(data_set)
    }

    #[must_use]
    pub fn data_set_count(&self) -> usize {
        self.data_sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_sets.is_empty()
    }

    #[must_use]
    pub fn data_set_index_of_label(&self, label: &str) -> Option<usize> {
        self.data_sets.iter().position(|set| set.label() == label)
    }

    /// Total number of entries over all data sets.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data_sets.iter().map(DataSet::entry_count).sum()
    }

    #[must_use]
    pub fn max_entry_count(&self) -> usize {
        self.data_sets
            .iter()
            .map(DataSet::entry_count)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn x_min(&self) -> Option<f64> {
        self.data_sets
            .iter()
            .filter_map(DataSet::x_min)
            .reduce(f64::min)
    }

    #[must_use]
    pub fn x_max(&self) -> Option<f64> {
        self.data_sets
            .iter()
            .filter_map(DataSet::x_max)
            .reduce(f64::max)
    }

    /// X extent of the data; with `fit_bars` it is widened by half a bar on
    /// each side so edge bars are fully visible.
    #[must_use]
    pub fn x_range(&self, fit_bars: bool) -> Option<(f64, f64)> {
        let (min, max) = (self.x_min()?, self.x_max()?);
        match self.bar_width() {
            Some(bar_width) if fit_bars => Some((min - bar_width * 0.5, max + bar_width * 0.5)),
            _ => Some((min, max)),
        }
    }

    #[must_use]
    pub fn y_min(&self, axis: AxisDependency) -> Option<f64> {
        self.data_sets
            .iter()
            .filter(|set| set.axis_dependency() == axis)
            .filter_map(DataSet::y_min)
            .reduce(f64::min)
    }

    #[must_use]
    pub fn y_max(&self, axis: AxisDependency) -> Option<f64> {
        self.data_sets
            .iter()
            .filter(|set| set.axis_dependency() == axis)
            .filter_map(DataSet::y_max)
            .reduce(f64::max)
    }

    /// Lowest and highest y over every entry sitting exactly at `x`.
    #[must_use]
    pub fn y_extent_at_x(&self, x: f64) -> Option<(f64, f64)> {
        self.data_sets
            .iter()
            .flat_map(|set| set.entries_for_x(x))
            .map(|entry| entry.value_extent())
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    /// Width one group of bars occupies on the x-axis.
    #[must_use]
    pub fn group_width(&self, group_space: f64, bar_space: f64) -> f64 {
        let bar_width = self.bar_width().unwrap_or(0.0);
        self.data_sets.len() as f64 * (bar_width + bar_space) + group_space
    }

    /// Lays out all bar data sets side by side by rewriting every entry's x.
    ///
    /// Group `i` starts at `from_x + i * group_width`; inside a group the data
    /// sets follow ChartData order, each bar centred in its
    /// `bar_width + bar_space` slot after half of `group_space`.
    /// Previous x-values are overwritten.
    pub fn group_bars(
        &mut self,
        from_x: f64,
        group_space: f64,
        bar_space: f64,
    ) -> ChartResult<DataRevision> {
        let bar_width = self.bar_width().ok_or(ChartError::NotBarData)?;
        if self.data_sets.is_empty() {
            return Err(ChartError::NoData);
        }
        if !from_x.is_finite()
            || !group_space.is_finite()
            || !bar_space.is_finite()
            || group_space < 0.0
            || bar_space < 0.0
        {
            return Err(ChartError::InvalidData(
                "group origin must be finite and spaces must be finite and >= 0".to_owned(),
            ));
        }

        let group_width = self.group_width(group_space, bar_space);
        let slot_width = bar_width + bar_space;
        let max_entry_count = self.max_entry_count();

        for group in 0..max_entry_count {
            let group_start = from_x + group as f64 * group_width + group_space * 0.5;
            for (slot, set) in self.data_sets.iter_mut().enumerate() {
                if let Some(entry) = set.entries_mut().get_mut(group) {
                    entry.set_x(group_start + slot as f64 * slot_width + slot_width * 0.5);
                }
            }
        }

        self.revision = DataRevision::issue();
        debug!(
            from_x,
            group_space,
            bar_space,
            group_width,
            groups = max_entry_count,
            revision = self.revision.value(),
            "grouped bars"
        );
        Ok(self.revision)
    }
}
