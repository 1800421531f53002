//! Linear addressing over multi-data-set chart data.
//!
//! Virtual-view traversal needs one stable integer per addressable item.
//! Three orders are supported:
//!
//! - [`IndexingMode::Flat`]: entries of all data sets concatenated in
//!   `ChartData` order. Global index `g` belongs to the data set whose
//!   cumulative-size prefix first exceeds `g`.
//! - [`IndexingMode::SortedByX`]: every entry, stably sorted by x; entries at
//!   the same x keep `ChartData` order.
//! - [`IndexingMode::Grouped`]: one index per distinct x-value across all
//!   data sets, ascending. An x resolves to the first data set (in
//!   `ChartData` order) that has an entry there.
//!
//! `EntryIndexer` caches nothing; every call reads the current data. For
//! repeated x-ordered or grouped lookups, build a [`SortedEntryIndex`] once per
//! [`DataRevision`] and query that instead.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::chart_data::{ChartData, DataRevision};
use crate::core::data_set::Rounding;
use crate::core::entry::Entry;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryAddress {
    pub data_set_index: usize,
    pub entry_index: usize,
}

impl EntryAddress {
    #[must_use]
    pub fn new(data_set_index: usize, entry_index: usize) -> Self {
        Self {
            data_set_index,
            entry_index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IndexingMode {
    #[default]
    Flat,
    SortedByX,
    Grouped,
}

#[derive(Debug, Clone, Copy)]
pub struct EntryIndexer<'a> {
    data: &'a ChartData,
}

impl<'a> EntryIndexer<'a> {
    #[must_use]
    pub fn new(data: &'a ChartData) -> Self {
        Self { data }
    }

    /// Number of addressable items in `mode`.
    #[must_use]
    pub fn len(&self, mode: IndexingMode) -> usize {
        match mode {
            IndexingMode::Flat | IndexingMode::SortedByX => self.data.entry_count(),
            IndexingMode::Grouped => self.group_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self, mode: IndexingMode) -> bool {
        self.len(mode) == 0
    }

    #[must_use]
    pub fn entry_at(&self, address: EntryAddress) -> Option<&'a Entry> {
        self.data
            .data_set(address.data_set_index)?
            .entry(address.entry_index)
    }

    /// Data set that owns flat global index `global`.
    pub fn to_data_set_index(&self, global: usize) -> ChartResult<usize> {
        let mut prefix = 0;
        for (index, set) in self.data.data_sets().iter().enumerate() {
            prefix += set.entry_count();
            if global < prefix {
                return Ok(index);
            }
        }
        Err(ChartError::IndexOutOfRange {
            index: global,
            len: prefix,
        })
    }

    /// Offset of flat global index `global` inside data set `data_set_index`.
    pub fn to_entry_index(&self, data_set_index: usize, global: usize) -> ChartResult<usize> {
        let set = self
            .data
            .data_set(data_set_index)
            .ok_or(ChartError::IndexOutOfRange {
                index: data_set_index,
                len: self.data.data_set_count(),
            })?;
        let prefix = self.prefix_len(data_set_index);
        global
            .checked_sub(prefix)
            .filter(|offset| *offset < set.entry_count())
            .ok_or(ChartError::IndexOutOfRange {
                index: global,
                len: self.data.entry_count(),
            })
    }

    /// Inverse of [`Self::locate`].
    pub fn to_global_index(&self, data_set_index: usize, entry_index: usize) -> ChartResult<usize> {
        let set = self
            .data
            .data_set(data_set_index)
            .ok_or(ChartError::IndexOutOfRange {
                index: data_set_index,
                len: self.data.data_set_count(),
            })?;
        if entry_index >= set.entry_count() {
            return Err(ChartError::IndexOutOfRange {
                index: entry_index,
                len: set.entry_count(),
            });
        }
        Ok(self.prefix_len(data_set_index) + entry_index)
    }

    pub fn locate(&self, global: usize) -> ChartResult<EntryAddress> {
        let data_set_index = self.to_data_set_index(global)?;
        let entry_index = self.to_entry_index(data_set_index, global)?;
        Ok(EntryAddress::new(data_set_index, entry_index))
    }

    fn prefix_len(&self, data_set_index: usize) -> usize {
        self.data.data_sets()[..data_set_index]
            .iter()
            .map(|set| set.entry_count())
            .sum()
    }

    /// All entry addresses ordered by x; ties keep flat order.
    #[must_use]
    pub fn sorted_by_x(&self) -> Vec<EntryAddress> {
        let mut addresses: Vec<(f64, EntryAddress)> = self
            .data
            .data_sets()
            .iter()
            .enumerate()
            .flat_map(|(set_index, set)| {
                set.entries()
                    .iter()
                    .enumerate()
                    .map(move |(entry_index, entry)| {
                        (entry.x(), EntryAddress::new(set_index, entry_index))
                    })
            })
            .collect();
        addresses.sort_by(|a, b| a.0.total_cmp(&b.0));
        addresses.into_iter().map(|(_, address)| address).collect()
    }

    pub fn locate_sorted(&self, index: usize) -> ChartResult<EntryAddress> {
        let sorted = self.sorted_by_x();
        sorted
            .get(index)
            .copied()
            .ok_or(ChartError::IndexOutOfRange {
                index,
                len: sorted.len(),
            })
    }

    /// Distinct x-values across all data sets, ascending.
    #[must_use]
    pub fn distinct_x_values(&self) -> Vec<f64> {
        let set: BTreeSet<OrderedFloat<f64>> = self
            .data
            .data_sets()
            .iter()
            .flat_map(|set| set.entries().iter().map(|entry| OrderedFloat(entry.x())))
            .collect();
        set.into_iter().map(OrderedFloat::into_inner).collect()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.distinct_x_values().len()
    }

    pub fn x_for_group(&self, group_index: usize) -> ChartResult<f64> {
        let xs = self.distinct_x_values();
        xs.get(group_index)
            .copied()
            .ok_or(ChartError::IndexOutOfRange {
                index: group_index,
                len: xs.len(),
            })
    }

    /// Group index of an x-value that exists in the data.
    #[must_use]
    pub fn group_index_for_x(&self, x: f64) -> Option<usize> {
        self.distinct_x_values()
            .binary_search_by(|probe| probe.total_cmp(&x))
            .ok()
    }

    /// Group index for an arbitrary x, snapped with `rounding`.
    #[must_use]
    pub fn group_index_for_x_rounded(&self, x: f64, rounding: Rounding) -> Option<usize> {
        snap_to_sorted(&self.distinct_x_values(), x, rounding)
    }

    /// Entry a group selects: the first data set in `ChartData` order holding
    /// an entry at the group's x, and the first such entry in it.
    pub fn resolve_group(&self, group_index: usize) -> ChartResult<EntryAddress> {
        let x = self.x_for_group(group_index)?;
        self.entries_at_x(x)
            .into_iter()
            .next()
            .ok_or(ChartError::IndexOutOfRange {
                index: group_index,
                len: self.group_count(),
            })
    }

    /// First entry at exactly `x`, scanning data sets in `ChartData` order.
    #[must_use]
    pub fn first_entry_at_x(&self, x: f64) -> Option<EntryAddress> {
        self.data
            .data_sets()
            .iter()
            .enumerate()
            .find_map(|(set_index, set)| {
                let range = set.index_range_for_x(x);
                (!range.is_empty()).then(|| EntryAddress::new(set_index, range.start))
            })
    }

    /// Every entry sharing the group's x, in `ChartData` order.
    pub fn entries_at_group(&self, group_index: usize) -> ChartResult<Vec<EntryAddress>> {
        let x = self.x_for_group(group_index)?;
        Ok(self.entries_at_x(x))
    }

    fn entries_at_x(&self, x: f64) -> Vec<EntryAddress> {
        self.data
            .data_sets()
            .iter()
            .enumerate()
            .flat_map(|(set_index, set)| {
                set.index_range_for_x(x)
                    .map(move |entry_index| EntryAddress::new(set_index, entry_index))
            })
            .collect()
    }

    /// Sorts every entry once into a reusable [`SortedEntryIndex`].
    #[must_use]
    pub fn sorted_index(&self) -> SortedEntryIndex {
        let addresses = self.sorted_by_x();
        let xs: Vec<f64> = addresses
            .iter()
            .filter_map(|address| self.entry_at(*address).map(Entry::x))
            .collect();
        let mut distinct_xs = xs.clone();
        distinct_xs.dedup();
        SortedEntryIndex {
            revision: self.data.revision(),
            addresses,
            xs,
            distinct_xs,
        }
    }

    /// Resolves a virtual index in any mode to the entry it designates.
    pub fn address_for(&self, mode: IndexingMode, index: usize) -> ChartResult<EntryAddress> {
        match mode {
            IndexingMode::Flat => self.locate(index),
            IndexingMode::SortedByX => self.locate_sorted(index),
            IndexingMode::Grouped => self.resolve_group(index),
        }
    }

    /// Virtual index of an entry in `mode`. In grouped mode this is the index
    /// of the entry's x-value.
    #[must_use]
    pub fn index_for(&self, mode: IndexingMode, address: EntryAddress) -> Option<usize> {
        match mode {
            IndexingMode::Flat => self
                .to_global_index(address.data_set_index, address.entry_index)
                .ok(),
            IndexingMode::SortedByX => self
                .sorted_by_x()
                .iter()
                .position(|candidate| *candidate == address),
            IndexingMode::Grouped => self
                .entry_at(address)
                .and_then(|entry| self.group_index_for_x(entry.x())),
        }
    }
}

/// X-ordered addressing of one data revision.
///
/// Construction sorts every entry once. Afterwards index lookups are `O(1)`
/// and x lookups `O(log n)`, so a full traversal stays linear in the number
/// of entries. Rebuild it when [`ChartData::revision`] changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedEntryIndex {
    revision: DataRevision,
    addresses: Vec<EntryAddress>,
    xs: Vec<f64>,
    distinct_xs: Vec<f64>,
}

impl SortedEntryIndex {
    #[must_use]
    pub fn revision(&self) -> DataRevision {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    #[must_use]
    pub fn addresses(&self) -> &[EntryAddress] {
        &self.addresses
    }

    pub fn address(&self, index: usize) -> ChartResult<EntryAddress> {
        self.addresses
            .get(index)
            .copied()
            .ok_or(ChartError::IndexOutOfRange {
                index,
                len: self.addresses.len(),
            })
    }

    /// Sorted position of `address`, found by its x-value.
    #[must_use]
    pub fn position_of(&self, address: EntryAddress, x: f64) -> Option<usize> {
        let start = self.xs.partition_point(|value| *value < x);
        let end = self.xs.partition_point(|value| *value <= x);
        self.addresses[start..end]
            .iter()
            .position(|candidate| *candidate == address)
            .map(|offset| start + offset)
    }

    /// First sorted position whose x lies within `half_width` of `x`.
    #[must_use]
    pub fn first_within(&self, x: f64, half_width: f64) -> Option<usize> {
        if !x.is_finite() {
            return None;
        }
        let index = self.xs.partition_point(|value| *value < x - half_width);
        self.xs
            .get(index)
            .is_some_and(|value| *value <= x + half_width)
            .then_some(index)
    }

    #[must_use]
    pub fn distinct_x_values(&self) -> &[f64] {
        &self.distinct_xs
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.distinct_xs.len()
    }

    pub fn x_for_group(&self, group_index: usize) -> ChartResult<f64> {
        self.distinct_xs
            .get(group_index)
            .copied()
            .ok_or(ChartError::IndexOutOfRange {
                index: group_index,
                len: self.distinct_xs.len(),
            })
    }

    #[must_use]
    pub fn group_index_for_x_rounded(&self, x: f64, rounding: Rounding) -> Option<usize> {
        snap_to_sorted(&self.distinct_xs, x, rounding)
    }
}

/// Index into ascending `xs` selected by `rounding`; ties resolve upward.
fn snap_to_sorted(xs: &[f64], x: f64, rounding: Rounding) -> Option<usize> {
    if !x.is_finite() {
        return None;
    }
    let down = xs.partition_point(|value| *value <= x).checked_sub(1);
    let above = xs.partition_point(|value| *value < x);
    let up = (above < xs.len()).then_some(above);
    match rounding {
        Rounding::Down => down,
        Rounding::Up => up,
        Rounding::Closest => match (down, up) {
            (Some(d), Some(u)) => Some(if x - xs[d] < xs[u] - x { d } else { u }),
            (d, u) => d.or(u),
        },
    }
}
