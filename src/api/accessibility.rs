//! Assistive-traversal contract.
//!
//! An accessibility adapter needs four answers to expose chart entries as
//! virtual views: the id under a point, the ordered list of ids, a
//! description and a pixel bounding box per id. Ids are ascending integers
//! starting at zero. Their meaning depends on the data:
//!
//! - bar data: position in the x-sorted list of all entries;
//! - line data: flat global index, or distinct-x group index when group
//!   selection is enabled.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    EntryAddress, EntryIndexer, IndexingMode, IntRect, PixelRect, Rounding, SortedEntryIndex,
};
use crate::interaction::Highlight;
use crate::render::GeometryRenderer;

use super::ChartEngine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualViewDescription {
    pub text: String,
    /// The entry is part of the current selection.
    pub selected: bool,
}

/// Runtime metrics of the sorted-index cache behind virtual view queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualViewCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Sorted index of the current data, rebuilt when the data revision changes.
#[derive(Debug, Default)]
pub(super) struct SortedIndexCache {
    index: Option<Arc<SortedEntryIndex>>,
    stats: VirtualViewCacheStats,
}

pub trait VirtualViewProvider {
    /// Id of the virtual view under a pixel position.
    fn virtual_view_id_at(&self, x_px: f64, y_px: f64) -> Option<usize>;

    /// Every valid id in traversal order.
    fn virtual_view_ids(&self) -> Vec<usize>;

    fn description_for(&self, id: usize) -> Option<VirtualViewDescription>;

    /// Integer pixel bounds; spans the full content height.
    fn bounds_for(&self, id: usize) -> Option<IntRect>;

    /// Activates a virtual view: its entry becomes the selection.
    fn perform_click(&mut self, id: usize) -> Option<Highlight>;
}

impl<R: GeometryRenderer> ChartEngine<R> {
    /// Indexing order behind virtual view ids; `None` without data.
    #[must_use]
    pub fn virtual_view_mode(&self) -> Option<IndexingMode> {
        let data = self.data.as_ref()?;
        Some(if data.is_bar() {
            IndexingMode::SortedByX
        } else if self.config.group_selection_enabled {
            IndexingMode::Grouped
        } else {
            IndexingMode::Flat
        })
    }

    #[must_use]
    pub fn virtual_view_cache_stats(&self) -> VirtualViewCacheStats {
        self.sorted_index_cache.borrow().stats
    }

    fn sorted_index(&self) -> Option<Arc<SortedEntryIndex>> {
        let data = self.data.as_ref()?;
        let mut cache = self.sorted_index_cache.borrow_mut();
        let fresh = cache
            .index
            .as_ref()
            .is_some_and(|index| index.revision() == data.revision());
        if fresh {
            cache.stats.hits += 1;
        } else {
            cache.stats.misses += 1;
            cache.index = Some(Arc::new(EntryIndexer::new(data).sorted_index()));
            trace!(
                revision = data.revision().value(),
                entries = data.entry_count(),
                "rebuilt sorted entry index"
            );
        }
        cache.index.clone()
    }

    fn virtual_view_address(&self, id: usize) -> Option<EntryAddress> {
        let data = self.data.as_ref()?;
        match self.virtual_view_mode()? {
            IndexingMode::Flat => EntryIndexer::new(data).locate(id).ok(),
            IndexingMode::SortedByX => self.sorted_index()?.address(id).ok(),
            IndexingMode::Grouped => {
                let x = self.sorted_index()?.x_for_group(id).ok()?;
                EntryIndexer::new(data).first_entry_at_x(x)
            }
        }
    }

    fn bar_view_id_at(&self, x_value: f64) -> Option<usize> {
        let half = self.data.as_ref()?.bar_width()? * 0.5;
        self.sorted_index()?.first_within(x_value, half)
    }

    fn line_view_id_at(&self, x_value: f64) -> Option<usize> {
        let data = self.data.as_ref()?;
        if self.config.group_selection_enabled {
            return self
                .sorted_index()?
                .group_index_for_x_rounded(x_value, Rounding::Down);
        }
        let indexer = EntryIndexer::new(data);
        data.data_sets()
            .iter()
            .enumerate()
            .find_map(|(set_index, set)| {
                let entry_index = set.entry_index_for_x(x_value, None, Rounding::Down)?;
                indexer.to_global_index(set_index, entry_index).ok()
            })
    }
}

impl<R: GeometryRenderer> VirtualViewProvider for ChartEngine<R> {
    fn virtual_view_id_at(&self, x_px: f64, y_px: f64) -> Option<usize> {
        let data = self.data.as_ref()?;
        if !self.viewport.contains(x_px, y_px) {
            return None;
        }
        let x_value = self.transformer().x_pixel_to_value(x_px);
        let id = if data.is_bar() {
            self.bar_view_id_at(x_value)
        } else {
            self.line_view_id_at(x_value)
        };
        trace!(x_px, y_px, x_value, id = ?id, "virtual view lookup");
        id
    }

    fn virtual_view_ids(&self) -> Vec<usize> {
        let Some(data) = self.data.as_ref() else {
            return Vec::new();
        };
        let len = match self.virtual_view_mode() {
            Some(IndexingMode::Grouped) => self
                .sorted_index()
                .map_or(0, |index| index.group_count()),
            Some(_) => data.entry_count(),
            None => 0,
        };
        (0..len).collect()
    }

    fn description_for(&self, id: usize) -> Option<VirtualViewDescription> {
        let data = self.data.as_ref()?;
        let address = self.virtual_view_address(id)?;
        let set = data.data_set(address.data_set_index)?;
        let entry = set.entry(address.entry_index)?;

        let text = if !entry.accessibility_label().is_empty() {
            entry.accessibility_label().to_owned()
        } else if self.virtual_view_mode() == Some(IndexingMode::Grouped) {
            match data.y_extent_at_x(entry.x()) {
                Some((min, max)) if min != max => format!("x {}: {min} to {max}", entry.x()),
                _ => format!("x {}: {}", entry.x(), entry.y()),
            }
        } else {
            format!("{}: x {}, y {}", set.label(), entry.x(), entry.y())
        };

        let selected = self.selection.highlighted().is_some_and(|highlight| {
            highlight.x() == entry.x()
                && (data.is_bar() || highlight.data_set_index() == address.data_set_index)
        });
        Some(VirtualViewDescription { text, selected })
    }

    fn bounds_for(&self, id: usize) -> Option<IntRect> {
        let data = self.data.as_ref()?;
        let address = self.virtual_view_address(id)?;
        let entry = data
            .data_set(address.data_set_index)?
            .entry(address.entry_index)?;

        let half = match data.bar_width() {
            Some(bar_width) => bar_width * 0.5,
            None => self.config.line_bounds_half_width,
        };
        let transformer = self.transformer();
        let content = self.viewport.content_rect();
        let rect = PixelRect::new(
            transformer.x_value_to_pixel(entry.x() - half),
            content.top,
            transformer.x_value_to_pixel(entry.x() + half),
            content.bottom,
        )
        .normalized();
        Some(rect.to_int_rect())
    }

    fn perform_click(&mut self, id: usize) -> Option<Highlight> {
        let address = self.virtual_view_address(id)?;
        let highlight = self.highlight_entry(address);
        trace!(id, selected = highlight.is_some(), "virtual view click");
        highlight
    }
}
