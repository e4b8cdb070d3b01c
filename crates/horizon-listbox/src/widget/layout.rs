//! Geometry cache for visible rows.
//!
//! The list box lays visible rows out top to bottom: each row's separator (if
//! any) followed by the row content. [`LayoutCache`] remembers the result
//! together with the store generation and width it was computed for, so
//! spatial queries can tell when the geometry is stale.

use std::collections::HashMap;

use crate::model::RowId;

/// Vertical placement of a visible row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    /// Top of the row content (below its separator).
    pub y: f32,
    /// Height of the row content.
    pub height: f32,
    /// Height of the separator drawn immediately above `y`.
    pub separator_height: f32,
}

impl RowGeometry {
    /// Bottom edge of the row content.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `y` falls inside the row content.
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.y && y < self.bottom()
    }
}

/// Computed geometry for the visible rows, in display order.
#[derive(Debug, Default)]
pub(crate) struct LayoutCache {
    entries: Vec<(RowId, RowGeometry)>,
    index: HashMap<RowId, usize>,
    content_height: f32,
    /// Store generation and width the entries were computed for.
    computed_for: Option<(u64, f32)>,
}

impl LayoutCache {
    pub(crate) fn is_valid(&self, generation: u64, width: f32) -> bool {
        self.computed_for == Some((generation, width))
    }

    pub(crate) fn invalidate(&mut self) {
        self.computed_for = None;
    }

    /// Replaces the cached geometry.
    ///
    /// `rows` yields `(row, separator_height, content_height)` in display order.
    pub(crate) fn rebuild<I>(&mut self, rows: I, generation: u64, width: f32)
    where
        I: IntoIterator<Item = (RowId, f32, f32)>,
    {
        self.entries.clear();
        self.index.clear();

        let mut y = 0.0;
        for (id, separator_height, height) in rows {
            y += separator_height;
            self.index.insert(id, self.entries.len());
            self.entries.push((
                id,
                RowGeometry {
                    y,
                    height,
                    separator_height,
                },
            ));
            y += height;
        }

        self.content_height = y;
        self.computed_for = Some((generation, width));
    }

    pub(crate) fn content_height(&self) -> f32 {
        self.content_height
    }

    pub(crate) fn geometry(&self, id: RowId) -> Option<RowGeometry> {
        self.index.get(&id).map(|&i| self.entries[i].1)
    }

    /// Row whose content area contains `y`. Separator areas match no row.
    pub(crate) fn row_at_y(&self, y: f32) -> Option<RowId> {
        let i = self.entries.partition_point(|(_, geometry)| geometry.bottom() <= y);
        self.entries
            .get(i)
            .filter(|(_, geometry)| geometry.contains_y(y))
            .map(|(id, _)| *id)
    }

    /// Row containing `y`, clamped to the first/last row outside the content.
    pub(crate) fn nearest_row_at_y(&self, y: f32) -> Option<RowId> {
        if y < 0.0 {
            return self.entries.first().map(|(id, _)| *id);
        }
        let i = self.entries.partition_point(|(_, geometry)| geometry.bottom() <= y);
        self.entries
            .get(i)
            .or_else(|| self.entries.last())
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowContent, RowStore};

    struct Blank;

    impl RowContent for Blank {
        fn preferred_height(&self, _width: f32) -> f32 {
            1.0
        }
    }

    fn cache_with(heights: &[(f32, f32)]) -> (LayoutCache, Vec<RowId>) {
        let mut store = RowStore::new();
        let ids: Vec<RowId> = heights
            .iter()
            .map(|_| store.insert(Blank, usize::MAX).1)
            .collect();
        let mut cache = LayoutCache::default();
        cache.rebuild(
            ids.iter().zip(heights).map(|(&id, &(sep, h))| (id, sep, h)),
            7,
            100.0,
        );
        (cache, ids)
    }

    #[test]
    fn test_rebuild_stacks_rows() {
        let (cache, ids) = cache_with(&[(0.0, 10.0), (2.0, 20.0), (0.0, 5.0)]);
        assert_eq!(cache.content_height(), 37.0);
        let second = cache.geometry(ids[1]).unwrap();
        assert_eq!(second.y, 12.0);
        assert_eq!(second.separator_height, 2.0);
        assert_eq!(second.bottom(), 32.0);
    }

    #[test]
    fn test_row_at_y_skips_separators() {
        let (cache, ids) = cache_with(&[(0.0, 10.0), (2.0, 20.0)]);
        assert_eq!(cache.row_at_y(0.0), Some(ids[0]));
        assert_eq!(cache.row_at_y(9.9), Some(ids[0]));
        assert_eq!(cache.row_at_y(11.0), None);
        assert_eq!(cache.row_at_y(12.0), Some(ids[1]));
        assert_eq!(cache.row_at_y(32.0), None);
        assert_eq!(cache.row_at_y(-1.0), None);
    }

    #[test]
    fn test_nearest_row_clamps() {
        let (cache, ids) = cache_with(&[(0.0, 10.0), (2.0, 20.0)]);
        assert_eq!(cache.nearest_row_at_y(-5.0), Some(ids[0]));
        assert_eq!(cache.nearest_row_at_y(11.0), Some(ids[1]));
        assert_eq!(cache.nearest_row_at_y(500.0), Some(ids[1]));
    }

    #[test]
    fn test_validity_tracks_generation_and_width() {
        let (mut cache, _) = cache_with(&[(0.0, 10.0)]);
        assert!(cache.is_valid(7, 100.0));
        assert!(!cache.is_valid(8, 100.0));
        assert!(!cache.is_valid(7, 50.0));
        cache.invalidate();
        assert!(!cache.is_valid(7, 100.0));
    }
}
