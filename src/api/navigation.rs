use tracing::trace;

use crate::core::DateKey;
use crate::error::{ChartError, ChartResult};

use super::DateChart;

/// Scroll operations act on the geometry of the most recent
/// [`DateChart::layout`] call and saturate at the skeleton ends.
impl DateChart {
    /// Scrolls by a signed number of slots; returns the new start index.
    pub fn scroll_by(&mut self, delta: i64) -> usize {
        let before = self.viewport.start_index();
        let after = self.viewport.scroll_by(delta);
        if before.checked_add_signed(delta as isize) != Some(after) {
            trace!(before, delta, after, "scroll saturated");
        }
        after
    }

    /// Scrolls one full window forward (`pages > 0`) or backward.
    pub fn scroll_pages(&mut self, pages: i64) -> usize {
        let page = i64::try_from(self.viewport.visible_count().max(1)).unwrap_or(i64::MAX);
        self.scroll_by(pages.saturating_mul(page))
    }

    pub fn scroll_to_index(&mut self, index: usize) -> usize {
        self.viewport.scroll_to_index(index)
    }

    pub fn scroll_to_first(&mut self) -> usize {
        self.viewport.scroll_to_first()
    }

    pub fn scroll_to_last(&mut self) -> usize {
        self.viewport.scroll_to_last()
    }

    /// Makes the slot for `key` visible, or the first slot after it when the
    /// key itself has no slot (blocked, off-granularity, or between ticks).
    ///
    /// Keys in another layout than the skeleton are re-keyed first.
    pub fn scroll_to_date(&mut self, key: &str) -> ChartResult<usize> {
        let key = DateKey::parse(key)?;
        let Some(format) = self.skeleton.format() else {
            return Ok(self.viewport.scroll_to_first());
        };
        let key = key
            .reformat(format)
            .ok_or_else(|| ChartError::InvalidDateKey(key.to_string()))?;
        let index = self.skeleton.lower_bound(key.as_str());
        trace!(%key, index, "scroll to date");
        Ok(self.viewport.scroll_to_index(index))
    }

    /// Key of the slot at `offset` within the visible window.
    #[must_use]
    pub fn visible_key(&self, offset: usize) -> Option<&DateKey> {
        let range = self.viewport.visible_range();
        let index = range.start.checked_add(offset).filter(|index| range.contains(index))?;
        self.skeleton.get(index)
    }
}
