use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the skeleton overflows the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewportState {
    /// The whole skeleton fits; the window is pinned at slot 0.
    #[default]
    Inactive,
    /// The skeleton is longer than the window; the start index is meaningful.
    Active,
}

/// Horizontal window over the date skeleton.
///
/// Invariants after every mutation:
/// - `visible_count <= skeleton_length`
/// - `start_index + visible_count <= skeleton_length`
/// - `start_index == 0` while [`ViewportState::Inactive`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    start_index: usize,
    capacity: usize,
    visible_count: usize,
    skeleton_length: usize,
    state: ViewportState,
}

impl Viewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refits the window to a new skeleton length or pixel geometry.
    ///
    /// The current start index is kept when still valid, otherwise clamped.
    /// Returns the new visible slot count.
    pub fn recompute(
        &mut self,
        skeleton_length: usize,
        pixel_width: f64,
        tick_pixel_width: u32,
    ) -> usize {
        self.capacity = visible_slot_capacity(pixel_width, tick_pixel_width);
        self.skeleton_length = skeleton_length;
        self.visible_count = self.capacity.min(skeleton_length);

        let state = if skeleton_length > self.capacity {
            ViewportState::Active
        } else {
            ViewportState::Inactive
        };
        if state != self.state {
            debug!(
                from = ?self.state,
                to = ?state,
                skeleton_length,
                capacity = self.capacity,
                "viewport state changed"
            );
            self.state = state;
        }

        self.start_index = clamp_start(self.start_index, skeleton_length, self.visible_count);
        self.visible_count
    }

    /// Moves the window to `requested_start`, saturating at both ends.
    pub fn set_start(&mut self, requested_start: usize) -> usize {
        self.start_index = clamp_start(requested_start, self.skeleton_length, self.visible_count);
        self.start_index
    }

    /// Scrolls by a signed number of slots.
    pub fn scroll_by(&mut self, delta: i64) -> usize {
        let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        let requested = if delta < 0 {
            self.start_index.saturating_sub(magnitude)
        } else {
            self.start_index.saturating_add(magnitude)
        };
        self.set_start(requested)
    }

    /// Moves the window as little as possible so `target` becomes visible.
    ///
    /// Targets past the end are treated as the last slot.
    pub fn scroll_to_index(&mut self, target: usize) -> usize {
        if self.skeleton_length == 0 {
            return self.set_start(0);
        }

        let target = target.min(self.skeleton_length - 1);
        let end = self.start_index + self.visible_count;
        let requested = if target < self.start_index {
            target
        } else if target >= end {
            (target + 1).saturating_sub(self.visible_count.max(1))
        } else {
            self.start_index
        };
        self.set_start(requested)
    }

    pub fn scroll_to_first(&mut self) -> usize {
        self.set_start(0)
    }

    pub fn scroll_to_last(&mut self) -> usize {
        self.set_start(usize::MAX)
    }

    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Slots that fit into the pixel width, regardless of skeleton length.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn skeleton_length(&self) -> usize {
        self.skeleton_length
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == ViewportState::Active
    }

    /// Skeleton indices currently on screen.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.start_index..self.start_index + self.visible_count
    }
}

/// `floor(pixel_width / tick_pixel_width)`, or `0` for degenerate geometry.
#[must_use]
pub fn visible_slot_capacity(pixel_width: f64, tick_pixel_width: u32) -> usize {
    if tick_pixel_width == 0 || !pixel_width.is_finite() || pixel_width <= 0.0 {
        return 0;
    }
    (pixel_width / f64::from(tick_pixel_width)).floor() as usize
}

/// Saturates a requested start index so the window stays inside the skeleton.
///
/// Returns `0` whenever the whole skeleton fits in `visible_count` slots.
#[must_use]
pub fn clamp_start(requested_start: usize, skeleton_length: usize, visible_count: usize) -> usize {
    if skeleton_length > visible_count {
        requested_start.min(skeleton_length - visible_count)
    } else {
        0
    }
}
