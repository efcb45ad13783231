//! Mapping between the virtual scroll space and logical item indices.
//!
//! Scroll indices address rows of the rendered column. In infinite mode the
//! column is [`INFINITE_SCROLL_COUNT`] rows tall and each row shows item
//! `scroll_index % item_count`. In finite mode the column is padded with
//! `visible_middle` empty rows at each end so the first and last items can
//! reach the center.

/// Rows in an infinite wheel's scroll space.
///
/// Seeding lands near the middle, so a user would need to scroll past
/// roughly two billion rows in one direction to reach an edge.
pub const INFINITE_SCROLL_COUNT: usize = u32::MAX as usize;

/// Logical item shown by the row at `scroll_index`, if any.
pub fn logical_index(
    scroll_index: usize,
    item_count: usize,
    infinite: bool,
    visible_middle: usize,
) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    if infinite {
        return Some(scroll_index % item_count);
    }
    scroll_index
        .checked_sub(visible_middle)
        .filter(|index| *index < item_count)
}

/// Top row that puts `desired` in the center of the viewport.
///
/// Infinite wheels start near `scroll_middle`, aligned down to a multiple
/// of `period` so the centered row maps back onto `desired`. A zero period
/// (nothing measured yet) skips the alignment.
pub fn seed_scroll_index(
    desired: usize,
    period: usize,
    scroll_middle: usize,
    visible_middle: usize,
    infinite: bool,
) -> usize {
    if !infinite {
        return desired;
    }
    if period == 0 {
        return scroll_middle.saturating_sub(visible_middle) + desired;
    }
    (scroll_middle - scroll_middle % period).saturating_sub(visible_middle) + desired
}

/// Geometry of one wheel's scroll space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSpace {
    item_count: usize,
    visible_count: usize,
    infinite: bool,
}

impl ScrollSpace {
    /// `visible_count` is expected odd and non-zero; the engine normalizes it.
    pub fn new(item_count: usize, visible_count: usize, infinite: bool) -> Self {
        Self {
            item_count,
            visible_count: visible_count.max(1),
            infinite,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    pub fn visible_middle(&self) -> usize {
        self.visible_count / 2
    }

    /// Total rows in the column.
    pub fn len(&self) -> usize {
        if self.infinite {
            INFINITE_SCROLL_COUNT
        } else {
            self.item_count + self.visible_middle() * 2
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn middle(&self) -> usize {
        self.len() / 2
    }

    /// Largest top row that still fills the viewport.
    pub fn max_top(&self) -> usize {
        self.len().saturating_sub(self.visible_count)
    }

    pub fn logical_index(&self, scroll_index: usize) -> Option<usize> {
        logical_index(
            scroll_index,
            self.item_count,
            self.infinite,
            self.visible_middle(),
        )
    }

    /// Top row that centers `logical`.
    pub fn seed_top(&self, logical: usize) -> usize {
        seed_scroll_index(
            logical,
            self.item_count,
            self.middle(),
            self.visible_middle(),
            self.infinite,
        )
    }

    /// Top row that centers `logical`, travelling the shortest way from
    /// `current_top`. Finite wheels have exactly one such row.
    pub fn nearest_top_for(&self, current_top: usize, logical: usize) -> usize {
        if !self.infinite || self.item_count == 0 {
            return logical.min(self.max_top());
        }
        let n = self.item_count;
        let center = current_top + self.visible_middle();
        let current = center % n;
        let target = logical % n;
        let forward = (target + n - current) % n;
        let backward = (n - forward) % n;
        let new_center = if forward <= backward {
            center + forward
        } else {
            center - backward
        };
        (new_center - self.visible_middle()).min(self.max_top())
    }
}
