//! CarouselEngine: page-at-a-time navigation over a row of items

use tracing::debug;

use super::types::{CarouselView, Direction};

/// Paging state for one row.
///
/// Movement is page-sized and wraps back to the start once the last page
/// (which may be a short tail page) has been shown. While a movement is in
/// flight every further movement request is dropped; the host clears the
/// flag with [`CarouselEngine::settle_transition`] once its animation ends.
#[derive(Debug, Clone)]
pub struct CarouselEngine<T> {
    items: Vec<T>,
    items_per_page: usize,
    current_index: usize,
    direction: Direction,
    is_transitioning: bool,
    has_moved_once: bool,
}

impl<T> CarouselEngine<T> {
    /// `items_per_page` of zero is treated as one.
    pub fn new(items: Vec<T>, items_per_page: usize) -> Self {
        Self {
            items,
            items_per_page: items_per_page.max(1),
            current_index: 0,
            direction: Direction::Next,
            is_transitioning: false,
            has_moved_once: false,
        }
    }

    /// Advance one page, or wrap to the start from the last page.
    ///
    /// Returns `false` when the request was dropped: a transition is still
    /// in flight, or every item already fits on one page.
    pub fn move_next(&mut self) -> bool {
        if self.is_transitioning {
            debug!(
                current_index = self.current_index,
                "move_next dropped: transition in flight"
            );
            return false;
        }
        let len = self.items.len();
        if len <= self.items_per_page {
            return false;
        }

        self.direction = Direction::Next;
        // A short tail page is shown as-is before wrapping.
        if self.current_index + self.items_per_page >= len {
            self.current_index = 0;
        } else {
            self.current_index += self.items_per_page;
        }
        self.is_transitioning = true;
        self.has_moved_once = true;

        debug!(
            current_index = self.current_index,
            items_per_page = self.items_per_page,
            total = len,
            "carousel moved next"
        );
        true
    }

    /// Go back one page, stopping at the start. Safe to call before any
    /// forward movement. Returns `false` only while a transition is in flight.
    pub fn move_prev(&mut self) -> bool {
        if self.is_transitioning {
            debug!(
                current_index = self.current_index,
                "move_prev dropped: transition in flight"
            );
            return false;
        }

        self.direction = Direction::Previous;
        self.current_index =
            self.current_index.saturating_sub(self.items_per_page);
        self.is_transitioning = true;

        debug!(
            current_index = self.current_index,
            items_per_page = self.items_per_page,
            "carousel moved previous"
        );
        true
    }

    /// Clears the in-flight flag. Idempotent; returns whether a transition
    /// was actually pending.
    pub fn settle_transition(&mut self) -> bool {
        std::mem::replace(&mut self.is_transitioning, false)
    }

    /// Apply a new page size from the breakpoint policy and re-clamp the
    /// offset so the last page stays full. Zero is treated as one.
    pub fn update_items_to_display(&mut self, count: usize) {
        self.items_per_page = count.max(1);
        self.clamp_index();
        debug!(
            items_per_page = self.items_per_page,
            current_index = self.current_index,
            "carousel page size updated"
        );
    }

    /// Replace the row content, e.g. after a refetch.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_index();
    }

    fn clamp_index(&mut self) {
        let len = self.items.len();
        self.current_index = if len <= self.items_per_page {
            0
        } else {
            self.current_index.min(len - self.items_per_page)
        };
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn has_moved_once(&self) -> bool {
        self.has_moved_once
    }

    // Derived values. Computed from the fields on every call so they can
    // never disagree with the state they describe.

    pub fn item_width_percent(&self) -> f32 {
        100.0 / self.items_per_page as f32
    }

    /// Items on the current page; shorter than a page at the tail.
    pub fn visible_slice(&self) -> &[T] {
        let start = self.current_index.min(self.items.len());
        let end = (start + self.items_per_page).min(self.items.len());
        &self.items[start..end]
    }

    pub fn show_controls(&self) -> bool {
        self.items.len() > self.items_per_page
    }

    /// The previous control stays hidden until the user has moved forward.
    pub fn show_prev_control(&self) -> bool {
        self.show_controls() && self.has_moved_once
    }

    pub fn pagination_indicator_count(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page)
    }

    /// Index of the highlighted pagination indicator. A page that was
    /// re-clamped to end flush with the row counts as the last page.
    pub fn active_indicator(&self) -> usize {
        let count = self.pagination_indicator_count();
        if count == 0 {
            return 0;
        }
        self.current_index
            .div_ceil(self.items_per_page)
            .min(count - 1)
    }
}

impl<T: Clone> CarouselEngine<T> {
    /// Bundle the derived values for subscribers.
    pub fn snapshot(&self) -> CarouselView<T> {
        CarouselView {
            visible: self.visible_slice().to_vec(),
            current_index: self.current_index,
            items_per_page: self.items_per_page,
            total_items: self.items.len(),
            item_width_percent: self.item_width_percent(),
            show_controls: self.show_controls(),
            show_prev_control: self.show_prev_control(),
            pagination_indicator_count: self.pagination_indicator_count(),
            active_indicator: self.active_indicator(),
            direction: self.direction,
            is_transitioning: self.is_transitioning,
        }
    }
}
