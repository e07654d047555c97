//! A mounted row
//!
//! Ties a [`CarouselHandle`] to the breakpoint policy and to the settle
//! timer that ends each slide. Hosts without their own animation callback
//! get correct "drop input while sliding" behaviour from the timer alone;
//! hosts that do have one can still call
//! [`CarouselHandle::settle_transition`] directly, it is idempotent.

use std::time::Duration;

use marquee_config::{BreakpointPolicy, Config};
use marquee_model::CategoryKey;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::debug;

use crate::carousel::{CarouselEngine, CarouselHandle, CarouselView};
use crate::timer::Timer;

#[derive(Debug, Clone)]
pub struct RowSettings {
    pub breakpoints: BreakpointPolicy,
    pub transition_duration: Duration,
}

impl From<&Config> for RowSettings {
    fn from(config: &Config) -> Self {
        Self {
            breakpoints: config.breakpoints.clone(),
            transition_duration: config.ui.transition_duration,
        }
    }
}

impl Default for RowSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug)]
pub struct Row<T> {
    category: CategoryKey,
    handle: CarouselHandle<T>,
    settings: RowSettings,
    settle: Timer,
}

impl<T> Row<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Mount a row sized for `viewport_width` on the current runtime.
    pub fn mount(
        category: CategoryKey,
        items: Vec<T>,
        viewport_width: f32,
        settings: RowSettings,
    ) -> crate::Result<Self> {
        Ok(Self::mount_on(
            Handle::try_current()?,
            category,
            items,
            viewport_width,
            settings,
        ))
    }

    pub fn mount_on(
        runtime: Handle,
        category: CategoryKey,
        items: Vec<T>,
        viewport_width: f32,
        settings: RowSettings,
    ) -> Self {
        let per_page =
            settings.breakpoints.resolve_items_per_page(viewport_width);
        debug!(
            category = %category,
            items = items.len(),
            per_page,
            "row mounted"
        );
        Self {
            category,
            handle: CarouselHandle::new(CarouselEngine::new(items, per_page)),
            settings,
            settle: Timer::new(runtime),
        }
    }

    pub fn next(&mut self) -> bool {
        let accepted = self.handle.move_next();
        if accepted {
            self.arm_settle();
        }
        accepted
    }

    pub fn prev(&mut self) -> bool {
        let accepted = self.handle.move_prev();
        if accepted {
            self.arm_settle();
        }
        accepted
    }

    /// Re-resolve the page size for a new viewport width. Returns whether
    /// the page size changed.
    pub fn resize(&mut self, viewport_width: f32) -> bool {
        let per_page = self
            .settings
            .breakpoints
            .resolve_items_per_page(viewport_width);
        if per_page == self.handle.items_per_page() {
            return false;
        }
        self.handle.update_items_to_display(per_page);
        true
    }

    /// Replace the row content, e.g. after a reload.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.handle.set_items(items);
    }

    /// Cancel the pending settle and end any slide in progress, so a row
    /// shown again accepts movement straight away.
    pub fn teardown(&mut self) {
        self.settle.cancel();
        self.handle.settle_transition();
        debug!(category = %self.category, "row torn down");
    }

    pub fn category(&self) -> CategoryKey {
        self.category
    }

    pub fn handle(&self) -> &CarouselHandle<T> {
        &self.handle
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselView<T>> {
        self.handle.subscribe()
    }

    pub fn view(&self) -> CarouselView<T> {
        self.handle.view()
    }

    fn arm_settle(&mut self) {
        let handle = self.handle.clone();
        self.settle
            .arm(self.settings.transition_duration, move || {
                handle.settle_transition();
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: Duration = Duration::from_millis(750);

    fn row(len: u32, width: f32) -> Row<u32> {
        Row::mount(
            CategoryKey::ActionMovies,
            (0..len).collect(),
            width,
            RowSettings::default(),
        )
        .expect("runtime")
    }

    async fn advance(d: Duration) {
        tokio::time::advance(d).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn mount_sizes_the_page_from_the_viewport() {
        assert_eq!(row(20, 400.0).view().items_per_page, 2);
        assert_eq!(row(20, 1000.0).view().items_per_page, 4);
        assert_eq!(row(20, 2560.0).view().items_per_page, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn movement_is_locked_until_the_slide_settles() {
        let mut row = row(20, 1000.0);
        assert!(row.next());
        assert!(!row.next());

        advance(SLIDE - Duration::from_millis(1)).await;
        assert!(row.view().is_transitioning);
        assert!(!row.prev());

        advance(Duration::from_millis(1)).await;
        assert!(!row.view().is_transitioning);
        assert!(row.next());
        assert_eq!(row.view().current_index, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_the_settle() {
        let mut row = row(20, 1000.0);
        let mut rx = row.subscribe();
        row.next();
        assert!(rx.borrow_and_update().is_transitioning);

        advance(SLIDE).await;
        assert!(rx.has_changed().expect("row alive"));
        assert!(!rx.borrow_and_update().is_transitioning);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_mid_slide_leaves_the_row_usable() {
        let mut row = row(20, 1000.0);
        assert!(row.next());
        row.teardown();
        assert!(!row.view().is_transitioning);

        advance(SLIDE * 2).await;
        assert!(!row.view().is_transitioning);
        assert!(row.next());
        assert_eq!(row.view().current_index, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn resize_reports_only_real_changes() {
        let mut row = row(20, 1000.0);
        assert!(!row.resize(1050.0));
        assert!(row.resize(450.0));
        assert_eq!(row.view().items_per_page, 2);
        assert_eq!(row.view().item_width_percent, 50.0);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_to_page_arms_nothing() {
        let mut row = row(3, 2000.0);
        assert!(!row.next());
        assert!(!row.view().is_transitioning);
        assert!(!row.view().show_controls);
    }

    #[test]
    fn mount_outside_runtime_fails() {
        let mounted = Row::<u32>::mount(
            CategoryKey::Trending,
            Vec::new(),
            800.0,
            RowSettings::default(),
        );
        assert!(mounted.is_err());
    }
}
