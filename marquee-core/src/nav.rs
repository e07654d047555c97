//! Navigation bar scroll state
//!
//! The bar starts transparent over the banner and turns solid once the page
//! has scrolled past a threshold.

use marquee_config::UiConfig;

/// Scroll-driven styling state for the top navigation bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavBar {
    threshold: f32,
    scroll_y: f32,
    solid: bool,
}

impl NavBar {
    /// Create a bar that turns solid once scrolled past `threshold` pixels
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: if threshold.is_finite() {
                threshold.max(0.0)
            } else {
                0.0
            },
            scroll_y: 0.0,
            solid: false,
        }
    }

    /// Record the latest vertical scroll offset.
    ///
    /// Returns `true` only when the solid state flipped, so callers can
    /// restyle on change and ignore the rest of the scroll stream.
    pub fn on_scroll(&mut self, scroll_y: f32) -> bool {
        self.scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
        let solid = self.scroll_y > self.threshold;
        std::mem::replace(&mut self.solid, solid) != solid
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for NavBar {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

impl From<&UiConfig> for NavBar {
    fn from(ui: &UiConfig) -> Self {
        Self::new(ui.nav_solid_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_solid_past_threshold() {
        let mut nav = NavBar::new(100.0);
        assert!(!nav.is_solid());
        assert!(!nav.on_scroll(50.0));
        assert!(!nav.on_scroll(100.0));
        assert!(nav.on_scroll(101.0));
        assert!(nav.is_solid());
    }

    #[test]
    fn reports_only_flips() {
        let mut nav = NavBar::default();
        assert!(nav.on_scroll(400.0));
        assert!(!nav.on_scroll(500.0));
        assert!(!nav.on_scroll(300.0));
        assert!(nav.on_scroll(0.0));
        assert!(!nav.is_solid());
    }

    #[test]
    fn garbage_scroll_is_top_of_page() {
        let mut nav = NavBar::new(100.0);
        nav.on_scroll(250.0);
        assert!(nav.on_scroll(f32::NAN));
        assert_eq!(nav.scroll_y(), 0.0);
        assert!(!nav.is_solid());
    }

    #[test]
    fn uses_configured_threshold() {
        let ui = UiConfig {
            nav_solid_threshold: 20.0,
            ..UiConfig::default()
        };
        let mut nav = NavBar::from(&ui);
        assert!(nav.on_scroll(21.0));
    }
}
