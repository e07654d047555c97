//! Built-in defaults. Everything here can be overridden by file or env.

use std::time::Duration;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_HOVER_OPEN_DELAY: Duration = Duration::from_millis(400);
pub const DEFAULT_HOVER_CLOSE_DELAY: Duration = Duration::from_millis(150);
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(750);

pub const DEFAULT_NAV_SOLID_THRESHOLD: f32 = 100.0;
pub const DEFAULT_PADDING_RATIO: f32 = 0.04;
pub const DEFAULT_VERTICAL_PADDING: f32 = 10.0;
pub const DEFAULT_EDGE_THRESHOLD: f32 = 100.0;
pub const DEFAULT_TRIGGER_GAP: f32 = 8.0;
pub const DEFAULT_OVERVIEW_MAX_CHARS: usize = 150;

/// `(max_width, items_per_page)` pairs, ascending.
pub const DEFAULT_BREAKPOINTS: [(f32, usize); 4] =
    [(500.0, 2), (800.0, 3), (1100.0, 4), (1400.0, 5)];
pub const DEFAULT_WIDE_ITEMS: usize = 6;

pub const CONFIG_PATH_ENV: &str = "MARQUEE_CONFIG";
