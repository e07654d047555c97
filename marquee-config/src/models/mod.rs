pub mod breakpoints;

use std::path::PathBuf;
use std::time::Duration;

use breakpoints::BreakpointPolicy;

use crate::constants::*;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub ui: UiConfig,
    pub breakpoints: BreakpointPolicy,
    pub cache: CacheConfig,
    pub metadata: ConfigMetadata,
}

/// Connection settings for the TMDB REST API.
#[derive(Clone)]
pub struct TmdbConfig {
    /// v3 key, sent as the `api_key` query parameter
    pub api_key: Option<String>,
    /// v4 read access token, sent as a bearer header. Preferred when both
    /// are set.
    pub access_token: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() || self.access_token.is_some()
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            image_base_url: DEFAULT_TMDB_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Interaction timings and pop-up geometry knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub hover_open_delay: Duration,
    pub hover_close_delay: Duration,
    pub transition_duration: Duration,
    pub nav_solid_threshold: f32,
    pub padding_ratio: f32,
    pub vertical_padding: f32,
    pub edge_threshold: f32,
    pub trigger_gap: f32,
    pub overview_max_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hover_open_delay: DEFAULT_HOVER_OPEN_DELAY,
            hover_close_delay: DEFAULT_HOVER_CLOSE_DELAY,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            nav_solid_threshold: DEFAULT_NAV_SOLID_THRESHOLD,
            padding_ratio: DEFAULT_PADDING_RATIO,
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            trigger_gap: DEFAULT_TRIGGER_GAP,
            overview_max_chars: DEFAULT_OVERVIEW_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheConfig {
    /// How long fetched details stay fresh. `None` keeps them for the session.
    pub detail_ttl: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
