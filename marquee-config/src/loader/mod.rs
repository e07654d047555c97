pub mod error;
pub mod file;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::constants::CONFIG_PATH_ENV;
use crate::models::breakpoints::BreakpointPolicy;
use crate::models::{Config, ConfigMetadata};
use crate::util::{non_empty, parse_duration};
use crate::validation::{self, ConfigWarnings};

use error::ConfigLoadError;
use file::FileConfig;

/// A loaded configuration together with the non-fatal findings from
/// validation.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

/// Layers defaults, an optional TOML file and environment variables.
///
/// Precedence is env > file > defaults. The environment snapshot is taken
/// once per load; tests inject their own map with [`ConfigLoader::with_env`].
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
    load_dotenv: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env: None,
            load_dotenv: true,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use `vars` instead of the process environment. Disables `.env` loading.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self.load_dotenv = false;
        self
    }

    pub fn load_dotenv(mut self, enabled: bool) -> Self {
        self.load_dotenv = enabled;
        self
    }

    pub fn load(self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = if self.load_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => {
                    debug!(path = %path.display(), "loaded .env file");
                    true
                }
                Err(_) => false,
            }
        } else {
            false
        };

        let env = match self.env {
            Some(env) => env,
            None => std::env::vars().collect(),
        };

        let config_path = self.config_path.or_else(|| {
            env.get(CONFIG_PATH_ENV)
                .and_then(|raw| non_empty(raw))
                .map(PathBuf::from)
        });

        let mut config = Config::default();
        if let Some(path) = config_path.as_deref() {
            let file = read_file(path)?;
            apply_file(&mut config, file)?;
            info!(path = %path.display(), "applied config file");
        }
        apply_env(&mut config, &env)?;

        config.metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };

        let warnings = validation::validate(&config)?;
        for warning in warnings.iter() {
            tracing::warn!("{warning}");
        }

        Ok(ConfigLoad { config, warnings })
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw =
        std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn duration_field(
    key: &str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    parse_duration(raw).ok_or_else(|| ConfigLoadError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn apply_file(
    config: &mut Config,
    file: FileConfig,
) -> Result<(), ConfigLoadError> {
    let FileConfig {
        tmdb,
        ui,
        breakpoints,
        cache,
    } = file;

    if let Some(v) = tmdb.api_key.as_deref().and_then(non_empty) {
        config.tmdb.api_key = Some(v);
    }
    if let Some(v) = tmdb.access_token.as_deref().and_then(non_empty) {
        config.tmdb.access_token = Some(v);
    }
    if let Some(v) = tmdb.base_url {
        config.tmdb.base_url = v;
    }
    if let Some(v) = tmdb.image_base_url {
        config.tmdb.image_base_url = v;
    }
    if let Some(v) = tmdb.language {
        config.tmdb.language = v;
    }
    if let Some(v) = tmdb.timeout {
        config.tmdb.timeout = duration_field("tmdb.timeout", &v)?;
    }

    if let Some(v) = ui.hover_open_delay {
        config.ui.hover_open_delay = duration_field("ui.hover_open_delay", &v)?;
    }
    if let Some(v) = ui.hover_close_delay {
        config.ui.hover_close_delay =
            duration_field("ui.hover_close_delay", &v)?;
    }
    if let Some(v) = ui.transition_duration {
        config.ui.transition_duration =
            duration_field("ui.transition_duration", &v)?;
    }
    if let Some(v) = ui.nav_solid_threshold {
        config.ui.nav_solid_threshold = v;
    }
    if let Some(v) = ui.padding_ratio {
        config.ui.padding_ratio = v;
    }
    if let Some(v) = ui.vertical_padding {
        config.ui.vertical_padding = v;
    }
    if let Some(v) = ui.edge_threshold {
        config.ui.edge_threshold = v;
    }
    if let Some(v) = ui.trigger_gap {
        config.ui.trigger_gap = v;
    }
    if let Some(v) = ui.overview_max_chars {
        config.ui.overview_max_chars = v;
    }

    if let Some(bp) = breakpoints {
        config.breakpoints = BreakpointPolicy::new(bp.table, bp.fallback);
    }

    if let Some(v) = cache.detail_ttl {
        config.cache.detail_ttl = Some(duration_field("cache.detail_ttl", &v)?);
    }

    Ok(())
}

fn apply_env(
    config: &mut Config,
    env: &HashMap<String, String>,
) -> Result<(), ConfigLoadError> {
    let get = |key: &str| env.get(key).and_then(|raw| non_empty(raw));

    if let Some(v) = get("TMDB_API_KEY") {
        config.tmdb.api_key = Some(v);
    }
    if let Some(v) = get("TMDB_ACCESS_TOKEN") {
        config.tmdb.access_token = Some(v);
    }
    if let Some(v) = get("MARQUEE_TMDB_BASE_URL") {
        config.tmdb.base_url = v;
    }
    if let Some(v) = get("MARQUEE_TMDB_IMAGE_BASE_URL") {
        config.tmdb.image_base_url = v;
    }
    if let Some(v) = get("MARQUEE_LANGUAGE") {
        config.tmdb.language = v;
    }
    if let Some(v) = get("MARQUEE_REQUEST_TIMEOUT") {
        config.tmdb.timeout = duration_field("MARQUEE_REQUEST_TIMEOUT", &v)?;
    }
    if let Some(v) = get("MARQUEE_HOVER_OPEN_DELAY") {
        config.ui.hover_open_delay =
            duration_field("MARQUEE_HOVER_OPEN_DELAY", &v)?;
    }
    if let Some(v) = get("MARQUEE_HOVER_CLOSE_DELAY") {
        config.ui.hover_close_delay =
            duration_field("MARQUEE_HOVER_CLOSE_DELAY", &v)?;
    }
    if let Some(v) = get("MARQUEE_TRANSITION_DURATION") {
        config.ui.transition_duration =
            duration_field("MARQUEE_TRANSITION_DURATION", &v)?;
    }
    if let Some(v) = get("MARQUEE_NAV_SOLID_THRESHOLD") {
        config.ui.nav_solid_threshold =
            float_field("MARQUEE_NAV_SOLID_THRESHOLD", &v)?;
    }
    if let Some(v) = get("MARQUEE_PADDING_RATIO") {
        config.ui.padding_ratio = float_field("MARQUEE_PADDING_RATIO", &v)?;
    }
    if let Some(v) = get("MARQUEE_VERTICAL_PADDING") {
        config.ui.vertical_padding =
            float_field("MARQUEE_VERTICAL_PADDING", &v)?;
    }
    if let Some(v) = get("MARQUEE_EDGE_THRESHOLD") {
        config.ui.edge_threshold = float_field("MARQUEE_EDGE_THRESHOLD", &v)?;
    }
    if let Some(v) = get("MARQUEE_TRIGGER_GAP") {
        config.ui.trigger_gap = float_field("MARQUEE_TRIGGER_GAP", &v)?;
    }
    if let Some(v) = get("MARQUEE_OVERVIEW_MAX_CHARS") {
        config.ui.overview_max_chars =
            count_field("MARQUEE_OVERVIEW_MAX_CHARS", &v)?;
    }
    if let Some(v) = get("MARQUEE_DETAIL_TTL") {
        config.cache.detail_ttl =
            Some(duration_field("MARQUEE_DETAIL_TTL", &v)?);
    }
    Ok(())
}

fn float_field(key: &str, raw: &str) -> Result<f32, ConfigLoadError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigLoadError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn count_field(key: &str, raw: &str) -> Result<usize, ConfigLoadError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ConfigLoadError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
