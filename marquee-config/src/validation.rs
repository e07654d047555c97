//! Guard rails applied after a config is assembled.
//!
//! Hard errors stop the load; warnings are collected and logged so the
//! host can still start (no credentials simply means empty rows).

use std::fmt::{Display, Formatter};
use std::time::Duration;

use url::Url;

use crate::loader::error::ConfigLoadError;
use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingCredentials,
    ShortTimeout(Duration),
    ZeroHoverDelay,
}

impl Display for ConfigWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingCredentials => write!(
                f,
                "no TMDB credentials configured; category fetches will fail"
            ),
            ConfigWarning::ShortTimeout(t) => {
                write!(f, "request timeout {t:?} is unusually short")
            }
            ConfigWarning::ZeroHoverDelay => write!(
                f,
                "hover open delay is zero; previews open on every pass-over"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings(Vec<ConfigWarning>);

impl ConfigWarnings {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, warning: &ConfigWarning) -> bool {
        self.0.contains(warning)
    }
}

pub fn validate(config: &Config) -> Result<ConfigWarnings, ConfigLoadError> {
    Url::parse(&config.tmdb.base_url).map_err(|source| {
        ConfigLoadError::InvalidUrl {
            key: "tmdb.base_url",
            source,
        }
    })?;
    Url::parse(&config.tmdb.image_base_url).map_err(|source| {
        ConfigLoadError::InvalidUrl {
            key: "tmdb.image_base_url",
            source,
        }
    })?;

    let ratio = config.ui.padding_ratio;
    if !(0.0..0.5).contains(&ratio) {
        return Err(ConfigLoadError::Invalid(format!(
            "ui.padding_ratio must be in [0, 0.5), got {ratio}"
        )));
    }

    let policy = &config.breakpoints;
    let zero_count = policy.breakpoints().iter().any(|b| b.items == 0);
    if policy.fallback() == 0 || zero_count {
        return Err(ConfigLoadError::Invalid(
            "breakpoint item counts must be positive".to_string(),
        ));
    }

    if config.ui.overview_max_chars == 0 {
        return Err(ConfigLoadError::Invalid(
            "ui.overview_max_chars must be positive".to_string(),
        ));
    }

    let mut warnings = Vec::new();
    if !config.tmdb.has_credentials() {
        warnings.push(ConfigWarning::MissingCredentials);
    }
    if config.tmdb.timeout < Duration::from_secs(1) {
        warnings.push(ConfigWarning::ShortTimeout(config.tmdb.timeout));
    }
    if config.ui.hover_open_delay.is_zero() {
        warnings.push(ConfigWarning::ZeroHoverDelay);
    }
    Ok(ConfigWarnings(warnings))
}
