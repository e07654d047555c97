//! On-disk TOML layout. Every field is optional so a file only needs to
//! mention what it overrides.

use serde::Deserialize;

use crate::models::breakpoints::Breakpoint;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tmdb: FileTmdb,
    pub ui: FileUi,
    pub breakpoints: Option<FileBreakpoints>,
    pub cache: FileCache,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileTmdb {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub language: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileUi {
    pub hover_open_delay: Option<String>,
    pub hover_close_delay: Option<String>,
    pub transition_duration: Option<String>,
    pub nav_solid_threshold: Option<f32>,
    pub padding_ratio: Option<f32>,
    pub vertical_padding: Option<f32>,
    pub edge_threshold: Option<f32>,
    pub trigger_gap: Option<f32>,
    pub overview_max_chars: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileBreakpoints {
    pub table: Vec<Breakpoint>,
    pub fallback: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileCache {
    pub detail_ttl: Option<String>,
}
