//! Catalog loading for the browse page
//!
//! Rows are loaded independently and a failing row never takes the page
//! down with it: [`Catalog::load_category`] always returns a
//! [`CategoryResult`], with the error message in place of items when the
//! source failed.

mod detail_cache;

use std::sync::Arc;

use futures::future::join_all;
use marquee_config::Config;
use marquee_model::{CategoryKey, MediaDetails, MediaItem, MediaType};
use rand::Rng;
use tracing::{info, warn};

pub use detail_cache::{CacheStats, DetailCache, DetailKey, DetailResult};

use crate::featured::FeaturedBanner;
use crate::providers::{CategorySource, TmdbClient};

/// Category the banner draws from.
pub const FEATURED_CATEGORY: CategoryKey = CategoryKey::NetflixOriginals;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    pub key: CategoryKey,
    pub items: Vec<MediaItem>,
    /// Present when the source failed; `items` is empty in that case.
    pub error: Option<String>,
}

impl CategoryResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn CategorySource>,
    details: DetailCache,
    config: Arc<Config>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("details", &self.details)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    pub fn new(source: Arc<dyn CategorySource>, config: Config) -> Self {
        let details =
            DetailCache::new(Arc::clone(&source), config.cache.detail_ttl);
        Self {
            source,
            details,
            config: Arc::new(config),
        }
    }

    /// Catalog backed by TMDB as configured.
    pub fn tmdb(config: Config) -> crate::Result<Self> {
        let client = TmdbClient::new(&config.tmdb)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load one row. Never fails.
    pub async fn load_category(&self, key: CategoryKey) -> CategoryResult {
        match self.source.fetch_category(key).await {
            Ok(items) => CategoryResult {
                key,
                items,
                error: None,
            },
            Err(err) => {
                warn!(category = %key, "failed to load category: {err}");
                CategoryResult {
                    key,
                    items: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Load rows concurrently, results in the order of `keys`.
    pub async fn load_all(&self, keys: &[CategoryKey]) -> Vec<CategoryResult> {
        let loads = keys.iter().map(|key| self.load_category(*key));
        let results = join_all(loads).await;
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        info!(rows = results.len(), failed, "catalog loaded");
        results
    }

    /// Pick the banner from the featured row. `None` when that row is
    /// empty or failed to load.
    pub async fn load_featured<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<FeaturedBanner> {
        let row = self.load_category(FEATURED_CATEGORY).await;
        let Config { tmdb, ui, .. } = self.config.as_ref();
        FeaturedBanner::choose(&row.items, rng, tmdb, ui)
    }

    /// Memoized details for a preview. Failures are not cached, so the
    /// next call for the same title asks the source again.
    pub async fn details(
        &self,
        id: u64,
        media_type: MediaType,
    ) -> crate::Result<Arc<MediaDetails>> {
        Ok(self.details.get(id, media_type).await?)
    }

    /// Details for every item of a row, for prefetching previews.
    pub async fn prefetch_details(
        &self,
        items: &[MediaItem],
    ) -> Vec<Arc<MediaDetails>> {
        let keys: Vec<DetailKey> = items
            .iter()
            .map(|item| DetailKey {
                id: item.id(),
                media_type: item.media_type(),
            })
            .collect();
        self.details.get_many(&keys).await
    }

    pub fn detail_cache(&self) -> &DetailCache {
        &self.details
    }
}
