//! Featured banner selection and text helpers

use std::fmt;

use marquee_config::{TmdbConfig, UiConfig};
use marquee_model::{MediaItem, MediaSummary};
use rand::Rng;
use rand::seq::IndexedRandom;

const ELLIPSIS: &str = "...";

/// TMDB image widths used by the browse page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Row cards
    W300,
    /// Preview pop-ups
    W500,
    W780,
    /// Banner backdrop
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds `{base}/{size}{path}`. Returns `None` when the item has no image
/// so the renderer can fall back to a placeholder.
pub fn image_url(
    base: &str,
    path: Option<&str>,
    size: ImageSize,
) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}/{size}{path}"))
    } else {
        Some(format!("{base}/{size}/{path}"))
    }
}

/// Texts longer than `max_chars` keep their first `max_chars - 1`
/// characters, trailing whitespace dropped, followed by `...`.
pub fn truncate_overview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(idx, _)| idx);
    let mut out = String::with_capacity(cut + ELLIPSIS.len());
    out.push_str(text[..cut].trim_end());
    out.push_str(ELLIPSIS);
    out
}

/// Pick the banner title uniformly at random. `None` for an empty row.
pub fn pick<'a, R: Rng + ?Sized>(
    items: &'a [MediaItem],
    rng: &mut R,
) -> Option<&'a MediaItem> {
    items.choose(rng)
}

/// Everything the banner renders, resolved once per page load.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedBanner {
    pub item: MediaItem,
    pub title: String,
    pub overview: String,
    pub backdrop_url: Option<String>,
}

impl FeaturedBanner {
    pub fn new(item: MediaItem, tmdb: &TmdbConfig, ui: &UiConfig) -> Self {
        let summary: &MediaSummary = item.summary();
        let title = summary.title.clone();
        let overview =
            truncate_overview(&summary.overview, ui.overview_max_chars);
        let backdrop_url = image_url(
            &tmdb.image_base_url,
            summary
                .backdrop_path
                .as_deref()
                .or(summary.poster_path.as_deref()),
            ImageSize::Original,
        );
        Self {
            item,
            title,
            overview,
            backdrop_url,
        }
    }

    /// Choose a random item from `items` and resolve its banner.
    pub fn choose<R: Rng + ?Sized>(
        items: &[MediaItem],
        rng: &mut R,
        tmdb: &TmdbConfig,
        ui: &UiConfig,
    ) -> Option<Self> {
        pick(items, rng).map(|item| Self::new(item.clone(), tmdb, ui))
    }
}
