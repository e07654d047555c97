//! Wire shapes of the TMDB v3 endpoints Marquee reads.
//!
//! Only the fields the browse page shows are declared; serde ignores the
//! rest. Movies and TV disagree on field names (`title` vs `name`,
//! `release_date` vs `first_air_date`), so both are optional here and
//! reconciled when converting into model types.

use marquee_model::{
    CategoryKey, MediaDetails, MediaItem, MediaSummary, MediaType,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct PageDto {
    #[serde(default)]
    pub results: Vec<ResultDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultDto {
    pub id: u64,
    /// Present on mixed listings such as trending.
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreDto {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsDto {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub genres: Vec<GenreDto>,
    #[serde(default)]
    pub vote_average: f32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Error body TMDB returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDto {
    pub status_message: Option<String>,
}

fn first_non_empty(candidates: [Option<String>; 4]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl ResultDto {
    /// `None` for entries that are not titles (people show up in trending).
    pub fn into_summary(
        self,
        fallback: Option<MediaType>,
    ) -> Option<MediaSummary> {
        let media_type = match self.media_type.as_deref() {
            Some(kind) => kind.parse().ok()?,
            None => fallback?,
        };
        Some(MediaSummary {
            id: self.id,
            media_type,
            title: first_non_empty([
                self.title,
                self.name,
                self.original_title,
                self.original_name,
            ]),
            overview: self.overview.unwrap_or_default(),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
            vote_average: self.vote_average,
            release_date: non_empty(self.release_date)
                .or(non_empty(self.first_air_date)),
            genre_ids: self.genre_ids,
        })
    }
}

impl PageDto {
    /// Shape a listing page into row items for `key`.
    pub fn into_items(self, key: CategoryKey) -> Vec<MediaItem> {
        let summaries = self
            .results
            .into_iter()
            .filter_map(|r| r.into_summary(key.media_type()));

        if key.is_ranked() {
            summaries
                .take(CategoryKey::RANKED_LIMIT)
                .zip(1u8..)
                .map(|(summary, rank)| MediaItem::ranked(rank, summary))
                .collect()
        } else {
            summaries.map(MediaItem::Standard).collect()
        }
    }
}

impl DetailsDto {
    pub fn into_details(self, media_type: MediaType) -> MediaDetails {
        MediaDetails {
            id: self.id,
            media_type,
            title: first_non_empty([
                self.title,
                self.name,
                self.original_title,
                self.original_name,
            ]),
            overview: self.overview.unwrap_or_default(),
            tagline: non_empty(self.tagline),
            runtime: self.runtime,
            number_of_seasons: self.number_of_seasons,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            vote_average: self.vote_average,
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
        }
    }
}
