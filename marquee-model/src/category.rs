//! Row sources and the TMDB queries behind them.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;
use crate::media_type::MediaType;

/// Strongly typed key for each row the browse page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CategoryKey {
    Trending,
    NetflixOriginals,
    TopRated,
    ActionMovies,
    ComedyMovies,
    HorrorMovies,
    RomanceMovies,
    Documentaries,
    PopularTv,
}

impl CategoryKey {
    /// Every row in browse-page order.
    pub const ALL: [CategoryKey; 9] = [
        CategoryKey::NetflixOriginals,
        CategoryKey::Trending,
        CategoryKey::TopRated,
        CategoryKey::ActionMovies,
        CategoryKey::ComedyMovies,
        CategoryKey::HorrorMovies,
        CategoryKey::RomanceMovies,
        CategoryKey::Documentaries,
        CategoryKey::PopularTv,
    ];

    /// Maximum number of entries in a ranked row.
    pub const RANKED_LIMIT: usize = 10;

    /// API path relative to the TMDB base url.
    pub fn path(&self) -> &'static str {
        match self {
            CategoryKey::Trending => "/trending/all/week",
            CategoryKey::NetflixOriginals => "/discover/tv",
            CategoryKey::TopRated => "/movie/top_rated",
            CategoryKey::ActionMovies
            | CategoryKey::ComedyMovies
            | CategoryKey::HorrorMovies
            | CategoryKey::RomanceMovies
            | CategoryKey::Documentaries => "/discover/movie",
            CategoryKey::PopularTv => "/tv/popular",
        }
    }

    /// Extra query parameters narrowing the listing.
    pub fn query(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            CategoryKey::NetflixOriginals => &[("with_networks", "213")],
            CategoryKey::ActionMovies => &[("with_genres", "28")],
            CategoryKey::ComedyMovies => &[("with_genres", "35")],
            CategoryKey::HorrorMovies => &[("with_genres", "27")],
            CategoryKey::RomanceMovies => &[("with_genres", "10749")],
            CategoryKey::Documentaries => &[("with_genres", "99")],
            CategoryKey::Trending
            | CategoryKey::TopRated
            | CategoryKey::PopularTv => &[],
        }
    }

    /// Media type of the listing, `None` for mixed listings where each
    /// result carries its own `media_type`.
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            CategoryKey::Trending => None,
            CategoryKey::NetflixOriginals | CategoryKey::PopularTv => {
                Some(MediaType::Tv)
            }
            _ => Some(MediaType::Movie),
        }
    }

    /// Row heading
    pub fn title(&self) -> &'static str {
        match self {
            CategoryKey::Trending => "Trending Now",
            CategoryKey::NetflixOriginals => "Netflix Originals",
            CategoryKey::TopRated => "Top Rated",
            CategoryKey::ActionMovies => "Action Movies",
            CategoryKey::ComedyMovies => "Comedy Movies",
            CategoryKey::HorrorMovies => "Horror Movies",
            CategoryKey::RomanceMovies => "Romance Movies",
            CategoryKey::Documentaries => "Documentaries",
            CategoryKey::PopularTv => "Popular on TV",
        }
    }

    /// Ranked rows render numbered cards and keep only the top entries.
    pub fn is_ranked(&self) -> bool {
        matches!(self, CategoryKey::TopRated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Trending => "trending",
            CategoryKey::NetflixOriginals => "netflix-originals",
            CategoryKey::TopRated => "top-rated",
            CategoryKey::ActionMovies => "action-movies",
            CategoryKey::ComedyMovies => "comedy-movies",
            CategoryKey::HorrorMovies => "horror-movies",
            CategoryKey::RomanceMovies => "romance-movies",
            CategoryKey::Documentaries => "documentaries",
            CategoryKey::PopularTv => "popular-tv",
        }
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == needle)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}
