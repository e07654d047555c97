use crate::media_type::MediaType;

/// Lightweight listing of a title as it appears in a row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSummary {
    /// TMDB numeric id. Only unique together with `media_type`.
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub genre_ids: Vec<u32>,
}

impl MediaSummary {
    /// Minimal summary, mostly useful for fixtures and demo data.
    pub fn new(
        id: u64,
        media_type: MediaType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            media_type,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            release_date: None,
            genre_ids: Vec::new(),
        }
    }

    /// Four digit year taken from the release date, when present.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// A row entry. The variant decides how the renderer decorates the card.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum MediaItem {
    /// Plain card
    Standard(MediaSummary),
    /// "Top 10" card with its 1-based position
    Ranked { rank: u8, summary: MediaSummary },
    /// "Continue watching" card, `progress` in `[0, 1]`
    Watched { progress: f32, summary: MediaSummary },
}

impl MediaItem {
    pub fn ranked(rank: u8, summary: MediaSummary) -> Self {
        MediaItem::Ranked { rank, summary }
    }

    /// Builds a watched entry, clamping `progress` into `[0, 1]`.
    /// Non-finite progress is treated as unwatched.
    pub fn watched(progress: f32, summary: MediaSummary) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        MediaItem::Watched { progress, summary }
    }

    pub fn summary(&self) -> &MediaSummary {
        match self {
            MediaItem::Standard(summary)
            | MediaItem::Ranked { summary, .. }
            | MediaItem::Watched { summary, .. } => summary,
        }
    }

    pub fn id(&self) -> u64 {
        self.summary().id
    }

    pub fn media_type(&self) -> MediaType {
        self.summary().media_type
    }

    pub fn title(&self) -> &str {
        &self.summary().title
    }

    pub fn rank(&self) -> Option<u8> {
        match self {
            MediaItem::Ranked { rank, .. } => Some(*rank),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<f32> {
        match self {
            MediaItem::Watched { progress, .. } => Some(*progress),
            _ => None,
        }
    }
}

impl From<MediaSummary> for MediaItem {
    fn from(summary: MediaSummary) -> Self {
        MediaItem::Standard(summary)
    }
}

/// Full record shown in the preview pop-up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaDetails {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub overview: String,
    pub tagline: Option<String>,
    /// Minutes; movies only
    pub runtime: Option<u32>,
    /// TV only
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<String>,
    pub vote_average: f32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl MediaDetails {
    /// Human readable length: `"2h 8m"` for movies, `"3 Seasons"` for TV.
    pub fn duration_label(&self) -> Option<String> {
        match self.media_type {
            MediaType::Movie => self.runtime.filter(|m| *m > 0).map(|m| {
                let (hours, minutes) = (m / 60, m % 60);
                if hours == 0 {
                    format!("{minutes}m")
                } else {
                    format!("{hours}h {minutes}m")
                }
            }),
            MediaType::Tv => self.number_of_seasons.map(|n| match n {
                1 => "1 Season".to_string(),
                n => format!("{n} Seasons"),
            }),
        }
    }
}
