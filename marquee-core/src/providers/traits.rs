use async_trait::async_trait;
use marquee_model::{CategoryKey, MediaDetails, MediaItem, MediaType};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("No TMDB credentials configured")]
    MissingCredentials,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ProviderError {
    /// Worth retrying later without changing anything locally.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited | ProviderError::NetworkError(_)
        )
    }
}

/// Where rows and preview details come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// First page of the listing behind `key`, already shaped for the row
    /// (ranked rows carry their rank).
    async fn fetch_category(
        &self,
        key: CategoryKey,
    ) -> Result<Vec<MediaItem>, ProviderError>;

    async fn fetch_details(
        &self,
        id: u64,
        media_type: MediaType,
    ) -> Result<MediaDetails, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_throttling_and_network_failures_are_transient() {
        assert!(ProviderError::RateLimited.is_transient());
        assert!(!ProviderError::NotFound.is_transient());
        assert!(!ProviderError::InvalidApiKey.is_transient());
        assert!(!ProviderError::MissingCredentials.is_transient());
        assert!(!ProviderError::ApiError("boom".into()).is_transient());
        assert!(!ProviderError::ParseError("eof".into()).is_transient());
    }
}
