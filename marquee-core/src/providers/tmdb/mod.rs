//! TMDB v3 client backing [`CategorySource`].

mod dto;

use async_trait::async_trait;
use marquee_config::TmdbConfig;
use marquee_model::{CategoryKey, MediaDetails, MediaItem, MediaType};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use self::dto::{DetailsDto, ErrorDto, PageDto};
use super::traits::{CategorySource, ProviderError};

#[derive(Clone)]
enum Credentials {
    /// v4 read access token, sent as a bearer header
    Bearer(String),
    /// v3 key, sent as the `api_key` query parameter
    ApiKey(String),
}

/// Thin `reqwest` wrapper over the handful of TMDB endpoints the browse
/// page needs.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    language: String,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        // The bearer token wins when both are configured.
        let credentials = config
            .access_token
            .clone()
            .map(Credentials::Bearer)
            .or_else(|| config.api_key.clone().map(Credentials::ApiKey));
        if credentials.is_none() {
            warn!("TMDB client has no credentials; every request will fail");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach credentials and the language to a GET for `path`.
    fn get(&self, path: &str) -> Result<RequestBuilder, ProviderError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials)?;
        let builder = self
            .client
            .get(self.url(path))
            .query(&[("language", self.language.as_str())]);
        Ok(match credentials {
            Credentials::Bearer(token) => builder.bearer_auth(token),
            Credentials::ApiKey(key) => {
                builder.query(&[("api_key", key.as_str())])
            }
        })
    }

    fn category_request(
        &self,
        key: CategoryKey,
    ) -> Result<RequestBuilder, ProviderError> {
        Ok(self
            .get(key.path())?
            .query(&[("page", "1")])
            .query(key.query()))
    }

    fn details_request(
        &self,
        id: u64,
        media_type: MediaType,
    ) -> Result<RequestBuilder, ProviderError> {
        self.get(&format!("{}/{id}", media_type.as_path()))
    }

    /// Send `request` and decode a 2xx body as `T`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| ProviderError::ParseError(e.to_string()))
        } else {
            Err(error_for_status(status, &body))
        }
    }
}

/// Map a non-2xx TMDB response onto a provider error.
fn error_for_status(status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::InvalidApiKey,
        StatusCode::NOT_FOUND => ProviderError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        status => {
            let message = serde_json::from_str::<ErrorDto>(body)
                .ok()
                .and_then(|e| e.status_message)
                .unwrap_or_else(|| body.chars().take(200).collect());
            ProviderError::ApiError(format!("{status}: {message}"))
        }
    }
}

#[async_trait]
impl CategorySource for TmdbClient {
    async fn fetch_category(
        &self,
        key: CategoryKey,
    ) -> Result<Vec<MediaItem>, ProviderError> {
        debug!(category = %key, "fetching category");
        let page: PageDto = self.execute(self.category_request(key)?).await?;
        let items = page.into_items(key);
        debug!(category = %key, count = items.len(), "category fetched");
        Ok(items)
    }

    async fn fetch_details(
        &self,
        id: u64,
        media_type: MediaType,
    ) -> Result<MediaDetails, ProviderError> {
        debug!(id, %media_type, "fetching details");
        let request = self.details_request(id, media_type)?;
        let dto: DetailsDto = self.execute(request).await?;
        Ok(dto.into_details(media_type))
    }
}
