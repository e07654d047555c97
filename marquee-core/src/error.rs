use std::sync::Arc;

use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Provider error: {0}")]
    SharedProvider(Arc<ProviderError>),

    #[error("Configuration error: {0}")]
    Config(#[from] marquee_config::ConfigLoadError),

    #[error("No async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

impl From<Arc<ProviderError>> for CoreError {
    fn from(err: Arc<ProviderError>) -> Self {
        CoreError::SharedProvider(err)
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
