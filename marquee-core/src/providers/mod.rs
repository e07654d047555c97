pub mod tmdb;
pub mod traits;

pub use tmdb::TmdbClient;
pub use traits::{CategorySource, ProviderError};

#[cfg(test)]
pub use traits::MockCategorySource;
