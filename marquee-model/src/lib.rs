//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod category;
pub mod error;
pub mod geometry;
pub mod media;
pub mod media_type;
pub mod prelude;

// Intentionally curated re-exports for downstream consumers.
pub use category::CategoryKey;
pub use error::{ModelError, Result as ModelResult};
pub use geometry::{Rect, Size, Viewport};
pub use media::{MediaDetails, MediaItem, MediaSummary};
pub use media_type::MediaType;
