//! Convenience re-exports for crates that consume most of the model.

pub use crate::category::CategoryKey;
pub use crate::geometry::{Rect, Size, Viewport};
pub use crate::media::{MediaDetails, MediaItem, MediaSummary};
pub use crate::media_type::MediaType;
