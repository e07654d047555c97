pub mod engine;
pub mod handle;
pub mod types;

pub use engine::CarouselEngine;
pub use handle::CarouselHandle;
pub use types::{CarouselView, Direction};
