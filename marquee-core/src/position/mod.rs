pub mod resolver;
pub mod types;

pub use resolver::{PositionResolver, ResolverSettings};
pub use types::{PositionRequest, ResolvedPosition, Strategy, TransformOrigin};
