//! Request and result records for pop-up placement

use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use marquee_model::geometry::{Rect, Size, Viewport};

/// Caller-supplied anchor for [`Strategy::Custom`]: returns a viewport
/// `(left, top)` that is still clamped afterwards.
pub type AnchorFn = Arc<dyn Fn(&PositionRequest) -> (f32, f32) + Send + Sync>;

/// Where the pop-up is anchored before clamping.
#[derive(Clone, Default)]
pub enum Strategy {
    /// Centre of the viewport, ignoring the trigger
    Center,
    /// Centred on the trigger horizontally, pinned to the top padding
    Top,
    /// Centred on the trigger horizontally, pinned to the bottom padding
    Bottom,
    /// Below the trigger, flipping above when there is no room
    #[default]
    FollowTrigger,
    Custom(AnchorFn),
}

impl Debug for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Center => f.write_str("Center"),
            Strategy::Top => f.write_str("Top"),
            Strategy::Bottom => f.write_str("Bottom"),
            Strategy::FollowTrigger => f.write_str("FollowTrigger"),
            Strategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One show-event worth of geometry. All values in viewport pixels.
#[derive(Debug, Clone)]
pub struct PositionRequest {
    pub trigger: Rect,
    pub content: Size,
    pub viewport: Viewport,
    pub strategy: Strategy,
}

impl PositionRequest {
    pub fn follow(trigger: Rect, content: Size, viewport: Viewport) -> Self {
        Self {
            trigger,
            content,
            viewport,
            strategy: Strategy::FollowTrigger,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Corner the scale-in animation grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOrigin {
    Left,
    Center,
    Right,
}

impl TransformOrigin {
    /// CSS `transform-origin` value
    pub fn as_css(&self) -> &'static str {
        match self {
            TransformOrigin::Left => "left center",
            TransformOrigin::Center => "center center",
            TransformOrigin::Right => "right center",
        }
    }
}

impl Display for TransformOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Placement in document coordinates (viewport position plus scroll).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub left: f32,
    pub top: f32,
    pub transform_origin: TransformOrigin,
    pub near_left_edge: bool,
    pub near_right_edge: bool,
}
