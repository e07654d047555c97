//! Shared types for the carousel module

/// Direction of the last requested movement; picks the slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    #[default]
    Next,
}

/// Read-only view of a carousel, recomputed after every state change.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CarouselView<T> {
    pub visible: Vec<T>,
    pub current_index: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub item_width_percent: f32,
    pub show_controls: bool,
    pub show_prev_control: bool,
    pub pagination_indicator_count: usize,
    pub active_indicator: usize,
    pub direction: Direction,
    pub is_transitioning: bool,
}
