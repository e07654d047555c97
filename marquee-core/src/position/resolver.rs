//! Viewport-aware placement for hover previews.
//!
//! Every call is a pure function of the request and the settings: nothing
//! is cached between show-events because scroll and resize move the
//! trigger underneath us. Inputs are sanitized first and every clamp is
//! guarded against an inverted range, so the resolver cannot panic on
//! whatever the layout layer measured.

use marquee_config::UiConfig;
use marquee_config::constants::{
    DEFAULT_EDGE_THRESHOLD, DEFAULT_PADDING_RATIO, DEFAULT_TRIGGER_GAP,
    DEFAULT_VERTICAL_PADDING,
};
use marquee_model::geometry::{Rect, Size, Viewport};

use super::types::{
    PositionRequest, ResolvedPosition, Strategy, TransformOrigin,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverSettings {
    /// Horizontal padding as a fraction of viewport width
    pub padding_ratio: f32,
    pub vertical_padding: f32,
    /// Distance from a viewport side under which a trigger counts as "near"
    pub edge_threshold: f32,
    /// Space between trigger and pop-up
    pub trigger_gap: f32,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            padding_ratio: DEFAULT_PADDING_RATIO,
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            trigger_gap: DEFAULT_TRIGGER_GAP,
        }
    }
}

impl From<&UiConfig> for ResolverSettings {
    fn from(ui: &UiConfig) -> Self {
        Self {
            padding_ratio: ui.padding_ratio,
            vertical_padding: ui.vertical_padding,
            edge_threshold: ui.edge_threshold,
            trigger_gap: ui.trigger_gap,
        }
    }
}

impl ResolverSettings {
    fn sanitized(&self) -> Self {
        let clean = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            padding_ratio: clean(self.padding_ratio),
            vertical_padding: clean(self.vertical_padding),
            edge_threshold: clean(self.edge_threshold),
            trigger_gap: clean(self.trigger_gap),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionResolver {
    settings: ResolverSettings,
}

/// Padded box the content has to stay inside.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    h_pad: f32,
    v_pad: f32,
    viewport: Viewport,
    content: Size,
}

impl Bounds {
    /// Clamp into `[h_pad, vw - h_pad - width]`; content wider than the
    /// padded viewport butts against the left padding.
    fn clamp_left(&self, left: f32) -> f32 {
        let max = self.viewport.width - self.h_pad - self.content.width;
        if max < self.h_pad {
            self.h_pad
        } else {
            left.clamp(self.h_pad, max)
        }
    }

    fn clamp_top(&self, top: f32) -> f32 {
        let max = self.viewport.height - self.v_pad - self.content.height;
        if max < self.v_pad {
            self.v_pad
        } else {
            top.clamp(self.v_pad, max)
        }
    }

    fn fits_below(&self, top: f32) -> bool {
        top + self.content.height <= self.viewport.height - self.v_pad
    }

    fn fits_above(&self, top: f32) -> bool {
        top >= self.v_pad
    }
}

impl PositionResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn resolve(&self, request: &PositionRequest) -> ResolvedPosition {
        let settings = self.settings.sanitized();
        let trigger = request.trigger.sanitized();
        let content = request.content.sanitized();
        let viewport = request.viewport.sanitized();

        let bounds = Bounds {
            h_pad: (viewport.width * settings.padding_ratio).max(0.0),
            v_pad: settings.vertical_padding,
            viewport,
            content,
        };

        let centered_on_trigger =
            finite_or_zero(trigger.center_x() - content.width / 2.0);
        let (left, top) = match &request.strategy {
            Strategy::FollowTrigger => (
                bounds.clamp_left(centered_on_trigger),
                self.follow_top(&bounds, &trigger, settings.trigger_gap),
            ),
            Strategy::Center => (
                bounds.clamp_left((viewport.width - content.width) / 2.0),
                bounds.clamp_top((viewport.height - content.height) / 2.0),
            ),
            Strategy::Top => (
                bounds.clamp_left(centered_on_trigger),
                bounds.clamp_top(bounds.v_pad),
            ),
            Strategy::Bottom => (
                bounds.clamp_left(centered_on_trigger),
                bounds.clamp_top(
                    viewport.height - bounds.v_pad - content.height,
                ),
            ),
            Strategy::Custom(anchor) => {
                let (left, top) = anchor(request);
                (
                    bounds.clamp_left(finite_or_zero(left)),
                    bounds.clamp_top(finite_or_zero(top)),
                )
            }
        };

        let near_left_edge = trigger.left < settings.edge_threshold;
        let near_right_edge =
            viewport.width - trigger.right() < settings.edge_threshold;
        let transform_origin = if near_left_edge {
            TransformOrigin::Left
        } else if near_right_edge {
            TransformOrigin::Right
        } else {
            TransformOrigin::Center
        };

        ResolvedPosition {
            left: left + viewport.scroll_x,
            top: top + viewport.scroll_y,
            transform_origin,
            near_left_edge,
            near_right_edge,
        }
    }

    /// Below the trigger if it fits, else above, else pinned to the top
    /// padding. The pick is clamped again in case the trigger itself is
    /// partly outside the viewport.
    fn follow_top(&self, bounds: &Bounds, trigger: &Rect, gap: f32) -> f32 {
        let below = trigger.bottom() + gap;
        if bounds.fits_below(below) {
            return bounds.clamp_top(below);
        }
        let above = trigger.top - bounds.content.height - gap;
        if bounds.fits_above(above) {
            return bounds.clamp_top(above);
        }
        bounds.v_pad
    }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    const VW: f32 = 1000.0;
    const VH: f32 = 800.0;

    fn resolver() -> PositionResolver {
        PositionResolver::default()
    }

    fn padded_viewport() -> Rect {
        // 4% of 1000 horizontally, 10px vertically
        Rect::from_edges(40.0, 10.0, VW - 40.0, VH - 10.0)
    }

    fn resolve(trigger: Rect, content: Size) -> ResolvedPosition {
        resolver().resolve(&PositionRequest::follow(
            trigger,
            content,
            Viewport::new(VW, VH),
        ))
    }

    #[test]
    fn centres_below_trigger_when_there_is_room() {
        let pos = resolve(
            Rect::new(450.0, 100.0, 100.0, 150.0),
            Size::new(300.0, 200.0),
        );
        assert_eq!(pos.left, 350.0);
        assert_eq!(pos.top, 258.0);
        assert_eq!(pos.transform_origin, TransformOrigin::Center);
    }

    #[test]
    fn flips_above_when_below_overflows() {
        let pos = resolve(
            Rect::new(450.0, 500.0, 100.0, 150.0),
            Size::new(300.0, 200.0),
        );
        assert_eq!(pos.top, 500.0 - 200.0 - 8.0);
    }

    #[test]
    fn pins_to_top_padding_when_neither_side_fits() {
        let pos = resolve(
            Rect::new(450.0, 200.0, 100.0, 400.0),
            Size::new(300.0, 300.0),
        );
        assert_eq!(pos.top, 10.0);
    }

    #[test]
    fn clamps_against_left_and_right_padding() {
        let left = resolve(
            Rect::new(0.0, 100.0, 100.0, 100.0),
            Size::new(300.0, 100.0),
        );
        assert_eq!(left.left, 40.0);

        let right = resolve(

            Rect::new(900.0, 100.0, 100.0, 100.0),

            Size::new(300.0, 100.0),

        );
        assert_eq!(right.left, VW - 40.0 - 300.0);
    }

    #[test]
    fn oversized_content_butts_against_left_padding() {
        let pos = resolve(
            Rect::new(600.0, 100.0, 100.0, 100.0),
            Size::new(990.0, 100.0),
        );
        assert_eq!(pos.left, 40.0);
    }

    #[test]
    fn edge_flags() {
        let left = resolve(
            Rect::new(0.0, 100.0, 120.0, 100.0),
            Size::new(100.0, 100.0),
        );
        assert!(left.near_left_edge);
        assert!(!left.near_right_edge);
        assert_eq!(left.transform_origin.as_css(), "left center");

        let right = resolve(

            Rect::new(880.0, 100.0, 120.0, 100.0),

            Size::new(100.0, 100.0),

        );
        assert!(right.near_right_edge);
        assert!(!right.near_left_edge);
        assert_eq!(right.transform_origin.as_css(), "right center");

        let middle = resolve(

            Rect::new(450.0, 100.0, 100.0, 100.0),

            Size::new(100.0, 100.0),

        );
        assert!(!middle.near_left_edge);
        assert!(!middle.near_right_edge);
        assert_eq!(middle.transform_origin.to_string(), "center center");
    }

    #[test]
    fn contained_whenever_content_fits() {
        let padded = padded_viewport();
        let contents = [
            Size::new(10.0, 10.0),
            Size::new(300.0, 200.0),
            Size::new(920.0, 780.0),
        ];
        let mut x = -150.0;
        while x <= VW + 150.0 {
            let mut y = -150.0;
            while y <= VH + 150.0 {
                for content in contents {
                    let trigger = Rect::new(x, y, 180.0, 100.0);
                    let pos = resolve(trigger, content);
                    let placed = Rect::new(
                        pos.left,
                        pos.top,
                        content.width,
                        content.height,
                    );
                    assert!(
                        padded.contains(&placed),
                        "trigger={trigger:?} content={content:?} \
                         placed={placed:?}"
                    );
                }
                y += 37.0;
            }
            x += 41.0;
        }
    }

    #[test]
    fn garbage_input_never_panics() {
        let nasty = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -1.0e9, 0.0];
        for a in nasty {
            for b in nasty {
                let request = PositionRequest::follow(
                    Rect::new(a, b, a, b),
                    Size::new(b, a),
                    Viewport::new(a, b).with_scroll(a, b),
                );
                let pos = resolver().resolve(&request);
                assert!(pos.left.is_finite());
                assert!(pos.top.is_finite());
            }
        }
    }

    #[test]
    fn center_strategy_ignores_trigger() {
        let request = PositionRequest::follow(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Size::new(200.0, 100.0),
            Viewport::new(VW, VH),
        )
        .with_strategy(Strategy::Center);
        let pos = resolver().resolve(&request);
        assert_eq!((pos.left, pos.top), (400.0, 350.0));
    }

    #[test]
    fn top_and_bottom_strategies_pin_vertically() {
        let base = PositionRequest::follow(
            Rect::new(450.0, 300.0, 100.0, 100.0),
            Size::new(200.0, 100.0),
            Viewport::new(VW, VH),
        );
        let top =
            resolver().resolve(&base.clone().with_strategy(Strategy::Top));
        assert_eq!((top.left, top.top), (400.0, 10.0));

        let bottom = resolver().resolve(&base.with_strategy(Strategy::Bottom));
        assert_eq!((bottom.left, bottom.top), (400.0, VH - 10.0 - 100.0));
    }

    #[test]
    fn custom_anchor_is_still_clamped() {
        let request = PositionRequest::follow(
            Rect::new(450.0, 300.0, 100.0, 100.0),
            Size::new(200.0, 100.0),
            Viewport::new(VW, VH),
        )
        .with_strategy(Strategy::Custom(Arc::new(|req: &PositionRequest| {
            (req.trigger.right() + 5000.0, f32::NAN)
        })));
        let pos = resolver().resolve(&request);
        assert_eq!(pos.left, VW - 40.0 - 200.0);
        assert_eq!(pos.top, 10.0);
    }

    #[test]
    fn output_is_in_document_coordinates() {
        let request = PositionRequest::follow(
            Rect::new(450.0, 100.0, 100.0, 150.0),
            Size::new(300.0, 200.0),
            Viewport::new(VW, VH).with_scroll(0.0, 1200.0),
        );
        let pos = resolver().resolve(&request);
        assert_eq!(pos.top, 1200.0 + 258.0);
    }

    #[test]
    fn settings_come_from_ui_config() {
        let mut ui = UiConfig::default();
        ui.edge_threshold = 10.0;
        let resolver = PositionResolver::new(ResolverSettings::from(&ui));
        let pos = resolver.resolve(&PositionRequest::follow(
            Rect::new(50.0, 100.0, 100.0, 100.0),
            Size::new(100.0, 100.0),
            Viewport::new(VW, VH),
        ));
        assert!(!pos.near_left_edge);
    }
}
