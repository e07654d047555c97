//! Viewport-space geometry used by the pop-up positioning code.
//!
//! Values arrive straight from layout measurements, so every type offers a
//! `sanitized` form that coerces NaN, infinities and negative extents to
//! zero instead of trusting the caller.

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a rect from its four edges, as a bounding client rect reports
    /// them.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Position may be negative (partially scrolled off), extents may not.
    pub fn sanitized(&self) -> Self {
        Self {
            left: finite_or_zero(self.left),
            top: finite_or_zero(self.top),
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }

    /// True when `other` lies entirely within this rect.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn sanitized(&self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

/// Visible browser window plus how far the document is scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_x: f32, scroll_y: f32) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    pub fn sanitized(&self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
            scroll_x: non_negative(self.scroll_x),
            scroll_y: non_negative(self.scroll_y),
        }
    }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[inline]
fn non_negative(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_coerces_garbage() {
        let r = Rect::new(f32::NAN, -20.0, -5.0, f32::INFINITY).sanitized();
        assert_eq!(r, Rect::new(0.0, -20.0, 0.0, 0.0));

        let s = Size::new(f32::NEG_INFINITY, 12.0).sanitized();
        assert_eq!(s, Size::new(0.0, 12.0));
    }

    #[test]
    fn edges_and_centers() {
        let r = Rect::from_edges(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center_x(), 60.0);
        assert_eq!(r.center_y(), 45.0);
    }

    #[test]
    fn containment_is_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(!outer.contains(&Rect::new(1.0, 0.0, 100.0, 100.0)));
    }
}
