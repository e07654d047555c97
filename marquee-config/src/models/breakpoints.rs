//! Viewport width to items-per-page lookup.

use crate::constants::{DEFAULT_BREAKPOINTS, DEFAULT_WIDE_ITEMS};

/// One row of the table: widths up to and including `max_width` show
/// `items` cards per page.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Breakpoint {
    pub max_width: f32,
    pub items: usize,
}

/// Ordered breakpoint table plus the count used beyond the widest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointPolicy {
    breakpoints: Vec<Breakpoint>,
    fallback: usize,
}

impl Default for BreakpointPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_BREAKPOINTS
                .iter()
                .map(|&(max_width, items)| Breakpoint { max_width, items })
                .collect(),
            DEFAULT_WIDE_ITEMS,
        )
    }
}

impl BreakpointPolicy {
    /// Entries are sorted by width; non-finite widths are dropped. Zero item
    /// counts are kept here and reported by validation.
    pub fn new(mut breakpoints: Vec<Breakpoint>, fallback: usize) -> Self {
        breakpoints.retain(|b| b.max_width.is_finite());
        breakpoints.sort_by(|a, b| a.max_width.total_cmp(&b.max_width));
        Self {
            breakpoints,
            fallback,
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn fallback(&self) -> usize {
        self.fallback
    }

    /// Items per page for a viewport width. Garbage widths (NaN, negative)
    /// resolve to the narrowest entry. Never returns zero.
    pub fn resolve_items_per_page(&self, viewport_width: f32) -> usize {
        let width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            0.0
        };
        self.breakpoints
            .iter()
            .find(|b| width <= b.max_width)
            .map(|b| b.items)
            .unwrap_or(self.fallback)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let policy = BreakpointPolicy::default();
        assert_eq!(policy.resolve_items_per_page(320.0), 2);
        assert_eq!(policy.resolve_items_per_page(500.0), 2);
        assert_eq!(policy.resolve_items_per_page(501.0), 3);
        assert_eq!(policy.resolve_items_per_page(1024.0), 4);
        assert_eq!(policy.resolve_items_per_page(1400.0), 5);
        assert_eq!(policy.resolve_items_per_page(1920.0), 6);
    }

    #[test]
    fn garbage_width_uses_narrowest_entry() {
        let policy = BreakpointPolicy::default();
        assert_eq!(policy.resolve_items_per_page(f32::NAN), 2);
        assert_eq!(policy.resolve_items_per_page(-40.0), 2);
    }

    #[test]
    fn unsorted_input_is_ordered() {
        let policy = BreakpointPolicy::new(
            vec![
                Breakpoint { max_width: 900.0, items: 4 },
                Breakpoint { max_width: 300.0, items: 1 },
            ],
            7,
        );
        assert_eq!(policy.resolve_items_per_page(200.0), 1);
        assert_eq!(policy.resolve_items_per_page(600.0), 4);
        assert_eq!(policy.resolve_items_per_page(901.0), 7);
    }

    #[test]
    fn zero_counts_never_escape() {
        let table = vec![Breakpoint {
            max_width: 100.0,
            items: 0,
        }];
        let policy = BreakpointPolicy::new(table, 0);
        assert_eq!(policy.resolve_items_per_page(50.0), 1);
        assert_eq!(policy.resolve_items_per_page(5000.0), 1);
    }
}
