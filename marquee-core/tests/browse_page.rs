//! Drives a row, its hover previews and pop-up placement together the way a
//! browse page does.

use std::time::Duration;

use marquee_core::hover::{HoverDelays, HoverEvent, HoverIntent};
use marquee_core::position::{
    PositionRequest, PositionResolver, TransformOrigin,
};
use marquee_core::model::CategoryKey;
use marquee_core::model::geometry::{Rect, Size, Viewport};
use marquee_core::row::{Row, RowSettings};
use tokio::runtime::Handle;

async fn advance(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn paging_a_row_visits_every_item_then_wraps() -> anyhow::Result<()> {
    let items: Vec<u32> = (0..7).collect();
    let settings = RowSettings::default();
    let mut row = Row::mount(CategoryKey::Trending, items, 700.0, settings)?;
    assert_eq!(row.view().visible, vec![0, 1, 2]);

    let mut pages = vec![row.view().visible];
    for _ in 0..3 {
        assert!(row.next());
        advance(750).await;
        pages.push(row.view().visible);
    }

    assert_eq!(
        pages,
        vec![vec![0, 1, 2], vec![3, 4, 5], vec![6], vec![0, 1, 2]]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn resize_mid_row_keeps_the_last_page_full() -> anyhow::Result<()> {
    let items: Vec<u32> = (0..10).collect();
    let settings = RowSettings::default();
    let mut row = Row::mount(CategoryKey::Trending, items, 1300.0, settings)?;
    assert_eq!(row.view().items_per_page, 5);
    row.next();
    advance(750).await;
    assert_eq!(row.view().current_index, 5);

    row.resize(1600.0);
    let view = row.view();
    assert_eq!(view.items_per_page, 6);
    assert_eq!(view.current_index, 4);
    assert_eq!(view.visible.len(), 6);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn hovered_card_at_the_edge_opens_a_contained_preview() {
    let (mut hover, mut events) =
        HoverIntent::new(Handle::current(), HoverDelays::default());
    let resolver = PositionResolver::default();
    let viewport = Viewport::new(1280.0, 720.0).with_scroll(0.0, 900.0);

    // Last card of a row, flush with the right edge.
    let trigger = Rect::new(1100.0, 500.0, 180.0, 100.0);
    hover.enter(42u64);
    advance(399).await;
    assert!(events.try_recv().is_err());
    advance(1).await;
    assert_eq!(events.try_recv().ok(), Some(HoverEvent::Open(42)));

    let position = resolver.resolve(&PositionRequest::follow(
        trigger,
        Size::new(400.0, 300.0),
        viewport,
    ));
    assert_eq!(position.transform_origin, TransformOrigin::Right);
    assert!(position.near_right_edge);

    let left = position.left - viewport.scroll_x;
    let top = position.top - viewport.scroll_y;
    let h_pad = 1280.0 * 0.04;
    assert!(left >= h_pad && left + 400.0 <= 1280.0 - h_pad);
    assert!(top >= 10.0 && top + 300.0 <= 720.0 - 10.0);
    // No room below the card, so the preview flips above it.
    assert!(top + 300.0 <= trigger.top);

    hover.leave(42);
    advance(150).await;
    assert_eq!(events.try_recv().ok(), Some(HoverEvent::Close(42)));
}
