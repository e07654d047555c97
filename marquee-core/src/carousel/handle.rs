//! Shared, observable wrapper around a [`CarouselEngine`].
//!
//! The engine itself is a plain value. UI bindings that need to react to
//! changes hold a [`CarouselHandle`] clone or a `watch` receiver from
//! [`CarouselHandle::subscribe`]; every accepted mutation publishes a fresh
//! [`CarouselView`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::engine::CarouselEngine;
use super::types::CarouselView;

#[derive(Debug)]
pub struct CarouselHandle<T> {
    engine: Arc<Mutex<CarouselEngine<T>>>,
    tx: Arc<watch::Sender<CarouselView<T>>>,
}

impl<T> Clone for CarouselHandle<T> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> CarouselHandle<T> {
    pub fn new(engine: CarouselEngine<T>) -> Self {
        let (tx, _rx) = watch::channel(engine.snapshot());
        Self {
            engine: Arc::new(Mutex::new(engine)),
            tx: Arc::new(tx),
        }
    }

    /// Receiver that sees the current view immediately and every later one.
    pub fn subscribe(&self) -> watch::Receiver<CarouselView<T>> {
        self.tx.subscribe()
    }

    /// Latest published view.
    pub fn view(&self) -> CarouselView<T> {
        self.tx.borrow().clone()
    }

    pub fn move_next(&self) -> bool {
        self.mutate(|engine| engine.move_next())
    }

    pub fn move_prev(&self) -> bool {
        self.mutate(|engine| engine.move_prev())
    }

    pub fn settle_transition(&self) -> bool {
        self.mutate(|engine| engine.settle_transition())
    }

    pub fn update_items_to_display(&self, count: usize) {
        self.mutate(|engine| {
            let before = (engine.items_per_page(), engine.current_index());
            engine.update_items_to_display(count);
            before != (engine.items_per_page(), engine.current_index())
        });
    }

    pub fn set_items(&self, items: Vec<T>) {
        self.mutate(|engine| {
            engine.set_items(items);
            true
        });
    }

    pub fn items_per_page(&self) -> usize {
        self.engine.lock().items_per_page()
    }

    pub fn is_transitioning(&self) -> bool {
        self.engine.lock().is_transitioning()
    }

    /// Run `f` against the engine; publishes when it reports a change.
    /// Publishing happens under the lock so subscribers observe views in
    /// mutation order.
    fn mutate(&self, f: impl FnOnce(&mut CarouselEngine<T>) -> bool) -> bool {
        let mut engine = self.engine.lock();
        let changed = f(&mut engine);
        if changed {
            self.tx.send_replace(engine.snapshot());
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_moves_publish_and_dropped_moves_do_not() {
        let engine = CarouselEngine::new(vec![1, 2, 3, 4, 5], 2);
        let handle = CarouselHandle::new(engine);
        let mut rx = handle.subscribe();
        assert!(!rx.has_changed().expect("sender alive"));

        assert!(handle.move_next());
        assert!(rx.has_changed().expect("sender alive"));
        let view = rx.borrow_and_update().clone();
        assert_eq!(view.visible, vec![3, 4]);
        assert!(view.is_transitioning);

        assert!(!handle.move_next());
        assert!(!rx.has_changed().expect("sender alive"));

        assert!(handle.settle_transition());
        assert!(!rx.borrow_and_update().is_transitioning);
        assert!(!handle.settle_transition());
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[test]
    fn clones_share_state() {
        let a = CarouselHandle::new(CarouselEngine::new(vec!['x'; 9], 3));
        let b = a.clone();
        a.move_next();
        assert!(b.is_transitioning());
        assert_eq!(b.view().current_index, 3);
    }

    #[test]
    fn unchanged_page_size_does_not_publish() {
        let handle = CarouselHandle::new(CarouselEngine::new(vec![0u8; 8], 4));
        let mut rx = handle.subscribe();
        handle.update_items_to_display(4);
        assert!(!rx.has_changed().expect("sender alive"));
        handle.update_items_to_display(2);
        assert_eq!(rx.borrow_and_update().pagination_indicator_count, 4);
    }
}
