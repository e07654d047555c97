//! Hover intent for preview pop-ups
//!
//! A preview opens only after the pointer has rested on a trigger for the
//! open delay, and closes a little after the pointer leaves so it can travel
//! from the card into the pop-up. Each trigger has at most one pending open;
//! re-entering before the delay elapses restarts it.
//!
//! Decisions are delivered as [`HoverEvent`]s on the channel returned from
//! [`HoverIntent::new`], which keeps the timer callbacks free of UI state.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use marquee_config::UiConfig;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::timer::TimerGroup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent<K> {
    Open(K),
    Close(K),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverDelays {
    pub open: Duration,
    pub close: Duration,
}

impl From<&UiConfig> for HoverDelays {
    fn from(ui: &UiConfig) -> Self {
        Self {
            open: ui.hover_open_delay,
            close: ui.hover_close_delay,
        }
    }
}

impl Default for HoverDelays {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

#[derive(Debug)]
struct HoverState<K> {
    /// Bumped on every enter/leave so a callback armed before the latest
    /// pointer event can tell it is stale.
    epochs: HashMap<K, u64>,
    open: HashSet<K>,
}

impl<K: Eq + Hash + Clone> HoverState<K> {
    fn bump(&mut self, key: &K) -> u64 {
        let epoch = self.epochs.entry(key.clone()).or_insert(0);
        *epoch += 1;
        *epoch
    }

    fn is_current(&self, key: &K, epoch: u64) -> bool {
        self.epochs.get(key) == Some(&epoch)
    }
}

#[derive(Debug)]
pub struct HoverIntent<K> {
    delays: HoverDelays,
    state: Arc<Mutex<HoverState<K>>>,
    open_timers: TimerGroup<K>,
    close_timers: TimerGroup<K>,
    events: mpsc::UnboundedSender<HoverEvent<K>>,
}

impl<K> HoverIntent<K>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
{
    pub fn new(
        runtime: Handle,
        delays: HoverDelays,
    ) -> (Self, mpsc::UnboundedReceiver<HoverEvent<K>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let intent = Self {
            delays,
            state: Arc::new(Mutex::new(HoverState {
                epochs: HashMap::new(),
                open: HashSet::new(),
            })),
            open_timers: TimerGroup::new(runtime.clone()),
            close_timers: TimerGroup::new(runtime),
            events: tx,
        };
        (intent, rx)
    }

    /// Pointer (or focus) entered `key`.
    pub fn enter(&mut self, key: K) {
        self.close_timers.cancel(&key);
        let epoch = {
            let mut state = self.state.lock();
            let epoch = state.bump(&key);
            if state.open.contains(&key) {
                trace!(?key, "re-entered open preview");
                return;
            }
            epoch
        };

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let target = key.clone();
        self.open_timers.arm(key, self.delays.open, move || {
            let mut state = state.lock();
            if state.is_current(&target, epoch) {
                state.open.insert(target.clone());
                debug!(key = ?target, "opening preview");
                let _ = events.send(HoverEvent::Open(target));
            }
        });
    }

    /// Pointer (or focus) left `key`.
    pub fn leave(&mut self, key: K) {
        self.open_timers.cancel(&key);
        let epoch = {
            let mut state = self.state.lock();
            if !state.open.contains(&key) {
                // Nothing open and the pending open is gone: stop tracking.
                state.epochs.remove(&key);
                return;
            }
            state.bump(&key)
        };

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let target = key.clone();
        self.close_timers.arm(key, self.delays.close, move || {
            let mut state = state.lock();
            if state.is_current(&target, epoch) && state.open.remove(&target) {
                state.epochs.remove(&target);
                debug!(key = ?target, "closing preview");
                let _ = events.send(HoverEvent::Close(target));
            }
        });
    }

    pub fn is_open(&self, key: &K) -> bool {
        self.state.lock().open.contains(key)
    }

    pub fn is_pending_open(&self, key: &K) -> bool {
        self.open_timers.is_armed(key)
    }

    /// Cancel every pending open and close and forget open previews. The
    /// intent starts from scratch afterwards, so a host that shows the page
    /// again can keep using it.
    pub fn teardown(&mut self) {
        self.open_timers.cancel_all();
        self.close_timers.cancel_all();
        let mut state = self.state.lock();
        state.epochs.clear();
        state.open.clear();
    }

    /// Triggers with an open preview or a pending decision.
    pub fn tracked_count(&self) -> usize {
        let state = self.state.lock();
        state.epochs.len().max(state.open.len())
    }
}
