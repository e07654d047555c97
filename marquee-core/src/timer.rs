//! Cancellable one-shot timers
//!
//! Every "wait, unless the opposite event happens first" in the UI goes
//! through [`Timer`]: hover-intent delays, close delays, and the settle
//! signal after a carousel animation. A timer owns at most one pending
//! callback. Re-arming replaces it, cancelling revokes it, and dropping the
//! owner cancels it, so nothing fires against state that has been torn down.
//!
//! Cancellation is exact: each arm bumps a generation counter, and the
//! spawned task only runs its callback if the generation it was armed with
//! is still current. The check and the callback run under the same lock
//! that `cancel` takes, so once `cancel` returns the callback has either
//! finished already or will never run. Callbacks therefore must not call
//! back into their own timer.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Timer {
    runtime: Handle,
    generation: Arc<Mutex<u64>>,
    task: Option<JoinHandle<()>>,
}

impl Timer {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            generation: Arc::new(Mutex::new(0)),
            task: None,
        }
    }

    /// Timer bound to the runtime of the calling context.
    pub fn current() -> crate::Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }

    /// Schedule `callback` after `delay`, replacing any pending callback.
    pub fn arm<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let armed_generation = self.revoke();
        let generation = Arc::clone(&self.generation);
        self.task = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut current = generation.lock();
            if *current == armed_generation {
                // Consume the generation so the callback is fire-once.
                *current += 1;
                callback();
            }
        }));
    }

    /// Revoke the pending callback, if any.
    pub fn cancel(&mut self) {
        self.revoke();
    }

    /// True while a callback is scheduled and has neither fired nor been
    /// cancelled.
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Invalidates outstanding work and returns the new generation.
    fn revoke(&mut self) -> u64 {
        let next = {
            let mut current = self.generation.lock();
            *current += 1;
            *current
        };
        if let Some(task) = self.task.take() {
            task.abort();
        }
        next
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Keyed timers with a single teardown operation.
#[derive(Debug)]
pub struct TimerGroup<K> {
    runtime: Handle,
    timers: HashMap<K, Timer>,
}

impl<K: Eq + Hash> TimerGroup<K> {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            timers: HashMap::new(),
        }
    }

    pub fn current() -> crate::Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }

    /// Arm the timer for `key`, resetting it if it was already armed.
    pub fn arm<F>(&mut self, key: K, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Drop timers that already fired so the map does not grow with
        // every trigger the pointer has ever crossed.
        self.timers.retain(|_, timer| timer.is_armed());
        let runtime = self.runtime.clone();
        self.timers
            .entry(key)
            .or_insert_with(|| Timer::new(runtime))
            .arm(delay, callback);
    }

    pub fn cancel(&mut self, key: &K) {
        if let Some(mut timer) = self.timers.remove(key) {
            timer.cancel();
        }
    }

    pub fn is_armed(&self, key: &K) -> bool {
        self.timers.get(key).is_some_and(Timer::is_armed)
    }

    pub fn armed_count(&self) -> usize {
        self.timers.values().filter(|t| t.is_armed()).count()
    }

    /// Cancel every outstanding timer. Used when the owner is torn down.
    pub fn cancel_all(&mut self) {
        for (_, mut timer) in self.timers.drain() {
            timer.cancel();
        }
    }
}
