//! Sharing a round between threads.
//!
//! A round is single-threaded: every handler assumes it has the state to itself. Hosts that drive the
//! timers or feed input from several threads wrap the round in a [`SharedRound`], which serializes every
//! call behind one lock.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::game::events::RoundEvent;
use crate::game::snapshot::Snapshot;
use crate::game::Round;
use crate::map::direction::Direction;

/// A cloneable handle to a round behind a mutex.
pub struct SharedRound<R = SmallRng> {
    inner: Arc<Mutex<Round<R>>>,
}

impl<R> Clone for SharedRound<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedRound<R> {
    pub fn new(round: Round<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(round)),
        }
    }

    /// Locks the round for a sequence of calls that must not interleave with other threads.
    pub fn lock(&self) -> MutexGuard<'_, Round<R>> {
        self.inner.lock()
    }

    pub fn tick(&self, dt: Duration) {
        self.inner.lock().tick(dt);
    }

    pub fn agent_tick(&self) {
        self.inner.lock().agent_tick();
    }

    pub fn pursuer_tick(&self) {
        self.inner.lock().pursuer_tick();
    }

    pub fn countdown_tick(&self) {
        self.inner.lock().countdown_tick();
    }

    pub fn queue_direction(&self, direction: Direction) {
        self.inner.lock().queue_direction(direction);
    }

    pub fn start_round(&self) {
        self.inner.lock().start_round();
    }

    pub fn pause(&self) {
        self.inner.lock().pause();
    }

    pub fn resume(&self) {
        self.inner.lock().resume();
    }

    pub fn teardown(&self) {
        self.inner.lock().teardown();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    pub fn drain_events(&self) -> Vec<RoundEvent> {
        self.inner.lock().drain_events()
    }
}
