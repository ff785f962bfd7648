//! Converts host frame time into the round's three independent timers.
//!
//! The agent, the pursuers and the one-second countdown each run on their own period. [`Cadence`] hands out
//! due timers one at a time, in chronological order, so the round can run each handler to completion before
//! the next one fires. Timers that come due at the same instant fire agent first, then countdown, then
//! pursuers.

use std::time::Duration;

use crate::config::CadenceConfig;

/// Shortest accepted period; keeps a misconfigured zero period from spinning forever.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One of the round's periodic handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Agent,
    Countdown,
    Pursuer,
}

impl TimerKind {
    /// Firing order for timers due at the same instant.
    pub const ORDER: [TimerKind; 3] = [TimerKind::Agent, TimerKind::Countdown, TimerKind::Pursuer];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    period: Duration,
    elapsed: Duration,
}

impl Timer {
    fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            elapsed: Duration::ZERO,
        }
    }

    fn until_due(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }
}

/// Accumulates host time for the agent, countdown and pursuer timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    timers: [Timer; 3],
}

impl Cadence {
    pub fn new(config: &CadenceConfig) -> Self {
        Self {
            timers: [
                Timer::new(config.agent_period()),
                Timer::new(config.countdown_period()),
                Timer::new(config.pursuer_period()),
            ],
        }
    }

    /// Consumes time from `budget` up to the next due timer and returns it.
    ///
    /// Returns `None` once the budget runs out before anything else comes due; the leftover time stays
    /// accumulated for the next call.
    pub fn next_due(&mut self, budget: &mut Duration) -> Option<TimerKind> {
        // Anything already due fires before more time passes
        if let Some(index) = self.timers.iter().position(|timer| timer.until_due().is_zero()) {
            self.timers[index].elapsed -= self.timers[index].period;
            return Some(TimerKind::ORDER[index]);
        }

        let step = self.timers.iter().map(Timer::until_due).min().unwrap_or(Duration::MAX);
        if step > *budget {
            for timer in &mut self.timers {
                timer.elapsed += *budget;
            }
            *budget = Duration::ZERO;
            return None;
        }

        for timer in &mut self.timers {
            timer.elapsed += step;
        }
        *budget -= step;
        self.next_due(budget)
    }

    /// Time accumulated toward the next firing of a timer.
    pub fn elapsed(&self, kind: TimerKind) -> Duration {
        self.timers[Self::slot(kind)].elapsed
    }

    /// Clears all accumulated time.
    pub fn reset(&mut self) {
        for timer in &mut self.timers {
            timer.elapsed = Duration::ZERO;
        }
    }

    fn slot(kind: TimerKind) -> usize {
        match kind {
            TimerKind::Agent => 0,
            TimerKind::Countdown => 1,
            TimerKind::Pursuer => 2,
        }
    }
}
