//! The repeating scatter/chase schedule.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use tracing::debug;

/// The two default pursuer behaviors a schedule alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PhaseMode {
    Scatter,
    Chase,
}

/// One step of a schedule: a mode held for `duration` countdown periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub mode: PhaseMode,
    pub duration: u32,
}

impl PhaseEntry {
    pub const fn new(mode: PhaseMode, duration: u32) -> Self {
        Self { mode, duration }
    }
}

/// The default schedule: scatter 7, chase 20, scatter 7, chase 20, then repeat.
pub fn default_schedule() -> Vec<PhaseEntry> {
    vec![
        PhaseEntry::new(PhaseMode::Scatter, 7),
        PhaseEntry::new(PhaseMode::Chase, 20),
        PhaseEntry::new(PhaseMode::Scatter, 7),
        PhaseEntry::new(PhaseMode::Chase, 20),
    ]
}

/// Cycles through a fixed schedule, one countdown period at a time.
///
/// The schedule must be non-empty with non-zero durations;
/// [`crate::config::RoundConfig::validate`] enforces that before a round is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseScheduler {
    entries: Vec<PhaseEntry>,
    index: usize,
    remaining: u32,
}

impl PhaseScheduler {
    pub fn new(entries: Vec<PhaseEntry>) -> Self {
        debug_assert!(!entries.is_empty(), "phase schedule must not be empty");
        let remaining = entries.first().map_or(0, |entry| entry.duration);
        Self {
            entries,
            index: 0,
            remaining,
        }
    }

    /// The mode of the active entry.
    pub fn current_mode(&self) -> PhaseMode {
        self.entries.get(self.index).map_or(PhaseMode::Scatter, |entry| entry.mode)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Countdown periods left in the active entry.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn entries(&self) -> &[PhaseEntry] {
        &self.entries
    }

    /// Counts down one period. When the active entry runs out, advances to the next one (wrapping around)
    /// and returns its mode so it can be broadcast.
    pub fn countdown(&mut self) -> Option<PhaseMode> {
        if self.entries.is_empty() {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        self.index = (self.index + 1) % self.entries.len();
        let entry = self.entries[self.index];
        self.remaining = entry.duration;
        debug!(index = self.index, mode = %entry.mode, duration = entry.duration, "Phase rolled over");
        Some(entry.mode)
    }

    /// Returns to the first entry with its full duration.
    pub fn reset(&mut self) {
        self.index = 0;
        self.remaining = self.entries.first().map_or(0, |entry| entry.duration);
    }
}
