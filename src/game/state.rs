use std::time::Duration;

use strum_macros::AsRefStr;

use crate::game::phase::{PhaseEntry, PhaseScheduler};

/// The overall stage of a round from the host's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RoundStatus {
    /// Built but `start_round` has not been called yet.
    Ready,
    Playing,
    /// Frozen after a capture; the agent and pursuers return to their start cells when `remaining` runs out.
    Respawning { remaining: Duration },
    /// Lives exhausted. Terminal until the next `start_round`.
    GameOver { final_score: u32 },
    /// The host is done with the round; nothing mutates it anymore.
    TornDown,
}

/// Score, lives and timers shared by every rule of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub score: u32,
    pub lives: u8,
    pub phases: PhaseScheduler,
    /// Countdown periods of fright left; zero when no fright is active.
    pub fright_remaining: u32,
    pub status: RoundStatus,
    /// Host pause flag. Gates every handler without touching any timer.
    pub paused: bool,
    /// Simulation steps taken since the round started.
    pub ticks: u64,
}

impl RoundState {
    pub fn new(lives: u8, schedule: Vec<PhaseEntry>) -> Self {
        Self {
            score: 0,
            lives,
            phases: PhaseScheduler::new(schedule),
            fright_remaining: 0,
            status: RoundStatus::Ready,
            paused: false,
            ticks: 0,
        }
    }

    /// Returns true if movement and countdown handlers may run.
    pub fn is_running(&self) -> bool {
        self.status == RoundStatus::Playing && !self.paused
    }

    pub fn is_fright_active(&self) -> bool {
        self.fright_remaining > 0
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Takes away a life. Returns true if any remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }

    /// Counts the fright timer down one period. Returns true on the period it expires.
    pub fn countdown_fright(&mut self) -> bool {
        if self.fright_remaining == 0 {
            return false;
        }
        self.fright_remaining -= 1;
        self.fright_remaining == 0
    }

    /// Restores score, lives and schedule for a fresh round.
    pub fn restart(&mut self, lives: u8) {
        self.score = 0;
        self.lives = lives;
        self.phases.reset();
        self.fright_remaining = 0;
        self.status = RoundStatus::Playing;
        self.paused = false;
        self.ticks = 0;
    }
}
