//! Round configuration.
//!
//! Every tunable of a round lives here, with defaults taken from [`crate::constants`]. Hosts can override
//! any field from the environment with [`RoundConfig::from_env`].

use std::time::Duration;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::{self, scoring, targeting, timing};
use crate::error::ConfigError;
use crate::game::phase::{default_schedule, PhaseEntry};
use crate::game::pursuer::Role;
use crate::map::direction::Direction;
use crate::map::maze::{Cell, Maze};

/// Prefix for environment overrides, e.g. `CHASE_LIVES=5` or `CHASE_CADENCE__AGENT_MS=180`.
pub const ENV_PREFIX: &str = "CHASE_";

/// Points awarded by each scoring event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub pellet: u32,
    pub power_pellet: u32,
    pub pursuer_eaten: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            pellet: scoring::PELLET,
            power_pellet: scoring::POWER_PELLET,
            pursuer_eaten: scoring::PURSUER_EATEN,
        }
    }
}

/// Constants used by the per-role chase targeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targeting {
    pub ambush_lookahead: i32,
    pub flank_lookahead: i32,
    pub shy_distance: f32,
}

impl Default for Targeting {
    fn default() -> Self {
        Self {
            ambush_lookahead: targeting::AMBUSH_LOOKAHEAD,
            flank_lookahead: targeting::FLANK_LOOKAHEAD,
            shy_distance: targeting::SHY_DISTANCE,
        }
    }
}

/// Timer periods driving [`crate::game::clock::Cadence`], in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceConfig {
    pub agent_ms: u64,
    pub pursuer_ms: u64,
    pub countdown_ms: u64,
    pub respawn_delay_ms: u64,
}

impl CadenceConfig {
    pub fn agent_period(&self) -> Duration {
        Duration::from_millis(self.agent_ms)
    }

    pub fn pursuer_period(&self) -> Duration {
        Duration::from_millis(self.pursuer_ms)
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            agent_ms: timing::AGENT_PERIOD.as_millis() as u64,
            pursuer_ms: timing::PURSUER_PERIOD.as_millis() as u64,
            countdown_ms: timing::COUNTDOWN_PERIOD.as_millis() as u64,
            respawn_delay_ms: timing::RESPAWN_DELAY.as_millis() as u64,
        }
    }
}

/// What happens to the phase schedule when the agent respawns after a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespawnPolicy {
    /// The schedule keeps its position; pursuers come back in the current phase mode.
    #[default]
    KeepPhase,
    /// The schedule restarts from its first entry, so pursuers come back scattering.
    ResetToScatter,
}

/// Everything needed to set up and run a round on a given maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub agent_start: Cell,
    pub agent_facing: Direction,
    /// Start cells, indexed by [`Role::index`].
    pub pursuer_starts: [Cell; 4],
    /// Scatter corners, indexed by [`Role::index`].
    pub scatter_corners: [Cell; 4],
    /// Where eaten pursuers return to revive.
    pub home: Cell,
    pub schedule: Vec<PhaseEntry>,
    /// Fright length, in countdown periods.
    pub fright_duration: u32,
    pub lives: u8,
    pub scores: ScoreTable,
    pub targeting: Targeting,
    pub cadence: CadenceConfig,
    pub respawn_policy: RespawnPolicy,
    /// When set, pursuers path around cells occupied by other pursuers.
    pub avoid_overlap: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            agent_start: constants::AGENT_START,
            agent_facing: Direction::Left,
            pursuer_starts: constants::PURSUER_STARTS,
            scatter_corners: constants::SCATTER_CORNERS,
            home: constants::PURSUER_HOME,
            schedule: default_schedule(),
            fright_duration: timing::FRIGHT_DURATION,
            lives: constants::STARTING_LIVES,
            scores: ScoreTable::default(),
            targeting: Targeting::default(),
            cadence: CadenceConfig::default(),
            respawn_policy: RespawnPolicy::default(),
            avoid_overlap: true,
        }
    }
}

impl RoundConfig {
    /// Loads the defaults, overridden by `CHASE_`-prefixed environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered configuration source used by [`RoundConfig::from_env`].
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(RoundConfig::default())).merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn pursuer_start(&self, role: Role) -> Cell {
        self.pursuer_starts[role.index()]
    }

    pub fn scatter_corner(&self, role: Role) -> Cell {
        self.scatter_corners[role.index()]
    }

    /// Checks the configuration against the maze it will run on.
    pub fn validate(&self, maze: &Maze) -> Result<(), ConfigError> {
        let require = |what: &'static str, cell: Cell| {
            if maze.is_traversable(cell) {
                Ok(())
            } else {
                Err(ConfigError::BlockedCell { what, cell })
            }
        };

        require("Agent start", self.agent_start)?;
        require("Home", self.home)?;
        for cell in self.pursuer_starts {
            require("Pursuer start", cell)?;
        }
        for cell in self.scatter_corners {
            require("Scatter corner", cell)?;
        }

        if self.schedule.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }
        if let Some(index) = self.schedule.iter().position(|entry| entry.duration == 0) {
            return Err(ConfigError::ZeroDuration(index));
        }

        for (name, period) in [
            ("Agent", self.cadence.agent_ms),
            ("Pursuer", self.cadence.pursuer_ms),
            ("Countdown", self.cadence.countdown_ms),
        ] {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod(name));
            }
        }

        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }

        Ok(())
    }
}
