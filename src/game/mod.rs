//! The round controller: one agent, four pursuers and a maze full of pellets.
//!
//! [`Round`] owns every piece of round state and exposes two ways of driving it. [`Round::step`] runs one
//! whole discrete tick (agent, countdown, pursuers, collisions). [`Round::tick`] takes host frame time and
//! fires the agent, countdown and pursuer handlers on their own cadences. Either way each handler runs to
//! completion before the next one starts.

use std::time::Duration;

use circular_buffer::CircularBuffer;
use rand::rngs::SmallRng;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use crate::config::{RespawnPolicy, RoundConfig};
use crate::constants::EVENT_BUFFER_CAPACITY;
use crate::error::GameResult;
use crate::formatter;
use crate::map::direction::Direction;
use crate::map::maze::{Cell, Maze};

use self::agent::Agent;
use self::clock::{Cadence, TimerKind};
use self::events::RoundEvent;
use self::ledger::PelletLedger;
use self::pursuer::{Advance, Pursuer, PursuerMode, Role, TargetContext};
use self::snapshot::{PursuerView, Snapshot};
use self::state::{RoundState, RoundStatus};

pub mod agent;
pub mod clock;
pub mod events;
pub mod ledger;
pub mod phase;
pub mod pursuer;
pub mod snapshot;
pub mod state;

/// A single round of the chase, from `start_round` until the lives run out or the host tears it down.
pub struct Round<R = SmallRng> {
    maze: Maze,
    config: RoundConfig,
    state: RoundState,
    agent: Agent,
    pursuers: SmallVec<[Pursuer; 4]>,
    ledger: PelletLedger,
    cadence: Cadence,
    events: CircularBuffer<EVENT_BUFFER_CAPACITY, RoundEvent>,
    rng: R,
}

impl<R: Rng> Round<R> {
    /// Builds a round on `maze`, ready for [`Round::start_round`].
    ///
    /// `rng` drives frightened movement; pass a seeded generator for reproducible rounds.
    pub fn new(maze: Maze, config: RoundConfig, rng: R) -> GameResult<Self> {
        config.validate(&maze)?;

        let state = RoundState::new(config.lives, config.schedule.clone());
        let phase = state.phases.current_mode();
        let pursuers = Role::ALL
            .iter()
            .map(|&role| Pursuer::new(role, config.pursuer_start(role), config.scatter_corner(role), phase.into()))
            .collect();
        let ledger = PelletLedger::from_maze(&maze);

        info!(
            rows = maze.rows(),
            cols = maze.cols(),
            pellets = ledger.total(),
            lives = config.lives,
            "Round created"
        );

        Ok(Self {
            agent: Agent::new(config.agent_start, config.agent_facing),
            cadence: Cadence::new(&config.cadence),
            events: CircularBuffer::new(),
            maze,
            config,
            state,
            pursuers,
            ledger,
            rng,
        })
    }

    /// Builds a round on the built-in maze with the default configuration.
    pub fn classic(rng: R) -> GameResult<Self> {
        Self::new(Maze::classic()?, RoundConfig::default(), rng)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    pub fn pursuer(&self, role: Role) -> Option<&Pursuer> {
        self.pursuers.iter().find(|pursuer| pursuer.role == role)
    }

    pub fn ledger(&self) -> &PelletLedger {
        &self.ledger
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    /// Resets everything and starts playing: full lives, zero score, every pellet restored.
    pub fn start_round(&mut self) {
        if self.state.status == RoundStatus::TornDown {
            warn!("Ignoring start_round on a torn-down round");
            return;
        }

        self.state.restart(self.config.lives);
        self.ledger.reset();
        self.agent.reset(self.config.agent_start, self.config.agent_facing);
        let phase = self.state.phases.current_mode();
        for pursuer in &mut self.pursuers {
            pursuer.reset(phase);
        }
        self.cadence.reset();
        self.events.clear();

        info!(lives = self.state.lives, pellets = self.ledger.total(), "Round started");
        self.push_event(RoundEvent::RoundStarted);
    }

    /// Freezes every handler. Timers keep whatever they had accumulated.
    pub fn pause(&mut self) {
        if self.state.status == RoundStatus::TornDown {
            warn!("Ignoring pause on a torn-down round");
            return;
        }
        if !self.state.paused {
            info!("Round paused");
            self.state.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.state.status == RoundStatus::TornDown {
            warn!("Ignoring resume on a torn-down round");
            return;
        }
        if self.state.paused {
            info!("Round resumed");
            self.state.paused = false;
        }
    }

    /// Ends the round for good. Every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.state.status != RoundStatus::TornDown {
            info!(score = self.state.score, "Round torn down");
            self.state.status = RoundStatus::TornDown;
        }
    }

    /// Queues the player's next turn. Honored on the first agent move where that direction is open.
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.state.status == RoundStatus::TornDown {
            return;
        }
        trace!(%direction, "Direction queued");
        self.agent.queue_direction(direction);
    }

    /// Runs one full discrete tick: agent, countdown, pursuers, then collisions.
    ///
    /// A step counts as one countdown period. While respawning, a step spends one countdown period of
    /// the respawn delay instead.
    pub fn step(&mut self) {
        if self.state.paused {
            return;
        }
        if matches!(self.state.status, RoundStatus::Respawning { .. }) {
            self.advance_respawn(self.config.cadence.countdown_period());
            return;
        }
        if !self.state.is_running() {
            return;
        }

        self.begin_tick();
        self.move_agent();
        self.run_countdown();
        let leader = self.leader();
        self.move_pursuers(leader);
        self.resolve_collisions();
    }

    /// Feeds host frame time into the round, firing each handler as its period comes due.
    ///
    /// Nothing accumulates while paused or after the round has ended. While respawning, the time goes to
    /// the respawn delay and any left over afterwards flows back into the handlers.
    pub fn tick(&mut self, dt: Duration) {
        if self.state.paused {
            return;
        }

        let mut budget = dt;
        loop {
            match self.state.status {
                RoundStatus::Playing => {
                    let Some(kind) = self.cadence.next_due(&mut budget) else {
                        break;
                    };
                    match kind {
                        TimerKind::Agent => self.agent_tick(),
                        TimerKind::Countdown => self.countdown_tick(),
                        TimerKind::Pursuer => self.pursuer_tick(),
                    }
                }
                RoundStatus::Respawning { remaining } => {
                    let spent = remaining.min(budget);
                    budget -= spent;
                    self.advance_respawn(spent);
                    if matches!(self.state.status, RoundStatus::Respawning { .. }) {
                        break;
                    }
                }
                RoundStatus::Ready | RoundStatus::GameOver { .. } | RoundStatus::TornDown => break,
            }
        }
    }

    /// Agent handler: moves the agent, eats whatever is under it and checks for pursuers.
    pub fn agent_tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.begin_tick();
        self.move_agent();
        self.resolve_collisions();
    }

    /// Pursuer handler: moves every pursuer one cell and checks for the agent.
    pub fn pursuer_tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let leader = self.leader();
        self.move_pursuers(leader);
        self.resolve_collisions();
    }

    /// Countdown handler: one period off the phase schedule and the fright timer.
    pub fn countdown_tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.run_countdown();
    }

    /// Copies out everything the host needs to draw the round.
    pub fn snapshot(&self) -> Snapshot {
        let final_score = match self.state.status {
            RoundStatus::GameOver { final_score } => Some(final_score),
            _ => None,
        };

        Snapshot {
            agent: self.agent.cell,
            facing: self.agent.facing,
            pursuers: self
                .pursuers
                .iter()
                .map(|pursuer| PursuerView {
                    role: pursuer.role,
                    cell: pursuer.cell,
                    mode: pursuer.mode,
                    color: pursuer.color(),
                })
                .collect(),
            pellets: self.ledger.remaining_cells().collect(),
            score: self.state.score,
            lives: self.state.lives,
            phase: self.state.phases.current_mode(),
            status: self.state.status,
            paused: self.state.paused,
            game_over: final_score.is_some(),
            final_score,
            maze_cleared: self.ledger.all_consumed(),
            fright_remaining: self.state.fright_remaining,
            ticks: self.state.ticks,
        }
    }

    /// Takes every event recorded since the last drain, oldest first.
    ///
    /// The buffer holds the most recent [`EVENT_BUFFER_CAPACITY`] events; older ones are dropped if the
    /// host does not drain in time.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        let drained = self.events.iter().copied().collect();
        self.events.clear();
        drained
    }

    fn push_event(&mut self, event: RoundEvent) {
        self.events.push_back(event);
    }

    fn begin_tick(&mut self) {
        self.state.ticks += 1;
        formatter::increment_tick();
    }

    /// Blinky's cell before anyone moves, used for Inky's reflection.
    fn leader(&self) -> Cell {
        self.pursuer(Role::Blinky).map_or(self.agent.cell, |blinky| blinky.cell)
    }

    fn move_agent(&mut self) {
        if !self.agent.advance(&self.maze) {
            return;
        }

        let cell = self.agent.cell;
        let Some(kind) = self.ledger.consume_if_present(cell) else {
            return;
        };

        let points = kind.score(&self.config.scores);
        self.state.award(points);
        trace!(%cell, kind = kind.as_ref(), points, score = self.state.score, "Pellet eaten");
        self.push_event(RoundEvent::PelletEaten { cell, kind, points });

        if kind.frightens() {
            self.trigger_fright();
        }

        if self.ledger.all_consumed() {
            info!(score = self.state.score, "Maze cleared");
            self.push_event(RoundEvent::MazeCleared {
                score: self.state.score,
            });
        }
    }

    /// Frightens every pursuer that is not eaten and (re)starts the fright timer.
    fn trigger_fright(&mut self) {
        let frightened = self.pursuers.iter_mut().map(|pursuer| pursuer.frighten()).filter(|&hit| hit).count();
        let duration = self.config.fright_duration;
        self.state.fright_remaining = duration;

        debug!(frightened, duration, "Fright started");
        self.push_event(RoundEvent::FrightStarted { frightened, duration });
    }

    fn run_countdown(&mut self) {
        if let Some(mode) = self.state.phases.countdown() {
            for pursuer in &mut self.pursuers {
                pursuer.apply_phase(mode);
            }
            self.push_event(RoundEvent::PhaseChanged {
                index: self.state.phases.index(),
                mode,
            });
        }

        if self.state.countdown_fright() {
            let mode = self.state.phases.current_mode();
            let calmed = self.pursuers.iter_mut().map(|pursuer| pursuer.calm(mode)).filter(|&hit| hit).count();

            debug!(calmed, %mode, "Fright ended");
            self.push_event(RoundEvent::FrightEnded { calmed, mode });
        }
    }

    fn move_pursuers(&mut self, leader: Cell) {
        let phase = self.state.phases.current_mode();

        for index in 0..self.pursuers.len() {
            // Cells held by the other pursuers right now, including any that already moved this tick
            let occupied: SmallVec<[Cell; 4]> = self
                .pursuers
                .iter()
                .enumerate()
                .filter(|&(other, pursuer)| other != index && pursuer.mode != PursuerMode::Eaten)
                .map(|(_, pursuer)| pursuer.cell)
                .collect();
            let avoid_overlap = self.config.avoid_overlap;
            let is_blocked = |cell: Cell| avoid_overlap && occupied.contains(&cell);

            let ctx = TargetContext {
                maze: &self.maze,
                agent: &self.agent,
                leader,
                targeting: &self.config.targeting,
                home: self.config.home,
                phase,
            };

            let pursuer = &mut self.pursuers[index];
            if pursuer.advance(&ctx, is_blocked, &mut self.rng) == Advance::Revived {
                let role = pursuer.role;
                self.push_event(RoundEvent::PursuerRevived { role, mode: phase });
            }
        }
    }

    /// Settles every pursuer sharing the agent's cell. A capture takes precedence; frightened pursuers on the
    /// same cell are only eaten when nothing captures the agent.
    fn resolve_collisions(&mut self) {
        let cell = self.agent.cell;

        let captor = self
            .pursuers
            .iter()
            .find(|pursuer| pursuer.cell == cell && pursuer.follows_phase())
            .map(|pursuer| pursuer.role);
        if let Some(role) = captor {
            self.capture(role);
            return;
        }

        for index in 0..self.pursuers.len() {
            let pursuer = &mut self.pursuers[index];
            if pursuer.cell != cell || !pursuer.eat() {
                continue;
            }

            let role = pursuer.role;
            let points = self.config.scores.pursuer_eaten;
            self.state.award(points);
            debug!(%role, %cell, points, score = self.state.score, "Pursuer eaten");
            self.push_event(RoundEvent::PursuerEaten { role, cell, points });
        }
    }

    fn capture(&mut self, by: Role) {
        let cell = self.agent.cell;
        let lives_remain = self.state.lose_life();
        let lives_left = self.state.lives;

        self.push_event(RoundEvent::AgentCaptured { by, cell, lives_left });

        if lives_remain {
            debug!(%by, %cell, lives_left, "Agent captured");
            self.state.status = RoundStatus::Respawning {
                remaining: self.config.cadence.respawn_delay(),
            };
        } else {
            let final_score = self.state.score;
            info!(%by, %cell, final_score, "Game over");
            self.state.status = RoundStatus::GameOver { final_score };
            self.push_event(RoundEvent::GameOver { final_score });
        }
    }

    fn advance_respawn(&mut self, elapsed: Duration) {
        let RoundStatus::Respawning { remaining } = self.state.status else {
            return;
        };

        if elapsed < remaining {
            self.state.status = RoundStatus::Respawning {
                remaining: remaining - elapsed,
            };
            return;
        }
        self.respawn();
    }

    /// Puts the agent and pursuers back on their start cells. Pellets and score are untouched.
    fn respawn(&mut self) {
        if self.config.respawn_policy == RespawnPolicy::ResetToScatter {
            self.state.phases.reset();
        }
        let phase = self.state.phases.current_mode();

        self.agent.reset(self.config.agent_start, self.config.agent_facing);
        for pursuer in &mut self.pursuers {
            pursuer.reset(phase);
        }
        self.state.fright_remaining = 0;
        self.state.status = RoundStatus::Playing;

        info!(lives = self.state.lives, %phase, "Respawned");
        self.push_event(RoundEvent::Respawned);
    }
}
