//! Pursuer behavior: the four roles, their modes, targeting and movement.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use tracing::{debug, trace};

use crate::config::Targeting;
use crate::game::agent::Agent;
use crate::game::phase::PhaseMode;
use crate::map::direction::Direction;
use crate::map::maze::{Cell, Maze};
use crate::map::path;

/// The four pursuer roles. Each has its own chase targeting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Chases the agent's cell directly. Also the pivot for [`Role::Inky`].
    Blinky,
    /// Aims a few cells ahead of the agent.
    Pinky,
    /// Aims at the reflection of Blinky through a point just ahead of the agent.
    Inky,
    /// Chases from afar, retreats to its corner when close.
    Clyde,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Blinky, Role::Pinky, Role::Inky, Role::Clyde];

    /// Stable index into per-role configuration tables.
    pub const fn index(self) -> usize {
        match self {
            Role::Blinky => 0,
            Role::Pinky => 1,
            Role::Inky => 2,
            Role::Clyde => 3,
        }
    }

    /// Body color while scattering or chasing.
    pub const fn color(self) -> Rgb {
        match self {
            Role::Blinky => Rgb(0xff, 0x3b, 0x3b),
            Role::Pinky => Rgb(0xff, 0x9a, 0xd6),
            Role::Inky => Rgb(0x33, 0xd6, 0xff),
            Role::Clyde => Rgb(0xff, 0xb8, 0x4d),
        }
    }
}

/// An sRGB color for the host's renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const FRIGHTENED: Rgb = Rgb(0x7f, 0xb0, 0xff);
    pub const EATEN: Rgb = Rgb(0x22, 0x22, 0x22);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The behavior mode of a single pursuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PursuerMode {
    Scatter,
    Chase,
    /// Vulnerable; wanders randomly until the fright timer runs out.
    Frightened,
    /// Captured while frightened; returning home to revive.
    Eaten,
}

impl From<PhaseMode> for PursuerMode {
    fn from(mode: PhaseMode) -> Self {
        match mode {
            PhaseMode::Scatter => PursuerMode::Scatter,
            PhaseMode::Chase => PursuerMode::Chase,
        }
    }
}

/// Read-only view of the round that a pursuer needs to pick its move.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext<'a> {
    pub maze: &'a Maze,
    pub agent: &'a Agent,
    /// Blinky's cell at the start of the tick.
    pub leader: Cell,
    pub targeting: &'a Targeting,
    pub home: Cell,
    /// The phase currently active in the schedule.
    pub phase: PhaseMode,
}

/// What a single pursuer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Held,
    Moved,
    /// An eaten pursuer reached home and took on the current phase mode.
    Revived,
}

/// One of the four autonomous pursuers.
#[derive(Debug, Clone, PartialEq)]
pub struct Pursuer {
    pub role: Role,
    pub cell: Cell,
    pub start: Cell,
    pub scatter_corner: Cell,
    pub mode: PursuerMode,
}

impl Pursuer {
    pub fn new(role: Role, start: Cell, scatter_corner: Cell, mode: PursuerMode) -> Self {
        Self {
            role,
            cell: start,
            start,
            scatter_corner,
            mode,
        }
    }

    /// Returns true for the modes driven by the phase schedule.
    pub fn follows_phase(&self) -> bool {
        matches!(self.mode, PursuerMode::Scatter | PursuerMode::Chase)
    }

    /// Adopts a broadcast phase mode, unless frightened or eaten.
    pub fn apply_phase(&mut self, phase: PhaseMode) {
        if self.follows_phase() {
            self.mode = phase.into();
        }
    }

    /// Frightens the pursuer. Eaten pursuers are unaffected. Returns true if it is now frightened.
    pub fn frighten(&mut self) -> bool {
        if self.mode == PursuerMode::Eaten {
            return false;
        }
        self.mode = PursuerMode::Frightened;
        true
    }

    /// Ends fright, reverting to the given phase mode. Returns true if the pursuer was frightened.
    pub fn calm(&mut self, phase: PhaseMode) -> bool {
        if self.mode != PursuerMode::Frightened {
            return false;
        }
        self.mode = phase.into();
        true
    }

    /// Marks a frightened pursuer as eaten. Returns false for any other mode.
    pub fn eat(&mut self) -> bool {
        if self.mode != PursuerMode::Frightened {
            return false;
        }
        self.mode = PursuerMode::Eaten;
        true
    }

    /// Returns to the start cell in the given mode.
    pub fn reset(&mut self, phase: PhaseMode) {
        self.cell = self.start;
        self.mode = phase.into();
    }

    /// The display color for the current mode.
    pub fn color(&self) -> Rgb {
        match self.mode {
            PursuerMode::Frightened => Rgb::FRIGHTENED,
            PursuerMode::Eaten => Rgb::EATEN,
            PursuerMode::Scatter | PursuerMode::Chase => self.role.color(),
        }
    }

    /// The chase target for this role.
    pub fn chase_target(&self, ctx: &TargetContext<'_>) -> Cell {
        let agent = ctx.agent;
        match self.role {
            Role::Blinky => agent.cell,
            Role::Pinky => agent.cells_ahead(ctx.maze, ctx.targeting.ambush_lookahead),
            Role::Inky => {
                let ahead = agent.cell.offset(agent.facing, ctx.targeting.flank_lookahead);
                let pivot = if ctx.maze.is_traversable(ahead) { ahead } else { agent.cell };
                let reflected = Cell::from(pivot.as_ivec2() * 2 - ctx.leader.as_ivec2());
                if ctx.maze.is_traversable(reflected) {
                    reflected
                } else {
                    pivot
                }
            }
            Role::Clyde => {
                if self.cell.distance(agent.cell) > ctx.targeting.shy_distance {
                    agent.cell
                } else {
                    self.scatter_corner
                }
            }
        }
    }

    /// The target for the current mode, or `None` for modes that do not target.
    pub fn target(&self, ctx: &TargetContext<'_>) -> Option<Cell> {
        match self.mode {
            PursuerMode::Scatter => Some(self.scatter_corner),
            PursuerMode::Chase => Some(self.chase_target(ctx)),
            PursuerMode::Eaten => Some(ctx.home),
            PursuerMode::Frightened => None,
        }
    }

    /// Moves one cell according to the current mode.
    ///
    /// `is_blocked` marks cells this pursuer should path around while scattering or chasing; frightened and
    /// eaten pursuers ignore it. `rng` picks frightened escape routes.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        ctx: &TargetContext<'_>,
        is_blocked: impl Fn(Cell) -> bool,
        rng: &mut R,
    ) -> Advance {
        let next = match self.mode {
            PursuerMode::Frightened => self.wander(ctx.maze, rng),
            PursuerMode::Eaten => {
                if self.cell == ctx.home {
                    return self.revive(ctx.phase);
                }
                path::next_step(ctx.maze, self.cell, ctx.home, path::unblocked)
            }
            PursuerMode::Scatter | PursuerMode::Chase => {
                let target = self
                    .target(ctx)
                    .filter(|&cell| ctx.maze.is_traversable(cell))
                    .unwrap_or(ctx.agent.cell);
                if target == self.cell {
                    trace!(role = %self.role, cell = %self.cell, mode = %self.mode, "Pursuer parked on target");
                    return Advance::Held;
                }

                path::next_step(ctx.maze, self.cell, target, &is_blocked).or_else(|| {
                    ctx.maze
                        .neighbors(self.cell)
                        .into_iter()
                        .find(|&cell| !is_blocked(cell))
                })
            }
        };

        let Some(next) = next else {
            trace!(role = %self.role, cell = %self.cell, mode = %self.mode, "Pursuer holding position");
            return Advance::Held;
        };

        trace!(role = %self.role, from = %self.cell, to = %next, mode = %self.mode, "Pursuer moved");
        self.cell = next;

        if self.mode == PursuerMode::Eaten && self.cell == ctx.home {
            return self.revive(ctx.phase);
        }
        Advance::Moved
    }

    /// Tries the four directions in a random order and returns the first open neighbor.
    fn wander<R: Rng + ?Sized>(&self, maze: &Maze, rng: &mut R) -> Option<Cell> {
        let mut directions = Direction::DIRECTIONS;
        directions.shuffle(rng);
        directions
            .into_iter()
            .map(|direction| self.cell.step(direction))
            .find(|&cell| maze.is_traversable(cell))
    }

    fn revive(&mut self, phase: PhaseMode) -> Advance {
        self.mode = phase.into();
        debug!(role = %self.role, cell = %self.cell, mode = %self.mode, "Eaten pursuer revived at home");
        Advance::Revived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn open_room() -> Maze {
        Maze::parse(&[
            "#########",
            "#.......#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#.......#",
            "#########",
        ])
        .unwrap()
    }

    fn context<'a>(maze: &'a Maze, agent: &'a Agent, leader: Cell, targeting: &'a Targeting) -> TargetContext<'a> {
        TargetContext {
            maze,
            agent,
            leader,
            targeting,
            home: Cell::new(3, 4),
            phase: PhaseMode::Chase,
        }
    }

    #[test]
    fn test_blinky_targets_agent() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(3, 3), Direction::Right);
        let blinky = Pursuer::new(Role::Blinky, Cell::new(1, 1), Cell::new(1, 7), PursuerMode::Chase);
        let ctx = context(&maze, &agent, blinky.cell, &targeting);
        assert_eq!(blinky.chase_target(&ctx), Cell::new(3, 3));
    }

    #[test]
    fn test_pinky_targets_ahead_of_agent() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(3, 2), Direction::Right);
        let pinky = Pursuer::new(Role::Pinky, Cell::new(1, 1), Cell::new(1, 1), PursuerMode::Chase);
        let ctx = context(&maze, &agent, Cell::new(1, 7), &targeting);
        assert_eq!(pinky.chase_target(&ctx), Cell::new(3, 6));

        // Facing the wall at column 8: four ahead lands off the room, clamp back to column 7.
        let agent = Agent::new(Cell::new(3, 5), Direction::Right);
        let ctx = context(&maze, &agent, Cell::new(1, 7), &targeting);
        assert_eq!(pinky.chase_target(&ctx), Cell::new(3, 7));
    }

    #[test]
    fn test_inky_reflects_through_pivot() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(3, 2), Direction::Right);
        let inky = Pursuer::new(Role::Inky, Cell::new(5, 7), Cell::new(5, 7), PursuerMode::Chase);

        // Pivot is (3, 4); reflecting Blinky at (2, 4) gives (4, 4).
        let ctx = context(&maze, &agent, Cell::new(2, 4), &targeting);
        assert_eq!(inky.chase_target(&ctx), Cell::new(4, 4));

        // Reflecting Blinky at (1, 1) gives (5, 7).
        let ctx = context(&maze, &agent, Cell::new(1, 1), &targeting);
        assert_eq!(inky.chase_target(&ctx), Cell::new(5, 7));

        // Reflections landing on a wall or off the grid fall back to the pivot.
        let ctx = context(&maze, &agent, Cell::new(3, 0), &targeting);
        assert_eq!(inky.chase_target(&ctx), Cell::new(3, 4));
        let ctx = context(&maze, &agent, Cell::new(3, -4), &targeting);
        assert_eq!(inky.chase_target(&ctx), Cell::new(3, 4));

        // Two ahead is inside the wall, so the pivot is the agent itself: (3, 6) reflected from (3, 5).
        let agent = Agent::new(Cell::new(3, 6), Direction::Right);
        let ctx = context(&maze, &agent, Cell::new(3, 5), &targeting);
        assert_eq!(inky.chase_target(&ctx), Cell::new(3, 7));
    }

    #[test]
    fn test_clyde_is_shy_up_close() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(1, 1), Direction::Right);
        let corner = Cell::new(5, 1);

        let far = Pursuer::new(Role::Clyde, Cell::new(5, 7), corner, PursuerMode::Chase);
        let ctx = context(&maze, &agent, Cell::new(1, 7), &targeting);
        assert_eq!(far.chase_target(&ctx), agent.cell);

        let near = Pursuer::new(Role::Clyde, Cell::new(3, 3), corner, PursuerMode::Chase);
        assert_eq!(near.chase_target(&ctx), corner);

        // Exactly at the threshold still counts as close.
        let edge = Pursuer::new(Role::Clyde, Cell::new(1, 5), corner, PursuerMode::Chase);
        assert_eq!(edge.chase_target(&ctx), corner);
    }

    #[test]
    fn test_mode_transitions() {
        let mut pursuer = Pursuer::new(Role::Blinky, Cell::new(1, 1), Cell::new(1, 7), PursuerMode::Scatter);

        pursuer.apply_phase(PhaseMode::Chase);
        assert_eq!(pursuer.mode, PursuerMode::Chase);

        assert!(!pursuer.eat());
        assert!(pursuer.frighten());
        pursuer.apply_phase(PhaseMode::Scatter);
        assert_eq!(pursuer.mode, PursuerMode::Frightened);

        assert!(pursuer.eat());
        assert_eq!(pursuer.mode, PursuerMode::Eaten);
        assert!(!pursuer.frighten());
        assert!(!pursuer.calm(PhaseMode::Chase));
        assert_eq!(pursuer.mode, PursuerMode::Eaten);
    }

    #[test]
    fn test_colors_follow_mode() {
        let mut pursuer = Pursuer::new(Role::Inky, Cell::new(1, 1), Cell::new(1, 7), PursuerMode::Scatter);
        assert_eq!(pursuer.color(), Role::Inky.color());
        pursuer.frighten();
        assert_eq!(pursuer.color(), Rgb::FRIGHTENED);
        pursuer.eat();
        assert_eq!(pursuer.color(), Rgb::EATEN);
        assert_eq!(Role::Blinky.color().to_string(), "#ff3b3b");
    }

    #[test]
    fn test_eaten_paths_home_and_revives() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(5, 7), Direction::Left);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut pursuer = Pursuer::new(Role::Pinky, Cell::new(3, 1), Cell::new(1, 1), PursuerMode::Eaten);

        let ctx = context(&maze, &agent, Cell::new(1, 7), &targeting);
        assert_eq!(pursuer.advance(&ctx, path::unblocked, &mut rng), Advance::Moved);
        assert_eq!(pursuer.advance(&ctx, path::unblocked, &mut rng), Advance::Moved);
        assert_eq!(pursuer.advance(&ctx, path::unblocked, &mut rng), Advance::Revived);
        assert_eq!(pursuer.cell, Cell::new(3, 4));
        assert_eq!(pursuer.mode, PursuerMode::Chase);
    }

    #[test]
    fn test_frightened_takes_only_exit() {
        // A dead end: the only open neighbor is to the right.
        let maze = Maze::parse(&["#####", "#...#", "#####"]).unwrap();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(1, 3), Direction::Left);
        let ctx = TargetContext {
            maze: &maze,
            agent: &agent,
            leader: Cell::new(1, 3),
            targeting: &targeting,
            home: Cell::new(1, 2),
            phase: PhaseMode::Scatter,
        };

        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut pursuer = Pursuer::new(Role::Clyde, Cell::new(1, 1), Cell::new(1, 1), PursuerMode::Frightened);
            assert_eq!(pursuer.advance(&ctx, path::unblocked, &mut rng), Advance::Moved);
            assert_eq!(pursuer.cell, Cell::new(1, 2));
        }
    }

    #[test]
    fn test_scatter_pursuer_parks_on_its_corner() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(5, 7), Direction::Left);
        let ctx = context(&maze, &agent, Cell::new(3, 4), &targeting);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut pinky = Pursuer::new(Role::Pinky, Cell::new(1, 2), Cell::new(1, 1), PursuerMode::Scatter);

        assert_eq!(pinky.advance(&ctx, path::unblocked, &mut rng), Advance::Moved);
        assert_eq!(pinky.cell, Cell::new(1, 1));
        for _ in 0..4 {
            assert_eq!(pinky.advance(&ctx, path::unblocked, &mut rng), Advance::Held);
            assert_eq!(pinky.cell, Cell::new(1, 1));
        }
    }

    #[test]
    fn test_shy_clyde_parks_on_its_corner() {
        let maze = open_room();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(3, 2), Direction::Up);
        let ctx = context(&maze, &agent, Cell::new(3, 4), &targeting);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut clyde = Pursuer::new(Role::Clyde, Cell::new(5, 1), Cell::new(5, 1), PursuerMode::Chase);

        assert_eq!(clyde.advance(&ctx, path::unblocked, &mut rng), Advance::Held);
        assert_eq!(clyde.cell, Cell::new(5, 1));
    }

    #[test]
    fn test_blocked_path_falls_back_to_neighbor() {
        // Corridor: the pursuer's only route to the agent passes through a blocked cell.
        let maze = Maze::parse(&["#######", "#.....#", "#######"]).unwrap();
        let targeting = Targeting::default();
        let agent = Agent::new(Cell::new(1, 5), Direction::Left);
        let ctx = context(&maze, &agent, Cell::new(1, 1), &targeting);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut blinky = Pursuer::new(Role::Blinky, Cell::new(1, 2), Cell::new(1, 1), PursuerMode::Chase);

        // No path through (1, 3): the first open unblocked neighbor (left) is taken instead.
        let outcome = blinky.advance(&ctx, |cell| cell == Cell::new(1, 3), &mut rng);
        assert_eq!(outcome, Advance::Moved);
        assert_eq!(blinky.cell, Cell::new(1, 1));

        // Boxed in on both sides: hold.
        let outcome = blinky.advance(&ctx, |cell| cell == Cell::new(1, 2), &mut rng);
        assert_eq!(outcome, Advance::Held);
        assert_eq!(blinky.cell, Cell::new(1, 1));
    }
}
