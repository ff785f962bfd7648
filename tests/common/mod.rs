#![allow(dead_code)]

use chase::config::RoundConfig;
use chase::game::Round;
use chase::map::direction::Direction;
use chase::map::maze::{Cell, Maze};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A single corridor on row 1 and three sealed single-cell pens on row 3.
///
/// Pellets at columns 1 to 3, a power pellet at column 7. Blinky starts in the corridor at (1, 5); the
/// other pursuers are shut in the pens and never move.
pub const CORRIDOR: [&str; 5] = ["#########", "#...   o#", "#########", "# # # ###", "#########"];

pub fn corridor() -> Maze {
    Maze::parse(&CORRIDOR).unwrap()
}

pub fn corridor_config() -> RoundConfig {
    let starts = [Cell::new(1, 5), Cell::new(3, 1), Cell::new(3, 3), Cell::new(3, 5)];
    RoundConfig {
        agent_start: Cell::new(1, 3),
        agent_facing: Direction::Left,
        pursuer_starts: starts,
        scatter_corners: starts,
        home: Cell::new(3, 5),
        ..Default::default()
    }
}

/// Builds a round and starts it.
pub fn started(maze: Maze, config: RoundConfig, seed: u64) -> Round {
    let mut round = Round::new(maze, config, SmallRng::seed_from_u64(seed)).unwrap();
    round.start_round();
    round
}

pub fn classic(seed: u64) -> Round {
    let mut round = Round::classic(SmallRng::seed_from_u64(seed)).unwrap();
    round.start_round();
    round
}

pub fn steps(round: &mut Round, count: usize) {
    for _ in 0..count {
        round.step();
    }
}

pub fn agent_ticks(round: &mut Round, count: usize) {
    for _ in 0..count {
        round.agent_tick();
    }
}
