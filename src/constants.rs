//! This module contains all the constants used by the simulation.
//!
//! Anything tied to the shape of [`RAW_MAZE`] (start cells, corners, the home cell) is only a default;
//! [`crate::config::RoundConfig`] carries the values actually used by a round.

use std::time::Duration;

use crate::map::maze::Cell;

/// The host frame period used by the demo runner.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the maze, in cells.
pub const MAZE_ROWS: usize = 9;
pub const MAZE_COLS: usize = 14;

/// The raw layout of the maze, one string per row.
///
/// `#` is a wall, `.` a regular pellet, `o` a power pellet and a space is open floor.
pub const RAW_MAZE: [&str; MAZE_ROWS] = [
    "##############",
    "#o...#....o..#",
    "#.##.#.##.##.#",
    "#.#.....#..#.#",
    "#.#.###.##.#.#",
    "#...........o#",
    "#.#########..#",
    "#............#",
    "##############",
];

pub mod scoring {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    /// Awarded for each frightened pursuer the agent runs into.
    pub const PURSUER_EATEN: u32 = 200;
}

pub mod timing {
    use std::time::Duration;

    /// How often the agent moves one cell.
    pub const AGENT_PERIOD: Duration = Duration::from_millis(220);
    /// How often the pursuers move one cell.
    pub const PURSUER_PERIOD: Duration = Duration::from_millis(360);
    /// Period of the phase and fright countdowns; their durations are counted in these.
    pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);
    /// Freeze between a capture and the respawn.
    pub const RESPAWN_DELAY: Duration = Duration::from_millis(600);

    /// Fright duration, in countdown periods.
    pub const FRIGHT_DURATION: u32 = 7;
}

pub mod targeting {
    /// How far ahead of the agent the ambusher aims.
    pub const AMBUSH_LOOKAHEAD: i32 = 4;
    /// The pivot distance ahead of the agent used by the flanker's reflection.
    pub const FLANK_LOOKAHEAD: i32 = 2;
    /// Beyond this straight-line distance the shy pursuer chases; within it, it retreats.
    pub const SHY_DISTANCE: f32 = 4.0;
}

pub const STARTING_LIVES: u8 = 3;

pub const AGENT_START: Cell = Cell::new(1, 2);
/// Cell eaten pursuers path back to before reviving.
pub const PURSUER_HOME: Cell = Cell::new(3, 6);

/// Start cells, indexed by [`crate::game::pursuer::Role::index`].
pub const PURSUER_STARTS: [Cell; 4] = [Cell::new(1, 11), Cell::new(1, 10), Cell::new(5, 11), Cell::new(5, 1)];

/// Scatter corners, indexed by [`crate::game::pursuer::Role::index`].
pub const SCATTER_CORNERS: [Cell; 4] = [
    Cell::new(1, MAZE_COLS as i32 - 2),
    Cell::new(1, 1),
    Cell::new(MAZE_ROWS as i32 - 2, MAZE_COLS as i32 - 2),
    Cell::new(MAZE_ROWS as i32 - 2, 1),
];

/// Capacity of the round's event buffer; the oldest events are dropped first.
pub const EVENT_BUFFER_CAPACITY: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_raw_maze_dimensions() {
        assert_eq!(RAW_MAZE.len(), MAZE_ROWS);
        for row in RAW_MAZE.iter() {
            assert_eq!(row.len(), MAZE_COLS);
        }
    }

    #[test]
    fn test_raw_maze_boundaries() {
        assert!(RAW_MAZE[0].chars().all(|c| c == '#'));
        assert!(RAW_MAZE[MAZE_ROWS - 1].chars().all(|c| c == '#'));
        for row in RAW_MAZE.iter() {
            assert!(row.starts_with('#'));
            assert!(row.ends_with('#'));
        }
    }

    #[test]
    fn test_raw_maze_power_pellets() {
        let count: usize = RAW_MAZE.iter().map(|row| row.chars().filter(|&c| c == 'o').count()).sum();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_scoring_order() {
        assert!(scoring::PELLET < scoring::POWER_PELLET);
        assert!(scoring::POWER_PELLET < scoring::PURSUER_EATEN);
    }

    #[test]
    fn test_pursuers_slower_than_agent() {
        assert!(timing::PURSUER_PERIOD > timing::AGENT_PERIOD);
    }
}
