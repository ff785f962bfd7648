//! The player-controlled agent.

use tracing::trace;

use crate::map::direction::Direction;
use crate::map::maze::{Cell, Maze};

/// The agent's position, facing and queued input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub cell: Cell,
    pub facing: Direction,
    /// The last direction requested by input; kept until replaced so it is honored as soon as the geometry allows.
    pub queued: Option<Direction>,
}

impl Agent {
    pub fn new(cell: Cell, facing: Direction) -> Self {
        Self {
            cell,
            facing,
            queued: None,
        }
    }

    /// Records the player's intended direction.
    pub fn queue_direction(&mut self, direction: Direction) {
        self.queued = Some(direction);
    }

    /// Moves one cell: the queued direction if open, otherwise the current facing, otherwise nowhere.
    ///
    /// Returns true if the agent moved.
    pub fn advance(&mut self, maze: &Maze) -> bool {
        let candidates = self.queued.into_iter().chain(std::iter::once(self.facing));
        for direction in candidates {
            let next = self.cell.step(direction);
            if maze.is_traversable(next) {
                trace!(from = %self.cell, to = %next, ?direction, "Agent moved");
                self.cell = next;
                self.facing = direction;
                return true;
            }
        }
        false
    }

    /// The cell `distance` steps ahead along the facing direction.
    ///
    /// If that lands on a wall or off the grid, walks back toward the agent to the nearest traversable
    /// cell on the same line, ending at the agent's own cell.
    pub fn cells_ahead(&self, maze: &Maze, distance: i32) -> Cell {
        (1..=distance.max(0))
            .rev()
            .map(|n| self.cell.offset(self.facing, n))
            .find(|&cell| maze.is_traversable(cell))
            .unwrap_or(self.cell)
    }

    /// Returns the agent to a start cell, clearing queued input.
    pub fn reset(&mut self, cell: Cell, facing: Direction) {
        *self = Agent::new(cell, facing);
    }
}
