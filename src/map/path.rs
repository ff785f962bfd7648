//! Shortest-path queries over the maze.
//!
//! Paths are recomputed on every call: the maze never changes, but every target moves each tick.

use pathfinding::prelude::bfs;
use smallvec::SmallVec;

use crate::map::maze::{Cell, Maze};

/// Breadth-first search from `start` to `target`, returning the full path (both ends included).
///
/// Cells rejected by `is_blocked` are never entered; that includes the target itself. Neighbors are expanded
/// in [`crate::map::direction::Direction::DIRECTIONS`] order and the first cell to discover another becomes its
/// parent, so equal-length paths always resolve the same way.
pub fn shortest_path(maze: &Maze, start: Cell, target: Cell, is_blocked: impl Fn(Cell) -> bool) -> Option<Vec<Cell>> {
    if !maze.is_traversable(target) {
        return None;
    }

    bfs(
        &start,
        |&cell| -> SmallVec<[Cell; 4]> {
            maze.neighbors(cell)
                .into_iter()
                .filter(|&next| !is_blocked(next))
                .collect()
        },
        |&cell| cell == target,
    )
}

/// Returns the cell adjacent to `start` on a shortest path toward `target`.
///
/// Returns `None` when the target is not traversable, cannot be reached, or is `start` itself.
pub fn next_step(maze: &Maze, start: Cell, target: Cell, is_blocked: impl Fn(Cell) -> bool) -> Option<Cell> {
    shortest_path(maze, start, target, is_blocked).and_then(|path| path.get(1).copied())
}

/// Number of moves on a shortest path from `start` to `target`, if one exists.
pub fn distance(maze: &Maze, start: Cell, target: Cell, is_blocked: impl Fn(Cell) -> bool) -> Option<usize> {
    shortest_path(maze, start, target, is_blocked).map(|path| path.len() - 1)
}

/// A blocking predicate that blocks nothing.
pub fn unblocked(_: Cell) -> bool {
    false
}
