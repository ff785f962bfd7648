//! The static maze grid and its traversal queries.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::RAW_MAZE;
use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::parser::MazeParser;

/// A (row, column) coordinate in the maze.
///
/// Ordering is row-major, which gives pellet listings and snapshots a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent cell in `direction`. May lie outside the maze.
    pub fn step(self, direction: Direction) -> Cell {
        self.offset(direction, 1)
    }

    /// The cell `distance` steps away in `direction`. May lie outside the maze.
    pub fn offset(self, direction: Direction, distance: i32) -> Cell {
        (self.as_ivec2() + direction.as_ivec2() * distance).into()
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.col, self.row)
    }

    /// Straight-line distance between two cell centers.
    pub fn distance(self, other: Cell) -> f32 {
        self.as_ivec2().as_vec2().distance(other.as_ivec2().as_vec2())
    }

    /// Returns true if the two cells share an edge.
    pub fn is_adjacent(self, other: Cell) -> bool {
        let delta = (self.as_ivec2() - other.as_ivec2()).abs();
        delta.x + delta.y == 1
    }
}

impl From<IVec2> for Cell {
    fn from(v: IVec2) -> Self {
        Cell::new(v.y, v.x)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The classification of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Wall,
    /// Open floor without a pellet.
    Open,
    Pellet,
    PowerPellet,
}

/// The maze grid. Immutable once built.
///
/// Pellet presence is only the initial layout here; consumption is tracked by
/// [`crate::game::ledger::PelletLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    /// Row-major cell kinds.
    cells: Vec<CellKind>,
}

impl Maze {
    /// Parses a maze from a text layout. See [`MazeParser`] for the accepted characters.
    pub fn parse<S: AsRef<str>>(layout: &[S]) -> Result<Maze, ParseError> {
        MazeParser::parse_layout(layout)
    }

    /// The built-in maze, parsed from [`RAW_MAZE`].
    pub fn classic() -> Result<Maze, ParseError> {
        Self::parse(&RAW_MAZE)
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<CellKind>) -> Maze {
        debug_assert_eq!(cells.len(), rows * cols);
        Maze { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the cell lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0 && (cell.row as usize) < self.rows && (cell.col as usize) < self.cols
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    /// Returns the kind of the cell, or `None` if it lies outside the grid.
    pub fn cell_kind(&self, cell: Cell) -> Option<CellKind> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Returns true iff the cell is inside the grid and not a wall.
    pub fn is_traversable(&self, cell: Cell) -> bool {
        matches!(self.cell_kind(cell), Some(kind) if kind != CellKind::Wall)
    }

    /// Traversable neighbors of a cell, in neighbor-priority order.
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        Direction::DIRECTIONS
            .iter()
            .map(|&dir| cell.step(dir))
            .filter(|&next| self.is_traversable(next))
            .collect()
    }

    /// Iterates every cell with its kind, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &kind)| {
            let cell = Cell::new((i / self.cols) as i32, (i % self.cols) as i32);
            (cell, kind)
        })
    }

    /// Returns true if the cell is on the outer border of the grid.
    pub fn is_border(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.row == 0 || cell.col == 0 || cell.row as usize == self.rows - 1 || cell.col as usize == self.cols - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(3, 3);
        assert_eq!(cell.step(Direction::Up), Cell::new(2, 3));
        assert_eq!(cell.step(Direction::Right), Cell::new(3, 4));
        assert_eq!(cell.step(Direction::Down), Cell::new(4, 3));
        assert_eq!(cell.step(Direction::Left), Cell::new(3, 2));
        assert_eq!(cell.offset(Direction::Left, 4), Cell::new(3, -1));
    }

    #[test]
    fn test_cell_ordering_is_row_major() {
        assert!(Cell::new(0, 9) < Cell::new(1, 0));
        assert!(Cell::new(1, 0) < Cell::new(1, 1));
    }

    #[test]
    fn test_cell_distance() {
        assert_eq!(Cell::new(0, 0).distance(Cell::new(3, 4)), 5.0);
        assert!(Cell::new(1, 1).is_adjacent(Cell::new(1, 2)));
        assert!(!Cell::new(1, 1).is_adjacent(Cell::new(2, 2)));
        assert!(!Cell::new(1, 1).is_adjacent(Cell::new(1, 1)));
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let maze = Maze::classic().unwrap();
        assert_eq!(maze.cell_kind(Cell::new(-1, 0)), None);
        assert_eq!(maze.cell_kind(Cell::new(0, 14)), None);
        assert!(!maze.is_traversable(Cell::new(9, 3)));
        assert!(!maze.is_traversable(Cell::new(-5, -5)));
    }

    #[test]
    fn test_classic_cell_kinds() {
        let maze = Maze::classic().unwrap();
        assert_eq!(maze.cell_kind(Cell::new(0, 0)), Some(CellKind::Wall));
        assert_eq!(maze.cell_kind(Cell::new(1, 1)), Some(CellKind::PowerPellet));
        assert_eq!(maze.cell_kind(Cell::new(1, 2)), Some(CellKind::Pellet));
        assert!(maze.is_traversable(Cell::new(1, 2)));
    }

    #[test]
    fn test_neighbors_priority() {
        let maze = Maze::classic().unwrap();
        // (3, 5) sits in a horizontal corridor
        assert_eq!(
            maze.neighbors(Cell::new(3, 5)).as_slice(),
            &[Cell::new(3, 6), Cell::new(3, 4)][..]
        );
        assert_eq!(
            maze.neighbors(Cell::new(5, 1)).as_slice(),
            &[Cell::new(4, 1), Cell::new(5, 2), Cell::new(6, 1)][..]
        );
    }
}
