//! Maze parsing functionality for converting raw text layouts into a [`Maze`].

use crate::error::ParseError;
use crate::map::maze::{Cell, CellKind, Maze};

/// Parser for converting raw maze layouts into structured maze data.
pub struct MazeParser;

impl MazeParser {
    /// Parses a single character into a cell kind.
    ///
    /// Returns `None` for characters that have no meaning in a layout.
    pub fn parse_character(c: char) -> Option<CellKind> {
        match c {
            '#' => Some(CellKind::Wall),
            '.' => Some(CellKind::Pellet),
            'o' => Some(CellKind::PowerPellet),
            ' ' => Some(CellKind::Open),
            _ => None,
        }
    }

    /// Parses a raw layout, one string per row, into a maze.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty, if rows differ in length, if it contains
    /// unknown characters, or if any border cell is not a wall.
    pub fn parse_layout<S: AsRef<str>>(layout: &[S]) -> Result<Maze, ParseError> {
        let cols = layout.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if cols == 0 {
            return Err(ParseError::Empty);
        }
        let rows = layout.len();

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }

            for (col, character) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                let kind = Self::parse_character(character).ok_or(ParseError::UnknownCharacter { character, cell })?;
                cells.push(kind);
            }
        }

        let maze = Maze::from_parts(rows, cols, cells);

        // The border must be closed
        if let Some((cell, _)) = maze
            .cells()
            .find(|&(cell, kind)| maze.is_border(cell) && kind != CellKind::Wall)
        {
            return Err(ParseError::OpenBorder(cell));
        }

        Ok(maze)
    }
}
