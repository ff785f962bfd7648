//! Read-only views of a round for the host's renderer.

use smallvec::SmallVec;

use crate::game::ledger::PelletKind;
use crate::game::phase::PhaseMode;
use crate::game::pursuer::{PursuerMode, Rgb, Role};
use crate::game::state::RoundStatus;
use crate::map::direction::Direction;
use crate::map::maze::{Cell, CellKind, Maze};

/// A single pursuer as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PursuerView {
    pub role: Role,
    pub cell: Cell,
    pub mode: PursuerMode,
    pub color: Rgb,
}

impl PursuerView {
    /// Board glyph: the role's initial, lowercased while frightened.
    fn glyph(&self) -> char {
        let initial = match self.role {
            Role::Blinky => 'B',
            Role::Pinky => 'P',
            Role::Inky => 'I',
            Role::Clyde => 'C',
        };
        match self.mode {
            PursuerMode::Scatter | PursuerMode::Chase => initial,
            PursuerMode::Frightened => initial.to_ascii_lowercase(),
            PursuerMode::Eaten => '"',
        }
    }
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub agent: Cell,
    pub facing: Direction,
    pub pursuers: SmallVec<[PursuerView; 4]>,
    /// Pellets still on the board, in row-major order.
    pub pellets: Vec<(Cell, PelletKind)>,
    pub score: u32,
    pub lives: u8,
    pub phase: PhaseMode,
    pub status: RoundStatus,
    pub paused: bool,
    pub game_over: bool,
    pub final_score: Option<u32>,
    /// Every pellet has been consumed.
    pub maze_cleared: bool,
    pub fright_remaining: u32,
    pub ticks: u64,
}

impl Snapshot {
    pub fn remaining_pellets(&self) -> usize {
        self.pellets.len()
    }

    pub fn pursuer(&self, role: Role) -> Option<&PursuerView> {
        self.pursuers.iter().find(|view| view.role == role)
    }

    /// Draws the board as text, one line per maze row.
    ///
    /// The agent is `@`, pursuers use their role initial (lowercase when frightened, `"` when eaten). Pellets
    /// are `.` and `o`; walls are `#`.
    pub fn render(&self, maze: &Maze) -> String {
        let mut grid: Vec<Vec<char>> = (0..maze.rows())
            .map(|row| {
                (0..maze.cols())
                    .map(|col| match maze.cell_kind(Cell::new(row as i32, col as i32)) {
                        Some(CellKind::Wall) => '#',
                        _ => ' ',
                    })
                    .collect()
            })
            .collect();

        let mut put = |cell: Cell, glyph: char| {
            if let Some(slot) = usize::try_from(cell.row)
                .ok()
                .zip(usize::try_from(cell.col).ok())
                .and_then(|(row, col)| grid.get_mut(row)?.get_mut(col))
            {
                *slot = glyph;
            }
        };

        for &(cell, kind) in &self.pellets {
            put(
                cell,
                match kind {
                    PelletKind::Regular => '.',
                    PelletKind::Power => 'o',
                },
            );
        }
        for view in &self.pursuers {
            put(view.cell, view.glyph());
        }
        put(self.agent, '@');

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
