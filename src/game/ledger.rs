//! Pellet consumption bookkeeping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::config::ScoreTable;
use crate::map::maze::{Cell, CellKind, Maze};

/// The two kinds of pellet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum PelletKind {
    Regular,
    Power,
}

impl PelletKind {
    /// The score awarded for consuming this pellet.
    pub fn score(self, table: &ScoreTable) -> u32 {
        match self {
            PelletKind::Regular => table.pellet,
            PelletKind::Power => table.power_pellet,
        }
    }

    /// Returns true if consuming this pellet frightens the pursuers.
    pub fn frightens(self) -> bool {
        matches!(self, PelletKind::Power)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PelletEntry {
    kind: PelletKind,
    consumed: bool,
}

/// Tracks which pellets of a maze have been consumed.
///
/// Consumption is one-way within a round; only [`PelletLedger::reset`] restores pellets.
#[derive(Debug, Clone)]
pub struct PelletLedger {
    entries: BTreeMap<Cell, PelletEntry>,
    remaining: usize,
}

impl PelletLedger {
    /// Records every pellet-bearing cell of the maze, all unconsumed.
    pub fn from_maze(maze: &Maze) -> Self {
        let entries: BTreeMap<Cell, PelletEntry> = maze
            .cells()
            .filter_map(|(cell, kind)| {
                let kind = match kind {
                    CellKind::Pellet => PelletKind::Regular,
                    CellKind::PowerPellet => PelletKind::Power,
                    CellKind::Wall | CellKind::Open => return None,
                };
                Some((cell, PelletEntry { kind, consumed: false }))
            })
            .collect();

        let remaining = entries.len();
        Self { entries, remaining }
    }

    /// Consumes the pellet at `cell`, if there is one that has not been consumed yet.
    pub fn consume_if_present(&mut self, cell: Cell) -> Option<PelletKind> {
        let entry = self.entries.get_mut(&cell)?;
        if entry.consumed {
            return None;
        }
        entry.consumed = true;
        self.remaining -= 1;
        Some(entry.kind)
    }

    pub fn is_consumed(&self, cell: Cell) -> bool {
        self.entries.get(&cell).is_some_and(|entry| entry.consumed)
    }

    /// Returns true once every pellet has been consumed.
    pub fn all_consumed(&self) -> bool {
        self.remaining == 0
    }

    /// Number of pellets still on the board.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Total number of pellets, consumed or not.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Pellets still on the board, in row-major order.
    pub fn remaining_cells(&self) -> impl Iterator<Item = (Cell, PelletKind)> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.consumed)
            .map(|(&cell, entry)| (cell, entry.kind))
    }

    /// Consumed pellets, in row-major order.
    pub fn consumed_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.consumed)
            .map(|(&cell, _)| cell)
    }

    /// Restores every pellet.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.consumed = false;
        }
        self.remaining = self.entries.len();
    }
}
