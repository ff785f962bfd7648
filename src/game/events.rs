use crate::game::ledger::PelletKind;
use crate::game::phase::PhaseMode;
use crate::game::pursuer::Role;
use crate::map::maze::Cell;

/// Notable things that happened during a round, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    RoundStarted,
    PelletEaten {
        cell: Cell,
        kind: PelletKind,
        points: u32,
    },
    FrightStarted {
        frightened: usize,
        duration: u32,
    },
    FrightEnded {
        calmed: usize,
        mode: PhaseMode,
    },
    PhaseChanged {
        index: usize,
        mode: PhaseMode,
    },
    PursuerEaten {
        role: Role,
        cell: Cell,
        points: u32,
    },
    PursuerRevived {
        role: Role,
        mode: PhaseMode,
    },
    AgentCaptured {
        by: Role,
        cell: Cell,
        lives_left: u8,
    },
    Respawned,
    /// Every pellet is gone. Only signalled; the round keeps running.
    MazeCleared {
        score: u32,
    },
    GameOver {
        final_score: u32,
    },
}
