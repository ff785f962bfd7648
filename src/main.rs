use std::time::Duration;

use anyhow::Context;
use chase::config::RoundConfig;
use chase::constants::LOOP_TIME;
use chase::game::events::RoundEvent;
use chase::game::Round;
use chase::logging::setup_logging;
use chase::map::direction::Direction;
use chase::map::maze::{Cell, Maze};
use chase::map::path;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thousands::Separable;
use tracing::{debug, info};

/// Simulated time after which the demo gives up.
const TIME_LIMIT: Duration = Duration::from_secs(300);

fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = RoundConfig::from_env().context("Could not load round configuration")?;
    let rng = match std::env::var("CHASE_SEED") {
        Ok(seed) => {
            let seed: u64 = seed.parse().with_context(|| format!("CHASE_SEED is not a number: {seed:?}"))?;
            info!(seed, "Using fixed seed");
            SmallRng::seed_from_u64(seed)
        }
        Err(_) => SmallRng::from_os_rng(),
    };

    let maze = Maze::classic()?;
    let mut round = Round::new(maze, config, rng)?;
    round.start_round();

    info!(frame_ms = LOOP_TIME.as_secs_f32() * 1000.0, "Starting headless run");

    let mut elapsed = Duration::ZERO;
    let mut last_cell = None;
    while elapsed < TIME_LIMIT {
        if last_cell != Some(round.agent().cell) {
            last_cell = Some(round.agent().cell);
            if let Some(direction) = autopilot(&round) {
                round.queue_direction(direction);
            }
        }

        round.tick(LOOP_TIME);
        elapsed += LOOP_TIME;

        let mut finished = false;
        for event in round.drain_events() {
            match event {
                RoundEvent::PelletEaten { .. } => debug!(?event, "Round event"),
                RoundEvent::MazeCleared { .. } | RoundEvent::GameOver { .. } => {
                    info!(?event, "Round event");
                    finished = true;
                }
                _ => info!(?event, "Round event"),
            }
        }
        if finished {
            break;
        }
    }

    let snapshot = round.snapshot();
    println!("{}", snapshot.render(round.maze()));
    println!(
        "Score: {}  Lives: {}  Pellets left: {}  Time: {:.1}s",
        snapshot.score.separate_with_commas(),
        snapshot.lives,
        snapshot.remaining_pellets(),
        elapsed.as_secs_f32()
    );

    round.teardown();
    Ok(())
}

/// Heads for the closest pellet, steering around pursuers that are not frightened.
fn autopilot(round: &Round) -> Option<Direction> {
    let agent = round.agent().cell;
    let dangerous: Vec<Cell> = round
        .pursuers()
        .iter()
        .filter(|pursuer| pursuer.follows_phase())
        .map(|pursuer| pursuer.cell)
        .collect();
    let is_blocked = |cell: Cell| dangerous.contains(&cell);

    let next = round
        .ledger()
        .remaining_cells()
        .filter(|&(cell, _)| cell != agent)
        .filter_map(|(cell, _)| path::shortest_path(round.maze(), agent, cell, is_blocked))
        .min_by_key(|route| route.len())
        .and_then(|route| route.get(1).copied())?;

    Direction::DIRECTIONS.into_iter().find(|&direction| agent.step(direction) == next)
}
