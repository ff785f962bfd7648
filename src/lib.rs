//! Simulation core for a grid-maze chase game.
//!
//! An agent collects pellets in a walled maze while four pursuers hunt it down, each with its own targeting
//! rule. [`game::Round`] runs the whole thing; hosts feed it input and frame time and read back
//! [`game::snapshot::Snapshot`]s to draw.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod game;
pub mod host;
pub mod logging;
pub mod map;
