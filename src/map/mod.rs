//! This module defines the maze and provides functions for navigating it.

pub mod direction;
pub mod maze;
pub mod parser;
pub mod path;
