//! # Connect Four rules
//!
//! Rules engine for Connect Four on a padded 7x6 board. Win detection only
//! inspects the lines running through the piece that was just dropped.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: padded board, player, win detection, session state machine
//! - [`driver`]: Input loop reading column numbers and reporting the result
//! - [`render`]: Plain-text board output
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod render;
