#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Simulation core for a terminal rendition of the classic worm game.
//! The interesting parts are the [`board`] module, which owns grid truth
//! and keeps it in sync with whatever is on screen, and the [`worm`]
//! module, a fixed-capacity ring buffer with the movement, growth and
//! collision algorithm that runs once per tick. Rendering goes through the
//! [`screen::Screen`] trait, so the whole game plays headlessly in tests
//! and benches; the `worm` binary wires it to a crossterm terminal.

use board::Level;

pub mod board;
pub mod runner;
pub mod screen;
pub mod terminal;
pub mod types;
pub mod worm;

/// Loads a level from a given string
pub fn level_fixture(level_fixture: &str) -> Level {
    let l: Result<Level, _> = serde_json::from_str(level_fixture);
    l.expect("the json literal is valid")
}
