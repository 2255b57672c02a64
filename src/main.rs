//! the `worm` binary: argument parsing, logging and terminal wiring around
//! the game loop

use clap::Parser;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use worm_engine::runner::{self, GameConfig, LevelKind};
use worm_engine::screen::Screen;
use worm_engine::terminal::{TerminalControls, TerminalScreen};
use worm_engine::types::GameState;

/// A terminal rendition of the classic worm game
#[derive(Parser, Debug)]
#[command(name = "worm", version, about)]
struct Args {
    /// milliseconds to sleep between ticks
    #[arg(long, default_value_t = 100)]
    nap_ms: u64,

    /// maximum number of body segments
    #[arg(long, default_value_t = 20)]
    capacity: usize,

    /// segments the worm starts with
    #[arg(long, default_value_t = 5)]
    initial_length: usize,

    /// scatter the food randomly instead of the classic layout
    #[arg(long)]
    random_level: bool,

    /// seed for --random-level
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    // logs go to stderr so the alternate screen stays clean; enable with
    // e.g. WORM_LOG=debug and redirect stderr to a file
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("WORM_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let capacity = args.capacity.max(1);
    let config = GameConfig {
        capacity,
        initial_length: args.initial_length.max(1).min(capacity),
        nap: Duration::from_millis(args.nap_ms),
        level: if args.random_level {
            LevelKind::Random { seed: args.seed }
        } else {
            LevelKind::Classic
        },
    };

    let mut screen = TerminalScreen::new().expect("error taking over the terminal");
    let mut controls = TerminalControls::new();

    match runner::run(&mut screen, &mut controls, &config) {
        Err(_) => {
            // the board already showed the too-small dialog
            drop(screen);
            process::exit(1);
        }
        Ok(summary) => {
            let message = match summary.state {
                GameState::Ongoing => "you cleared the level".to_string(),
                GameState::OutOfBounds => "the worm left the board".to_string(),
                GameState::Crossing => "the worm crossed itself".to_string(),
                GameState::Crash => "the worm crashed into a barrier".to_string(),
                GameState::Quit => "bye".to_string(),
            };
            screen.show_dialog(
                &format!("{}, final length {}", message, summary.length),
                "press any key to exit",
            );
        }
    }
}
