//! The game loop: pacing, input, policy and level-clear detection
//!
//! The engine decides what a move does; this module decides when moves
//! happen and which inputs reach the worm. In particular the reversal rule
//! lives here: a heading that would turn the worm straight into its own
//! neck is dropped, the engine itself would happily accept it.

use crate::board::{Board, BoardTooSmall, Level};
use crate::screen::Screen;
use crate::types::{ColorPair, GameState, Heading, Position};
use crate::worm::{Worm, WORM_CAPACITY};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// one polled input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// steer the worm
    Turn(Heading),
    /// leave the game
    Quit,
}

/// The input seam for the game loop
///
/// `poll` must not block; it is called once per tick. When several keys
/// piled up since the last tick, implementations should hand back the most
/// relevant one (a quit beats a turn, a late turn beats an early one).
pub trait Controls {
    /// the pending command, if any
    fn poll(&mut self) -> Option<Command>;
}

/// Replays a fixed command sequence, one command per poll; handy for tests
#[derive(Debug, Default)]
pub struct ScriptedControls {
    queue: VecDeque<Command>,
}

impl ScriptedControls {
    /// queues `commands` in order
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        ScriptedControls {
            queue: commands.into_iter().collect(),
        }
    }
}

impl Controls for ScriptedControls {
    fn poll(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }
}

/// which level layout to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelKind {
    /// the fixed layout the game shipped with
    Classic,
    /// classic barriers, food scattered by a seeded RNG
    Random {
        /// seed for the scatter
        seed: u64,
    },
    /// a caller-provided layout
    Custom(Level),
}

/// knobs for one game session
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// ring slots the worm is created with
    pub capacity: usize,
    /// active window size at the start
    pub initial_length: usize,
    /// how long to sleep between ticks
    pub nap: Duration,
    /// the level layout to play
    pub level: LevelKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            capacity: WORM_CAPACITY,
            initial_length: 5,
            nap: Duration::from_millis(100),
            level: LevelKind::Classic,
        }
    }
}

/// What the game loop hands back when the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    /// the state that ended the game. `Ongoing` here means the worm ate
    /// every food item and cleared the level.
    pub state: GameState,
    /// final window length of the worm
    pub length: usize,
    /// food items left on the board
    pub food_remaining: u32,
    /// where the head ended up
    pub head: Position,
}

/// Plays one session: board and level setup, then tick after tick until a
/// terminal state shows up or the board runs out of food.
pub fn run(
    screen: &mut dyn Screen,
    controls: &mut dyn Controls,
    config: &GameConfig,
) -> Result<GameSummary, BoardTooSmall> {
    let mut board = Board::initialize(screen)?;
    let level = match &config.level {
        LevelKind::Classic => Level::classic(board.last_row(), board.last_col()),
        LevelKind::Random { seed } => {
            let mut rng = SmallRng::seed_from_u64(*seed);
            Level::random(&mut rng, board.last_row(), board.last_col())
        }
        LevelKind::Custom(level) => level.clone(),
    };
    board.initialize_level(screen, &level);

    let start = Position::new(board.last_row() / 2, board.last_col() / 2);
    let mut worm = Worm::new(
        config.capacity,
        config.initial_length,
        start,
        Heading::Right,
        ColorPair::UserWorm,
    );
    worm.render(&mut board, screen);

    let mut state = GameState::Ongoing;
    while state == GameState::Ongoing {
        screen.status(&format!(
            "length {:2}   food left {:2}   (arrows steer, q quits)",
            worm.length(),
            board.food_item_count()
        ));
        screen.present();
        thread::sleep(config.nap);

        match controls.poll() {
            Some(Command::Turn(heading)) => {
                // dropping reversals is this loop's policy, not the engine's
                if heading.is_not_opposite(&worm.heading()) {
                    worm.set_heading(heading);
                }
            }
            Some(Command::Quit) => {
                state = GameState::Quit;
                break;
            }
            None => {}
        }

        state = worm.step(&mut board, screen);
        if state == GameState::Ongoing {
            worm.render(&mut board, screen);
            if board.food_item_count() == 0 {
                break;
            }
        }
    }
    debug!(?state, length = worm.length(), "game finished");

    Ok(GameSummary {
        state,
        length: worm.length(),
        food_remaining: board.food_item_count(),
        head: worm.head_position(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::RecordingScreen;

    fn test_config() -> GameConfig {
        GameConfig {
            nap: Duration::from_millis(0),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_too_small_display_is_fatal() {
        let mut screen = RecordingScreen::new(4, 8);
        let mut controls = ScriptedControls::default();
        let err = run(&mut screen, &mut controls, &test_config());
        assert!(err.is_err());
        assert_eq!(screen.dialogs().len(), 1);
    }

    #[test]
    fn test_quit_ends_the_session() {
        let mut screen = RecordingScreen::new(30, 60);
        let mut controls = ScriptedControls::new(vec![Command::Quit]);
        let summary = run(&mut screen, &mut controls, &test_config()).unwrap();
        assert_eq!(summary.state, GameState::Quit);
        // quitting happened before the first step
        assert_eq!(summary.head, Position::new(13, 29));
        assert!(!screen.statuses().is_empty());
    }

    #[test]
    fn test_reversals_are_dropped_by_the_loop() {
        let mut screen = RecordingScreen::new(30, 60);
        // the worm starts heading right; the first command would reverse it
        // and is ignored, so the first step still moves right
        let mut controls =
            ScriptedControls::new(vec![Command::Turn(Heading::Left), Command::Quit]);
        let summary = run(&mut screen, &mut controls, &test_config()).unwrap();
        assert_eq!(summary.state, GameState::Quit);
        assert_eq!(summary.head, Position::new(13, 30));
    }

    #[test]
    fn test_unattended_worm_eventually_crashes() {
        let mut screen = RecordingScreen::new(30, 60);
        let mut controls = ScriptedControls::default();
        let summary = run(&mut screen, &mut controls, &test_config()).unwrap();
        // marching right from the center ends at the right-third barrier
        // segment of the classic layout, which crosses row 13 at column 38
        assert_eq!(summary.state, GameState::Crash);
        assert_eq!(summary.head, Position::new(13, 37));
    }

    #[test]
    fn test_eating_everything_clears_the_level() {
        use crate::board::FoodTier;

        let mut screen = RecordingScreen::new(13, 11);
        let mut controls = ScriptedControls::default();
        // the worm starts at (5,5) heading right and marches over the only
        // food item two cells ahead
        let config = GameConfig {
            level: LevelKind::Custom(Level {
                barriers: vec![],
                food: vec![(Position::new(5, 7), FoodTier::Medium)],
            }),
            ..test_config()
        };
        let summary = run(&mut screen, &mut controls, &config).unwrap();
        assert_eq!(summary.state, GameState::Ongoing);
        assert_eq!(summary.food_remaining, 0);
        assert_eq!(summary.length, 5 + FoodTier::Medium.bonus());
        assert_eq!(summary.head, Position::new(5, 7));
    }
}
