//! various types shared by the board model and the worm engine: positions,
//! headings, game state codes and the glyph/color vocabulary spoken to the
//! display service
use serde::{Deserialize, Serialize};
use std::fmt;

/// glyph for a reclaimed (free) cell
pub const SYMBOL_FREE_CELL: char = ' ';
/// glyph for a barrier cell
pub const SYMBOL_BARRIER: char = '#';
/// glyph for the worm's head element
pub const SYMBOL_WORM_HEAD: char = '0';
/// glyph for an inner worm element
pub const SYMBOL_WORM_INNER: char = 'O';
/// glyph for the worm's tail element
pub const SYMBOL_WORM_TAIL: char = 'o';

/// A vector with which to do positional math, in (row, column) space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// row offset
    pub dy: i32,
    /// column offset
    pub dx: i32,
}

/// A cell coordinate on the board; `y` is the row, `x` the column, both
/// 0-indexed from the top-left corner like the terminal itself
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// row
    pub y: i32,
    /// column
    pub x: i32,
}

impl Position {
    /// makes a position from a row and a column
    pub fn new(y: i32, x: i32) -> Self {
        Position { y, x }
    }

    /// the position one `v` away from this one
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            y: self.y + v.dy,
            x: self.x + v.dx,
        }
    }
}

/// Represents a heading for the worm
///
/// Only the four cardinal directions exist; diagonal headings are not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Heading {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heading::Up => write!(f, "up"),
            Heading::Down => write!(f, "down"),
            Heading::Left => write!(f, "left"),
            Heading::Right => write!(f, "right"),
        }
    }
}

impl Heading {
    /// convert this heading to a (dy, dx) vector
    pub fn to_vector(self) -> Vector {
        match self {
            Heading::Up => Vector { dy: -1, dx: 0 },
            Heading::Down => Vector { dy: 1, dx: 0 },
            Heading::Left => Vector { dy: 0, dx: -1 },
            Heading::Right => Vector { dy: 0, dx: 1 },
        }
    }

    /// create a Heading from the given vector; anything that is not a unit
    /// step along exactly one axis is rejected
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { dy: -1, dx: 0 } => Some(Self::Up),
            Vector { dy: 1, dx: 0 } => Some(Self::Down),
            Vector { dy: 0, dx: -1 } => Some(Self::Left),
            Vector { dy: 0, dx: 1 } => Some(Self::Right),
            _ => None,
        }
    }

    /// returns all four headings
    pub fn all() -> [Heading; 4] {
        [Heading::Up, Heading::Down, Heading::Left, Heading::Right]
    }

    /// converts this heading to a usize index, in the same order as
    /// [`Heading::all`]
    pub fn as_index(&self) -> usize {
        match self {
            Heading::Up => 0,
            Heading::Down => 1,
            Heading::Left => 2,
            Heading::Right => 3,
        }
    }

    /// checks that a given heading is not opposite this one. e.g. Up is not
    /// opposite to Left, but is opposite to Down. Game loops use this to
    /// filter out inputs that would reverse the worm into its own neck; the
    /// engine itself accepts any heading.
    pub fn is_not_opposite(&self, other: &Heading) -> bool {
        !matches!(
            (self, other),
            (Heading::Up, Heading::Down)
                | (Heading::Down, Heading::Up)
                | (Heading::Left, Heading::Right)
                | (Heading::Right, Heading::Left)
        )
    }
}

/// Game state codes returned by the engine after each tick
///
/// Everything except `Ongoing` is terminal: once observed, the game loop
/// must stop stepping the worm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// the game goes on
    Ongoing,
    /// the worm left the board
    OutOfBounds,
    /// the worm's head crossed another worm element
    Crossing,
    /// the worm's head hit a barrier
    Crash,
    /// the user asked to quit; set by the game loop, never by the engine
    Quit,
}

impl GameState {
    /// whether this state ends the game
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::Ongoing)
    }
}

/// Color identities handed to the display service
///
/// The terminal screen maps these to concrete colors; headless screens just
/// record them. In multi-worm variants each worm carries its own identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorPair {
    /// an empty cell
    FreeCell,
    /// barriers and the boundary line
    Barrier,
    /// tier-1 food
    FoodSmall,
    /// tier-2 food
    FoodMedium,
    /// tier-3 food
    FoodLarge,
    /// the player's worm
    UserWorm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_vector_round_trip() {
        for heading in Heading::all() {
            assert_eq!(Heading::from_vector(heading.to_vector()), Some(heading));
        }
    }

    #[test]
    fn test_from_vector_rejects_non_cardinal() {
        assert_eq!(Heading::from_vector(Vector { dy: 0, dx: 0 }), None);
        assert_eq!(Heading::from_vector(Vector { dy: 1, dx: 1 }), None);
        assert_eq!(Heading::from_vector(Vector { dy: -2, dx: 0 }), None);
    }

    #[test]
    fn test_indices_match_all_order() {
        for (i, heading) in Heading::all().iter().enumerate() {
            assert_eq!(heading.as_index(), i);
        }
    }

    #[test]
    fn test_opposites() {
        assert!(!Heading::Up.is_not_opposite(&Heading::Down));
        assert!(!Heading::Left.is_not_opposite(&Heading::Right));
        assert!(Heading::Up.is_not_opposite(&Heading::Left));
        assert!(Heading::Right.is_not_opposite(&Heading::Right));
    }

    #[test]
    fn test_only_ongoing_continues() {
        assert!(!GameState::Ongoing.is_terminal());
        for state in [
            GameState::OutOfBounds,
            GameState::Crossing,
            GameState::Crash,
            GameState::Quit,
        ]
        .iter()
        {
            assert!(state.is_terminal());
        }
    }

    #[test]
    fn test_position_math() {
        let pos = Position::new(2, 3);
        let moved = pos.add_vec(Heading::Right.to_vector());
        assert_eq!(moved, Position::new(2, 4));
        assert_eq!(moved.add_vec(Heading::Up.to_vector()), Position::new(1, 4));
    }
}
