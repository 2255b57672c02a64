//! The worm engine: a fixed-capacity ring buffer of body segments and the
//! per-tick movement, growth and collision algorithm
//!
//! The body never reallocates and the head advances in O(1): positions live
//! in a fixed array used circularly, with the head index moving `+1 mod
//! current_length` on every successful move. The logical length only ever
//! grows (up to capacity), and `populated` counts how many slots movement
//! has claimed so far, which is what makes the level-start animation work:
//! the worm appears to lengthen from a single dot until every slot of the
//! initial window has been written once.
//!
//! Because the head always advances to `(head + 1) % current_length` and the
//! length only grows, slots are first written in increasing index order: the
//! populated slots always form the prefix `0..populated`. That one fact
//! stands in for an unused-position sentinel value.

use crate::board::{Board, CellKind, FoodTier};
use crate::screen::Screen;
use crate::types::{
    ColorPair, GameState, Heading, Position, SYMBOL_FREE_CELL, SYMBOL_WORM_HEAD,
    SYMBOL_WORM_INNER, SYMBOL_WORM_TAIL,
};
use tracing::{instrument, trace};

/// default number of ring slots a worm is created with
pub const WORM_CAPACITY: usize = 20;

/// The worm: its ring-buffer body, heading and color identity
#[derive(Debug, Clone)]
pub struct Worm {
    positions: Box<[Position]>,
    /// ring modulus; grows monotonically, never past `positions.len()`
    current_length: usize,
    /// slots ever written; always a prefix of the array
    populated: usize,
    head_index: usize,
    heading: Heading,
    color: ColorPair,
}

impl Worm {
    /// Creates a worm with `capacity` ring slots, `initial_length` of which
    /// form the active window. Only the head slot holds a position at first;
    /// the rest of the window is claimed tick by tick as the worm moves
    /// (the grow-in animation).
    ///
    /// `capacity` must be positive and `initial_length` within
    /// `1..=capacity`; both are clamped in release builds.
    pub fn new(
        capacity: usize,
        initial_length: usize,
        head: Position,
        heading: Heading,
        color: ColorPair,
    ) -> Worm {
        debug_assert!(capacity >= 1);
        debug_assert!(initial_length >= 1 && initial_length <= capacity);
        let capacity = capacity.max(1);
        let current_length = initial_length.max(1).min(capacity);
        let mut positions = vec![Position::new(0, 0); capacity].into_boxed_slice();
        positions[0] = head;
        Worm {
            positions,
            current_length,
            populated: 1,
            head_index: 0,
            heading,
            color,
        }
    }

    /// Advances the worm by one tick and reports the outcome.
    ///
    /// On anything but [`GameState::Ongoing`] neither the body nor the board
    /// is touched; the caller is expected to end the level. On `Ongoing` the
    /// oldest segment's cell is reclaimed first, then the head advances and
    /// its new cell is marked used on the board, so the board reads
    /// consistently after every tick even when the head claims the cell the
    /// tail just left.
    #[instrument(level = "trace", skip_all)]
    pub fn step(&mut self, board: &mut Board, screen: &mut dyn Screen) -> GameState {
        let candidate = self.head_position().add_vec(self.heading.to_vector());
        if !board.contains(candidate) {
            return GameState::OutOfBounds;
        }

        let tail_slot = self.tail_slot();
        let tail_vacates = tail_slot < self.populated;
        let onto_vacating_tail = tail_vacates && self.positions[tail_slot] == candidate;

        let mut eaten: Option<FoodTier> = None;
        if !onto_vacating_tail {
            if self.is_occupied_by_self(candidate) {
                return GameState::Crossing;
            }
            match board.content_at(candidate) {
                CellKind::Food(tier) => eaten = Some(tier),
                CellKind::Barrier => return GameState::Crash,
                CellKind::UsedByWorm => return GameState::Crossing,
                CellKind::Free => {}
            }
        }

        // reclaim the tail before the head is drawn; the tail slot was
        // computed against the pre-growth length, so the new head's cell is
        // never erased
        self.clean_tail(board, screen);
        if let Some(tier) = eaten {
            trace!(?tier, ?candidate, "food consumed");
            self.grow(tier.bonus());
            board.decrement_food_item_count();
        }

        self.head_index = (self.head_index + 1) % self.current_length;
        if self.head_index == self.populated {
            self.populated += 1;
        }
        self.positions[self.head_index] = candidate;
        board.place_item(
            screen,
            candidate,
            CellKind::UsedByWorm,
            SYMBOL_WORM_HEAD,
            self.color,
        );
        GameState::Ongoing
    }

    /// Reclaims the cell of the oldest active segment, the slot the head
    /// claims next in ring order. Does nothing while that slot has never
    /// been written (the grow-in window, and the ticks right after a meal).
    pub fn clean_tail(&self, board: &mut Board, screen: &mut dyn Screen) {
        let tail_slot = self.tail_slot();
        if tail_slot < self.populated {
            board.place_item(
                screen,
                self.positions[tail_slot],
                CellKind::Free,
                SYMBOL_FREE_CELL,
                ColorPair::FreeCell,
            );
        }
    }

    /// Checks whether `pos` is covered by an active segment, skipping the
    /// about-to-vacate tail element: stepping onto the cell the tail leaves
    /// this very tick is not a collision.
    pub fn is_occupied_by_self(&self, pos: Position) -> bool {
        let tail_slot = self.tail_slot();
        let mut idx = self.head_index;
        for _ in 0..self.populated {
            if idx != tail_slot && self.positions[idx] == pos {
                return true;
            }
            idx = self.ring_prev(idx);
        }
        false
    }

    /// Widens the active window by `bonus` segments. Saturates at capacity;
    /// growing past it is not an error.
    pub fn grow(&mut self, bonus: usize) {
        self.current_length = (self.current_length + bonus).min(self.positions.len());
    }

    /// Draws the whole body, head first: distinct glyphs for the head, the
    /// inner elements and the tail. The walk covers exactly the populated
    /// slots, so it never wraps into ring slots movement has not claimed.
    pub fn render(&self, board: &mut Board, screen: &mut dyn Screen) {
        let mut idx = self.head_index;
        for n in 0..self.populated {
            let symbol = if n == 0 {
                SYMBOL_WORM_HEAD
            } else if n == self.populated - 1 {
                SYMBOL_WORM_TAIL
            } else {
                SYMBOL_WORM_INNER
            };
            board.place_item(screen, self.positions[idx], CellKind::UsedByWorm, symbol, self.color);
            idx = self.ring_prev(idx);
        }
    }

    /// sets the worm's heading; any cardinal direction is accepted, even a
    /// reversal (rejecting those is the game loop's policy, not ours)
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// the current heading
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// the color identity this worm renders with
    pub fn color(&self) -> ColorPair {
        self.color
    }

    /// where the head currently is
    pub fn head_position(&self) -> Position {
        self.positions[self.head_index]
    }

    /// the active window size; at least 1, at most the capacity
    pub fn length(&self) -> usize {
        self.current_length
    }

    /// how many ring slots this worm can ever hold
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// positions of the segments currently on the board, head first
    pub fn body_positions(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.populated);
        let mut idx = self.head_index;
        for _ in 0..self.populated {
            out.push(self.positions[idx]);
            idx = self.ring_prev(idx);
        }
        out
    }

    /// the slot holding the oldest active segment once the window is full
    fn tail_slot(&self) -> usize {
        (self.head_index + 1) % self.current_length
    }

    /// the next-older slot in ring order, hopping over the never-written gap
    /// between `populated` and `current_length`
    fn ring_prev(&self, idx: usize) -> usize {
        let prev = (idx + self.current_length - 1) % self.current_length;
        if prev >= self.populated {
            self.populated - 1
        } else {
            prev
        }
    }
}
