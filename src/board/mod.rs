//! The board model: grid truth and screen synchronization
//!
//! The grid is the authoritative occupancy source. Whatever glyph was last
//! rendered at a cell is exactly what [`Board::content_at`] answers, because
//! every mutation funnels through [`Board::place_item`], which updates the
//! cell and issues the render call in one step. Nothing in this crate writes
//! to the display behind the grid's back.
mod level;

use crate::screen::Screen;
use crate::types::{ColorPair, Position, SYMBOL_BARRIER, SYMBOL_FREE_CELL};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument};

pub use level::Level;

/// guaranteed number of playable rows
pub const MIN_BOARD_ROWS: i32 = 3;
/// guaranteed number of playable columns
pub const MIN_BOARD_COLS: i32 = 10;
/// rows below the board reserved for the message area
pub const RESERVED_BOTTOM_ROWS: i32 = 2;

/// The reward tiers food cells come in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodTier {
    /// tier 1
    Small,
    /// tier 2
    Medium,
    /// tier 3
    Large,
}

impl FoodTier {
    /// how many segments the worm grows by when digesting this tier
    pub fn bonus(&self) -> usize {
        match self {
            FoodTier::Small => 1,
            FoodTier::Medium => 2,
            FoodTier::Large => 3,
        }
    }

    /// the glyph this tier renders as
    pub fn symbol(&self) -> char {
        match self {
            FoodTier::Small => '+',
            FoodTier::Medium => '$',
            FoodTier::Large => '%',
        }
    }

    /// the color identity this tier renders with
    pub fn color(&self) -> ColorPair {
        match self {
            FoodTier::Small => ColorPair::FoodSmall,
            FoodTier::Medium => ColorPair::FoodMedium,
            FoodTier::Large => ColorPair::FoodLarge,
        }
    }
}

/// classification of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// nothing here
    Free,
    /// a wall segment; hitting it crashes the worm
    Barrier,
    /// food of the given tier
    Food(FoodTier),
    /// covered by a worm element
    UsedByWorm,
}

/// The display area is smaller than the game needs
///
/// The only recoverable error in the crate; the game loop must treat it as
/// fatal to the session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("display too small: need at least {min_cols}x{min_rows}, have {cols}x{rows}")]
pub struct BoardTooSmall {
    /// rows the display offered
    pub rows: i32,
    /// columns the display offered
    pub cols: i32,
    /// rows required, message area included
    pub min_rows: i32,
    /// columns required
    pub min_cols: i32,
}

/// The playable grid, its occupancy and its food bookkeeping
#[derive(Debug, Clone)]
pub struct Board {
    last_row: i32,
    last_col: i32,
    cells: Vec<CellKind>,
    food_items: u32,
}

impl Board {
    /// Validates the display area and computes the board bounds from it,
    /// keeping [`RESERVED_BOTTOM_ROWS`] below the board for messages. On
    /// failure the dialog is shown through the screen before the error is
    /// returned; the caller must not start a game.
    pub fn initialize(screen: &mut dyn Screen) -> Result<Board, BoardTooSmall> {
        let (rows, cols) = screen.size();
        let (rows, cols) = (i32::from(rows), i32::from(cols));
        if cols < MIN_BOARD_COLS || rows < MIN_BOARD_ROWS + RESERVED_BOTTOM_ROWS {
            let err = BoardTooSmall {
                rows,
                cols,
                min_rows: MIN_BOARD_ROWS + RESERVED_BOTTOM_ROWS,
                min_cols: MIN_BOARD_COLS,
            };
            screen.show_dialog(&err.to_string(), "press any key to exit");
            return Err(err);
        }
        let last_row = rows - RESERVED_BOTTOM_ROWS - 1;
        let last_col = cols - 1;
        let cells = vec![CellKind::Free; ((last_row + 1) * (last_col + 1)) as usize];
        Ok(Board {
            last_row,
            last_col,
            cells,
            food_items: 0,
        })
    }

    /// Loads a level: clears every cell, draws the separator line below the
    /// board and the right-edge barrier column, then places the level's
    /// interior barriers and food. Placements outside the board are dropped.
    ///
    /// The food counter is derived by counting food cells afterwards, so it
    /// cannot drift from what was actually placed.
    #[instrument(level = "debug", skip_all)]
    pub fn initialize_level(&mut self, screen: &mut dyn Screen, level: &Level) {
        for (y, x) in (0..=self.last_row).cartesian_product(0..=self.last_col) {
            self.place_item(
                screen,
                Position::new(y, x),
                CellKind::Free,
                SYMBOL_FREE_CELL,
                ColorPair::FreeCell,
            );
        }
        // the separator lives outside the grid, so place_item cannot
        // address it
        for x in 0..=self.last_col {
            screen.render_cell(
                Position::new(self.last_row + 1, x),
                SYMBOL_BARRIER,
                ColorPair::Barrier,
            );
        }
        for y in 0..=self.last_row {
            self.place_item(
                screen,
                Position::new(y, self.last_col),
                CellKind::Barrier,
                SYMBOL_BARRIER,
                ColorPair::Barrier,
            );
        }
        for &pos in &level.barriers {
            if self.contains(pos) {
                self.place_item(screen, pos, CellKind::Barrier, SYMBOL_BARRIER, ColorPair::Barrier);
            }
        }
        for &(pos, tier) in &level.food {
            if self.contains(pos) && self.content_at(pos) == CellKind::Free {
                self.place_item(screen, pos, CellKind::Food(tier), tier.symbol(), tier.color());
            }
        }
        self.food_items = self
            .cells
            .iter()
            .filter(|cell| matches!(cell, CellKind::Food(_)))
            .count() as u32;
        debug!(food_items = self.food_items, "level initialized");
    }

    /// The single mutation primitive: stores `kind` at `pos` and renders
    /// `symbol` there in `color`. `pos` must be on the board.
    pub fn place_item(
        &mut self,
        screen: &mut dyn Screen,
        pos: Position,
        kind: CellKind,
        symbol: char,
        color: ColorPair,
    ) {
        debug_assert!(self.contains(pos));
        let idx = self.index(pos);
        self.cells[idx] = kind;
        screen.render_cell(pos, symbol, color);
    }

    /// the classification at `pos`; `pos` must be on the board
    pub fn content_at(&self, pos: Position) -> CellKind {
        debug_assert!(self.contains(pos));
        self.cells[self.index(pos)]
    }

    /// whether `pos` is within the playable grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.y >= 0 && pos.y <= self.last_row && pos.x >= 0 && pos.x <= self.last_col
    }

    /// the last usable row index
    pub fn last_row(&self) -> i32 {
        self.last_row
    }

    /// the last usable column index
    pub fn last_col(&self) -> i32 {
        self.last_col
    }

    /// the number of food items still on the board
    pub fn food_item_count(&self) -> u32 {
        self.food_items
    }

    /// overrides the food counter
    pub fn set_food_item_count(&mut self, n: u32) {
        self.food_items = n;
    }

    /// Records that one food item was consumed. Only call with a positive
    /// count; the counter never goes negative.
    pub fn decrement_food_item_count(&mut self) {
        debug_assert!(self.food_items > 0);
        self.food_items = self.food_items.saturating_sub(1);
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * (self.last_col + 1) as usize + pos.x as usize
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for y in 0..=self.last_row {
            for x in 0..=self.last_col {
                let glyph = match self.content_at(Position::new(y, x)) {
                    CellKind::Free => '.',
                    CellKind::Barrier => '#',
                    CellKind::Food(tier) => tier.symbol(),
                    CellKind::UsedByWorm => 'w',
                };
                write!(f, "{} ", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
