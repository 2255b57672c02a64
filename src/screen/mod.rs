//! the display seam: everything the simulation ever shows goes through the
//! [`Screen`] trait, so the core stays testable without a terminal

use crate::types::{ColorPair, Position};
use fxhash::FxHashMap;

/// The display service the simulation renders through
///
/// Implementations own the device; the core never touches it directly. A
/// crossterm-backed implementation lives in [`crate::terminal`], a headless
/// one below.
pub trait Screen {
    /// writes a single glyph with a color identity at a board coordinate.
    /// Idempotent, no side effect beyond the visible cell.
    fn render_cell(&mut self, pos: Position, symbol: char, color: ColorPair);

    /// usable display size as (rows, cols); queried once at board
    /// initialization
    fn size(&self) -> (u16, u16);

    /// shows `message` and blocks until the user acknowledges `prompt`.
    /// Only used on fatal setup paths and at the end of a game.
    fn show_dialog(&mut self, message: &str, prompt: &str);

    /// one line of status text in the message area below the board
    fn status(&mut self, text: &str);

    /// flushes buffered writes to the device
    fn present(&mut self);
}

/// A fixed-size headless screen that records every write
///
/// Tests assert against the recorded cells to check that board truth and
/// rendered glyphs stay in sync; benches use it to drive the engine without
/// a terminal. Dialogs acknowledge themselves immediately.
#[derive(Debug)]
pub struct RecordingScreen {
    rows: u16,
    cols: u16,
    cells: FxHashMap<Position, (char, ColorPair)>,
    dialogs: Vec<(String, String)>,
    statuses: Vec<String>,
}

impl RecordingScreen {
    /// makes a screen pretending to be `rows` by `cols` cells big
    pub fn new(rows: u16, cols: u16) -> Self {
        RecordingScreen {
            rows,
            cols,
            cells: FxHashMap::default(),
            dialogs: Vec::new(),
            statuses: Vec::new(),
        }
    }

    /// the last glyph and color rendered at `pos`, if any write ever hit it
    pub fn cell(&self, pos: Position) -> Option<(char, ColorPair)> {
        self.cells.get(&pos).copied()
    }

    /// every dialog shown so far, as (message, prompt) pairs
    pub fn dialogs(&self) -> &[(String, String)] {
        &self.dialogs
    }

    /// every status line written so far
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }
}

impl Screen for RecordingScreen {
    fn render_cell(&mut self, pos: Position, symbol: char, color: ColorPair) {
        self.cells.insert(pos, (symbol, color));
    }

    fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn show_dialog(&mut self, message: &str, prompt: &str) {
        self.dialogs.push((message.to_string(), prompt.to_string()));
    }

    fn status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }

    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_last_write_per_cell() {
        let mut screen = RecordingScreen::new(10, 10);
        let pos = Position::new(1, 2);
        screen.render_cell(pos, '#', ColorPair::Barrier);
        screen.render_cell(pos, ' ', ColorPair::FreeCell);
        assert_eq!(screen.cell(pos), Some((' ', ColorPair::FreeCell)));
        assert_eq!(screen.cell(Position::new(0, 0)), None);
    }

    #[test]
    fn test_records_dialogs_and_statuses() {
        let mut screen = RecordingScreen::new(5, 5);
        assert_eq!(screen.size(), (5, 5));
        screen.show_dialog("too small", "press a key");
        screen.status("length 5");
        assert_eq!(screen.dialogs().len(), 1);
        assert_eq!(screen.statuses(), ["length 5".to_string()]);
    }
}
