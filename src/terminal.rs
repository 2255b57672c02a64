//! crossterm-backed implementations of the display and input seams
//!
//! Everything device-specific lives here: alternate screen, raw mode, color
//! mapping and key decoding. The simulation core never sees any of it.

use crate::runner::{Command, Controls};
use crate::screen::Screen;
use crate::types::{ColorPair, Heading, Position};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// A [`Screen`] writing to the real terminal
///
/// Enters the alternate screen and raw mode on construction and restores
/// both when dropped, so a crash never leaves the shell unusable.
#[derive(Debug)]
pub struct TerminalScreen {
    stdout: Stdout,
    rows: u16,
    cols: u16,
}

impl TerminalScreen {
    /// takes over the terminal
    pub fn new() -> io::Result<TerminalScreen> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        let (cols, rows) = terminal::size()?;
        Ok(TerminalScreen { stdout, rows, cols })
    }

    fn color_for(color: ColorPair) -> Color {
        match color {
            ColorPair::FreeCell => Color::Reset,
            ColorPair::Barrier => Color::Red,
            ColorPair::FoodSmall => Color::Yellow,
            ColorPair::FoodMedium => Color::Cyan,
            ColorPair::FoodLarge => Color::Magenta,
            ColorPair::UserWorm => Color::Green,
        }
    }
}

impl Screen for TerminalScreen {
    fn render_cell(&mut self, pos: Position, symbol: char, color: ColorPair) {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.x as u16, pos.y as u16),
            SetForegroundColor(Self::color_for(color)),
            Print(symbol)
        )
        .expect("error writing to the terminal");
    }

    fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn show_dialog(&mut self, message: &str, prompt: &str) {
        self.status(&format!("{} ({})", message, prompt));
        self.present();
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break,
                Ok(_) => {}
                Err(_) => break,
            }
        }
    }

    fn status(&mut self, text: &str) {
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.rows.saturating_sub(1)),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Reset),
            Print(text)
        )
        .expect("error writing to the terminal");
    }

    fn present(&mut self) {
        self.stdout.flush().expect("error flushing the terminal");
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// A [`Controls`] reading the keyboard through crossterm
///
/// Arrows and WASD steer, `q`, Esc and Ctrl-C quit. All events pending
/// since the last tick are drained; a quit wins over any turn, a later turn
/// wins over an earlier one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalControls;

impl TerminalControls {
    /// makes the keyboard poller
    pub fn new() -> TerminalControls {
        TerminalControls
    }
}

impl Controls for TerminalControls {
    fn poll(&mut self) -> Option<Command> {
        let mut turn = None;
        while event::poll(Duration::from_millis(0)).unwrap_or(false) {
            let event = match event::read() {
                Ok(event) => event,
                Err(_) => break,
            };
            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match map_key(&key) {
                    Some(Command::Quit) => return Some(Command::Quit),
                    Some(command) => turn = Some(command),
                    None => {}
                }
            }
        }
        turn
    }
}

fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Turn(Heading::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Turn(Heading::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Turn(Heading::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Turn(Heading::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(Command::Turn(Heading::Up)));
        assert_eq!(
            map_key(&press(KeyCode::Char('d'))),
            Some(Command::Turn(Heading::Right))
        );
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('z'))), None);
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }
}
