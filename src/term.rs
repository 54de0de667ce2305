use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use tracing::debug;

use crate::error::GameError;
use crate::{Coords, TermInt};

/// Owns the terminal while a game is running. Whatever `setup` changes is
/// put back by `restore`, at most once, and again on drop if nobody did.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self, GameError> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> Result<(), GameError> {
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        // Keep going on failure so one broken step doesn't leave the rest behind.
        let raw = terminal::disable_raw_mode();
        let screen = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        debug!("terminal restored");

        raw?;
        screen?;
        Ok(())
    }

    /// Drains every key press that arrives within `window` of each other.
    pub fn read_key_events_queue(&self, window: Duration) -> Result<Vec<KeyEvent>, GameError> {
        let mut events = vec![];

        while poll(window)? {
            match read()? {
                Event::Key(ev) if ev.kind != KeyEventKind::Release => events.push(ev),
                other => debug!(?other, "ignoring terminal event"),
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> Result<(), GameError> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), GameError> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
