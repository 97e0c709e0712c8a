//! Terminal lifecycle and input polling
//!
//! Raw mode, the alternate screen and mouse capture are switched on in
//! `enter` and off in `exit` (or on drop). Polling doubles as the frame
//! clock: when no input arrives within the tick rate a `Tick` is produced.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

/// Input relevant to the app, or a timeout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Nothing arrived within the tick rate
    Tick,
    /// Input the app has no use for
    Ignored,
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            // Release and repeat events (Windows reports both)
            Event::Key(key) if key.kind != KeyEventKind::Press => TuiEvent::Ignored,
            Event::Key(key) => TuiEvent::Key(key),
            // Plain motion without a button is not a press or drag
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => TuiEvent::Ignored,
            Event::Mouse(mouse) => TuiEvent::Mouse(mouse),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            _ => TuiEvent::Ignored,
        }
    }
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(33),
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.active = true;
        self.terminal.clear()?;
        tracing::debug!("terminal entered");
        Ok(())
    }

    /// Restore the terminal; safe to call more than once
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        tracing::debug!("terminal restored");
        Ok(())
    }

    /// Wait up to one tick for input
    pub fn next_event(&self) -> Result<TuiEvent> {
        if !event::poll(self.tick_rate)? {
            return Ok(TuiEvent::Tick);
        }
        Ok(TuiEvent::from(event::read()?))
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_releases_are_ignored() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(TuiEvent::from(Event::Key(press)), TuiEvent::Key(press));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert_eq!(TuiEvent::from(Event::Key(release)), TuiEvent::Ignored);
    }

    #[test]
    fn test_buttonless_motion_is_ignored() {
        assert_eq!(TuiEvent::from(mouse(MouseEventKind::Moved)), TuiEvent::Ignored);
        assert!(matches!(
            TuiEvent::from(mouse(MouseEventKind::Drag(MouseButton::Left))),
            TuiEvent::Mouse(_)
        ));
    }

    #[test]
    fn test_resize_passes_through() {
        assert_eq!(TuiEvent::from(Event::Resize(80, 24)), TuiEvent::Resize(80, 24));
        assert_eq!(TuiEvent::from(Event::FocusLost), TuiEvent::Ignored);
    }
}
