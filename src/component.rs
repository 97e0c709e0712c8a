//! The component contract shared by the graph and its dialogs
//!
//! Input handlers only translate events into `Action`s; state changes
//! happen in `update`, which may chain a follow-up action.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Called once before the first frame
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Mouse input in terminal cell coordinates
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Apply an action; the returned action is fed back in by the caller
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`
    ///
    /// Components that track where they were drawn (for mouse hit
    /// resolution) record `area` here.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
