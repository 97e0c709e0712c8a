//! Help overlay listing keyboard and mouse controls

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Columns",
        &[
            ("h / ←", "Previous column"),
            ("l / →", "Next column"),
            ("g / G", "First / last column"),
            ("[ / ]", "Scroll one column"),
            ("Enter", "Breakdown of the selected column"),
        ],
    ),
    (
        "Mouse",
        &[
            ("Click", "Select a column"),
            ("Hold", "Show the segment under the pointer"),
            ("Hold + drag", "Follow the pointer across segments"),
            ("Wheel", "Scroll columns"),
        ],
    ),
    (
        "Animation",
        &[
            ("r", "Replay the entry animation"),
            ("d", "Next direction: top-down, bottom-up, none"),
            ("u", "Put every segment back where it started"),
        ],
    ),
    (
        "General",
        &[
            ("?", "This help"),
            ("q / Esc", "Quit"),
            ("Ctrl+c", "Quit without asking"),
        ],
    ),
];

const KEY_COLUMN: usize = 14;

/// Scrollable list of controls
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.scroll_offset = 0;
                return Ok(Some(Action::CloseModal));
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1)
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = help_lines();
        let total = lines.len();
        let popup = centered_popup(area, 60, (total as u16).saturating_add(2));
        let visible = usize::from(popup.height.saturating_sub(2));

        self.scroll_offset = self.scroll_offset.min(total.saturating_sub(visible));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan))
                        .title(" Controls ")
                        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                )
                .scroll((self.scroll_offset as u16, 0)),
            popup,
        );

        if total > visible {
            let mut state =
                ScrollbarState::new(total.saturating_sub(visible)).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }
        Ok(())
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (title, shortcuts) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!(" {title}"), heading)));
        for (key, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:width$}", key, width = KEY_COLUMN), key_style),
                Span::raw(*description),
            ]));
        }
    }
    lines
}
