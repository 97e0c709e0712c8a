//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, BarGraphComponent, ColumnDetailDialog, HelpDialog, QuitDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::GraphData;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main application state - coordinates between components
pub struct App {
    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Transient message shown in place of the status line
    pub status_message: Option<String>,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Where the data came from, shown in the header
    pub source: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub graph: BarGraphComponent,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
    pub column_detail: ColumnDetailDialog,
}

impl App {
    /// Create the app for a config and a data set
    pub fn new(config: &Config, data: GraphData<String>, source: impl Into<String>) -> Result<App> {
        let layout = config.layout()?;
        Ok(App {
            should_quit: false,
            status_message: None,
            modals: ModalStack::new(),
            source: source.into(),
            graph: BarGraphComponent::new(layout, data)?,
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
            column_detail: ColumnDetailDialog,
        })
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ColumnDetail { .. } => self.column_detail.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::ColumnDetail { column } => {
                self.column_detail
                    .draw_with_graph(frame, area, &self.graph.graph, *column)
            }
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }

    fn header_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                " stackbar ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " {} · {} columns",
                    self.source,
                    self.graph.graph.column_count()
                ),
                Style::default().fg(Color::Gray),
            ),
        ])
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.graph.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.graph.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::debug!(%action, "handling action");
        }
        match action {
            Action::ForceQuit => {
                self.should_quit = true;
                Ok(None)
            }
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
                Ok(None)
            }
            Action::OpenHelp => {
                self.modals.push(Modal::Help);
                Ok(None)
            }
            Action::OpenColumnDetail => {
                match self.graph.graph.selected() {
                    Some(column) => {
                        self.status_message = None;
                        self.modals.push(Modal::ColumnDetail { column });
                    }
                    None => {
                        self.status_message = Some("Select a column first".to_string());
                    }
                }
                Ok(None)
            }
            Action::CloseModal => {
                self.modals.pop();
                Ok(None)
            }
            Action::Resize(..) => Ok(None),
            Action::Tick => self.graph.update(action),
            other => {
                self.status_message = None;
                self.graph.update(other)
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let column_height = self
            .graph
            .graph
            .layout()
            .map(|layout| layout.column_height().ceil() as u16)
            .unwrap_or(0);
        let main = calculate_main_layout(area, column_height);

        frame.render_widget(Paragraph::new(self.header_line()), main.header);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let graph_area = block.inner(main.graph);
        frame.render_widget(block, main.graph);
        self.graph.draw(frame, graph_area)?;

        let status = match &self.status_message {
            Some(message) => Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Red),
            )),
            None => self.graph.status_line(),
        };
        frame.render_widget(Paragraph::new(status), main.status);

        let help = Line::from(Span::styled(
            " ←/→ select  Enter details  hold mouse on a bar to inspect  r replay  d direction  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(help), main.help);

        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }

        Ok(())
    }
}
