//! Bar graph component
//!
//! Binds the visible columns of a `BarGraph` to the terminal. One graph
//! unit is one terminal cell; each cell row is sampled twice so segment
//! edges land on half-cell boundaries.

use crate::action::Action;
use crate::component::Component;
use crate::graph::{BarGraph, GraphEvent, GraphLayout};
use crate::model::{hit_test, AnimationDirection, GraphData, SegmentHit};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthChar;

/// Bar graph component owning the widget state
pub struct BarGraphComponent {
    pub graph: BarGraph<String>,
    /// Area the graph was last drawn into
    area: Rect,
    /// Most recent interaction, for the status line
    last_event: Option<GraphEvent>,
}

impl BarGraphComponent {
    pub fn new(layout: GraphLayout, data: GraphData<String>) -> Result<Self> {
        let mut graph = BarGraph::with_layout(layout)?;
        graph.set_data(data)?;
        Ok(Self {
            graph,
            area: Rect::default(),
            last_event: None,
        })
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn last_event(&self) -> Option<GraphEvent> {
        self.last_event
    }

    /// Graph-space point at the center of a terminal cell
    fn to_graph(&self, column: u16, row: u16) -> (f64, f64) {
        (
            f64::from(column) - f64::from(self.area.x) + 0.5,
            f64::from(row) - f64::from(self.area.y) + 0.5,
        )
    }

    fn record(&mut self, events: Vec<GraphEvent>) {
        if let Some(event) = events.last() {
            self.last_event = Some(*event);
        }
    }

    fn move_selection(&mut self, target: impl FnOnce(Option<usize>, usize) -> usize) {
        let count = self.graph.column_count();
        if count == 0 {
            return;
        }
        let column = target(self.graph.selected(), count).min(count - 1);
        let events = self.graph.select_column(column);
        self.record(events);
    }

    /// Describe a segment as "payload 42.0%"
    pub fn describe_segment(&self, hit: SegmentHit) -> Option<String> {
        let segment = self
            .graph
            .segments()
            .segments_for_column(hit.column)
            .get(hit.index)?;
        let name = segment.payload().map(String::as_str).unwrap_or("segment");
        Some(format!("{} {:.1}%", name, segment.percentage() * 100.0))
    }

    /// Status line describing selection and long-press state
    pub fn status_line(&self) -> Line<'static> {
        let mut spans = Vec::new();

        match self.graph.selected() {
            Some(column) => spans.push(Span::styled(
                format!(" Column {} ({}) ", column + 1, self.graph.label_for(column)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            None => spans.push(Span::styled(
                " No column selected ",
                Style::default().fg(Color::DarkGray),
            )),
        }

        let press = match self.last_event {
            Some(GraphEvent::SegmentEntered(Some(hit))) => self.describe_segment(hit),
            Some(GraphEvent::SegmentEntered(None)) if self.graph.is_pressing() => {
                Some("no segment".to_string())
            }
            Some(GraphEvent::PressFinished) => Some("press finished".to_string()),
            _ => None,
        };
        if let Some(text) = press {
            spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(text, Style::default().fg(Color::Yellow)));
        }

        if let Some(layout) = self.graph.layout() {
            spans.push(Span::styled(
                format!(" │ animation: {}", layout.direction.name()),
                Style::default().fg(Color::DarkGray),
            ));
        }

        Line::from(spans)
    }

    fn cycle_direction(&mut self) -> Result<()> {
        let next = self
            .graph
            .layout()
            .map(|layout| layout.direction.next())
            .unwrap_or(AnimationDirection::BottomUp);
        self.graph.set_direction(next)?;
        tracing::info!(direction = next.name(), "animation direction changed");
        self.replay()
    }

    fn replay(&mut self) -> Result<()> {
        self.graph.replay();
        self.graph.bind_visible(f64::from(self.area.width), Instant::now())?;
        Ok(())
    }
}

impl Component for BarGraphComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstColumn),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastColumn),
            KeyCode::Char(']') | KeyCode::PageDown => Some(Action::ScrollRight),
            KeyCode::Char('[') | KeyCode::PageUp => Some(Action::ScrollLeft),
            KeyCode::Enter => Some(Action::OpenColumnDetail),
            KeyCode::Char('r') => Some(Action::ReplayAnimation),
            KeyCode::Char('u') => Some(Action::RevertAll),
            KeyCode::Char('d') => Some(Action::CycleDirection),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let inside = self.area.contains(Position::new(mouse.column, mouse.row));
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                Some(Action::PointerDown(mouse.column, mouse.row))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                Some(Action::PointerDrag(mouse.column, mouse.row))
            }
            MouseEventKind::Up(MouseButton::Left) => Some(Action::PointerUp),
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if inside => {
                Some(Action::ScrollRight)
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if inside => {
                Some(Action::ScrollLeft)
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                let now = Instant::now();
                self.graph.bind_visible(f64::from(self.area.width), now)?;
                self.graph.tick(now);
            }
            Action::PointerDown(column, row) => {
                let (x, y) = self.to_graph(column, row);
                let events = self.graph.pointer_down(x, y);
                self.record(events);
            }
            Action::PointerDrag(column, row) => {
                let (x, y) = self.to_graph(column, row);
                let events = self.graph.pointer_drag(x, y);
                self.record(events);
            }
            Action::PointerUp => {
                let events = self.graph.pointer_up();
                self.record(events);
            }
            Action::NextColumn => self.move_selection(|selected, _| match selected {
                Some(column) => column + 1,
                None => 0,
            }),
            Action::PrevColumn => {
                self.move_selection(|selected, _| selected.unwrap_or(0).saturating_sub(1))
            }
            Action::FirstColumn => self.move_selection(|_, _| 0),
            Action::LastColumn => self.move_selection(|_, count| count - 1),
            Action::ScrollLeft | Action::ScrollRight => {
                let stride = self
                    .graph
                    .grid()
                    .map(|grid| grid.stride())
                    .unwrap_or(1.0);
                let delta = if action == Action::ScrollLeft { -stride } else { stride };
                self.graph.scroll_by(delta);
            }
            Action::ReplayAnimation => self.replay()?,
            Action::RevertAll => {
                self.graph.revert_all();
                tracing::info!("reverted all segments");
            }
            Action::CycleDirection => self.cycle_direction()?,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.area = area;
        self.graph.bind_visible(f64::from(area.width), Instant::now())?;
        render_graph(&self.graph, area, frame.buffer_mut());
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Draw the bars and labels of every visible column into `area`
pub fn render_graph<T>(graph: &BarGraph<T>, area: Rect, buf: &mut Buffer) {
    let (Some(layout), Some(grid)) = (graph.layout(), graph.grid()) else {
        return;
    };
    let bar = layout.geometry().bar_frame();
    let bar_rows = (bar.bottom().ceil() as u16).min(area.height);
    let pressed = graph.pressed_segment();

    for dx in 0..area.width {
        let content_x = f64::from(dx) + 0.5 + graph.scroll();
        let Some((column, local_x)) = grid.column_at(content_x) else {
            continue;
        };
        if local_x < bar.x || local_x >= bar.x + bar.width {
            continue;
        }

        for dy in 0..bar_rows {
            let top = sample_color(graph, column, f64::from(dy) + 0.25);
            let bottom = sample_color(graph, column, f64::from(dy) + 0.75);
            let position = Position::new(area.x + dx, area.y + dy);
            paint_half_blocks(buf, position, top, bottom);
        }
    }

    if let Some(hit) = pressed {
        draw_press_marker(graph, hit, area, buf);
    }

    let label_row = area.y + bar_rows;
    if layout.label_size > 0.0 && label_row < area.bottom() {
        for column in graph.visible_columns() {
            draw_label(graph, layout, column, area, label_row, buf);
        }
    }
}

/// Color of the segment under a bar-local y, using the same rule as long-press
fn sample_color<T>(graph: &BarGraph<T>, column: usize, y: f64) -> Option<Color> {
    let hit = hit_test(graph.segments(), column, y)?;
    graph
        .segments()
        .segments_for_column(column)
        .get(hit.index)
        .map(|segment| segment.color())
}

fn paint_half_blocks(
    buf: &mut Buffer,
    position: Position,
    top: Option<Color>,
    bottom: Option<Color>,
) {
    let Some(cell) = buf.cell_mut(position) else {
        return;
    };
    match (top, bottom) {
        (None, None) => {}
        (Some(t), Some(b)) if t == b => {
            cell.set_symbol("█").set_fg(t);
        }
        (Some(t), None) => {
            cell.set_symbol("▀").set_fg(t);
        }
        (None, Some(b)) => {
            cell.set_symbol("▄").set_fg(b);
        }
        (Some(t), Some(b)) => {
            cell.set_symbol("▀").set_fg(t).set_bg(b);
        }
    }
}

/// Arrow left of the bar pointing at the pressed segment
fn draw_press_marker<T>(graph: &BarGraph<T>, hit: SegmentHit, area: Rect, buf: &mut Buffer) {
    let (Some(layout), Some(grid)) = (graph.layout(), graph.grid()) else {
        return;
    };
    let Some(segment) = graph
        .segments()
        .segments_for_column(hit.column)
        .get(hit.index)
    else {
        return;
    };

    let frame = segment.frame();
    let marker_x = grid.column_x(hit.column) + layout.geometry().bar_x() - 1.0 - graph.scroll();
    let marker_y = (frame.y + frame.height / 2.0).floor();
    if marker_x < 0.0 || marker_y < 0.0 {
        return;
    }

    let position = Position::new(
        area.x.saturating_add(marker_x as u16),
        area.y.saturating_add(marker_y as u16),
    );
    if area.contains(position) {
        if let Some(cell) = buf.cell_mut(position) {
            cell.set_symbol("▶").set_fg(Color::Yellow);
        }
    }
}

fn draw_label<T>(
    graph: &BarGraph<T>,
    layout: &GraphLayout,
    column: usize,
    area: Rect,
    row: u16,
    buf: &mut Buffer,
) {
    let Some(grid) = graph.grid() else {
        return;
    };
    let left = grid.column_x(column) - graph.scroll();
    // partially scrolled-off columns keep their bar but lose the label
    if left < 0.0 {
        return;
    }

    let column_cells = layout.column_width.floor() as usize;
    let (text, width) = fit_label(graph.label_for(column), column_cells);
    let x = area.x + left.round() as u16 + ((column_cells - width) / 2) as u16;
    if x >= area.right() {
        return;
    }

    let mut style = layout.label_style;
    if graph.selected() == Some(column) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let max_width = usize::from(area.right() - x);
    buf.set_stringn(x, row, text, max_width, style);
}

/// Truncate a label to `max_width` display cells
///
/// Returns the text and its display width.
pub fn fit_label(label: &str, max_width: usize) -> (String, usize) {
    let mut text = String::new();
    let mut width = 0;
    for ch in label.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        text.push(ch);
        width += ch_width;
    }
    (text, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fraction;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn layout() -> GraphLayout {
        GraphLayout {
            bar_length: 4.0,
            label_size: 1.0,
            bar_width: 2.0,
            column_width: 4.0,
            column_spacing: 1.0,
            label_style: Style::default(),
            default_color: Color::Gray,
            direction: AnimationDirection::None,
            duration: Duration::from_millis(100),
        }
    }

    fn data() -> GraphData<String> {
        let column = vec![
            Fraction::new(0.5)
                .with_color(Color::Red)
                .with_payload("Work".to_string()),
            Fraction::new(0.5).with_payload("Rest".to_string()),
        ];
        GraphData::new(
            vec![column.clone(), column.clone(), column],
            vec!["Mon".to_string(), "Tue".to_string()],
        )
    }

    fn render(component: &mut BarGraphComponent, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                component.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_renders_stacked_segments() {
        let mut component = BarGraphComponent::new(layout(), data()).unwrap();
        let buffer = render(&mut component, 14, 5);

        // default-colored fraction on top, red fraction at the bottom
        assert_eq!(buffer[(1, 0)].symbol(), "█");
        assert_eq!(buffer[(1, 0)].fg, Color::Gray);
        assert_eq!(buffer[(2, 3)].fg, Color::Red);
        // outside the bar
        assert_eq!(buffer[(0, 0)].symbol(), " ");
        assert_eq!(buffer[(3, 0)].symbol(), " ");
        // second column starts after the spacing
        assert_eq!(buffer[(6, 3)].fg, Color::Red);
    }

    #[test]
    fn test_renders_cycled_labels() {
        let mut component = BarGraphComponent::new(layout(), data()).unwrap();
        let buffer = render(&mut component, 14, 5);

        let row: String = (0..14).map(|x| buffer[(x, 4)].symbol().to_string()).collect();
        assert_eq!(row, "Mon  Tue  Mon ");
    }

    #[test]
    fn test_half_cell_boundaries() {
        let layout = GraphLayout {
            bar_length: 3.0,
            label_size: 0.0,
            ..layout()
        };
        let data = GraphData::new(
            vec![vec![
                Fraction::new(0.5).with_color(Color::Red),
                Fraction::new(0.5).with_color(Color::Blue),
            ]],
            vec![],
        );
        let mut component = BarGraphComponent::new(layout, data).unwrap();
        let buffer = render(&mut component, 4, 3);

        // boundary at y = 1.5 splits the middle row
        assert_eq!(buffer[(1, 1)].symbol(), "▀");
        assert_eq!(buffer[(1, 1)].fg, Color::Blue);
        assert_eq!(buffer[(1, 1)].bg, Color::Red);
    }

    #[test]
    fn test_mouse_press_resolves_segment() {
        let mut component = BarGraphComponent::new(layout(), data()).unwrap();
        render(&mut component, 14, 5);

        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 6,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        let action = component.handle_mouse_event(down).unwrap();
        assert_eq!(action, Some(Action::PointerDown(6, 0)));

        component.update(Action::PointerDown(6, 0)).unwrap();
        assert_eq!(component.graph.selected(), Some(1));
        assert_eq!(
            component.last_event(),
            Some(GraphEvent::SegmentEntered(Some(SegmentHit::new(1, 1))))
        );
        assert_eq!(
            component.describe_segment(SegmentHit::new(1, 1)).as_deref(),
            Some("Rest 50.0%")
        );

        component.update(Action::PointerDrag(6, 3)).unwrap();
        assert_eq!(
            component.last_event(),
            Some(GraphEvent::SegmentEntered(Some(SegmentHit::new(1, 0))))
        );

        component.update(Action::PointerUp).unwrap();
        assert_eq!(component.last_event(), Some(GraphEvent::PressFinished));
    }

    #[test]
    fn test_press_outside_graph_is_ignored() {
        let mut component = BarGraphComponent::new(layout(), data()).unwrap();
        render(&mut component, 14, 5);

        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 20,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(component.handle_mouse_event(down).unwrap(), None);
    }

    #[test]
    fn test_keyboard_selection_moves_and_clamps() {
        let mut component = BarGraphComponent::new(layout(), data()).unwrap();
        render(&mut component, 14, 5);

        component.update(Action::NextColumn).unwrap();
        assert_eq!(component.graph.selected(), Some(0));
        component.update(Action::LastColumn).unwrap();
        assert_eq!(component.graph.selected(), Some(2));
        component.update(Action::NextColumn).unwrap();
        assert_eq!(component.graph.selected(), Some(2));
        component.update(Action::PrevColumn).unwrap();
        assert_eq!(component.graph.selected(), Some(1));
    }

    #[test]
    fn test_cycle_direction_replays() {
        let mut component = BarGraphComponent::new(layout(), data()).unwrap();
        render(&mut component, 14, 5);

        component.update(Action::CycleDirection).unwrap();
        let layout = component.graph.layout().unwrap();
        assert_eq!(layout.direction, AnimationDirection::TopDown);
        assert!(component.graph.is_animating());
    }

    #[test]
    fn test_fit_label_truncates_by_display_width() {
        assert_eq!(fit_label("Monday", 3), ("Mon".to_string(), 3));
        assert_eq!(fit_label("日本語", 5), ("日本".to_string(), 4));
        assert_eq!(fit_label("", 4), (String::new(), 0));
    }
}
