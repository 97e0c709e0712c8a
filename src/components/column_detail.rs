//! Column detail dialog
//!
//! Lists the segments of one column from the top of the bar down.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::graph::BarGraph;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the proportional bar drawn next to each segment
const BAR_CELLS: usize = 20;

#[derive(Default)]
pub struct ColumnDetailDialog;

impl Component for ColumnDetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the graph, so we use draw_with_graph
        Ok(())
    }
}

impl ColumnDetailDialog {
    pub fn draw_with_graph(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        graph: &BarGraph<String>,
        column: usize,
    ) -> Result<()> {
        let lines = build_detail_lines(graph, column);
        let height = (lines.len() as u16).saturating_add(2);
        let popup_area = centered_popup(area, 50, height);

        frame.render_widget(Clear, popup_area);

        let title = format!(" Column {} · {} ", column + 1, graph.label_for(column));
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

/// One line per fraction, topmost segment first
fn build_detail_lines(graph: &BarGraph<String>, column: usize) -> Vec<Line<'static>> {
    let Some(fractions) = graph.data().column(column) else {
        return vec![Line::from(" No such column")];
    };
    let default_color = graph
        .layout()
        .map(|layout| layout.default_color)
        .unwrap_or(Color::DarkGray);

    let mut lines: Vec<Line> = fractions
        .iter()
        .rev()
        .map(|fraction| {
            let filled = (fraction.percentage.clamp(0.0, 1.0) * BAR_CELLS as f64).round() as usize;
            let name = fraction
                .payload
                .clone()
                .unwrap_or_else(|| "(unnamed)".to_string());
            Line::from(vec![
                Span::styled(
                    format!(" {}", "█".repeat(filled)),
                    Style::default().fg(fraction.color_or(default_color)),
                ),
                Span::raw(" ".repeat(BAR_CELLS - filled + 1)),
                Span::styled(
                    format!("{:>6.1}% ", fraction.percentage * 100.0),
                    Style::default().fg(Color::White),
                ),
                Span::styled(name, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let total = graph.data().column_total(column);
    let total_style = if total > 1.0 + 1e-9 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" Total {:.1}%", total * 100.0),
        total_style,
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphLayout;
    use crate::model::{Fraction, GraphData};

    fn graph() -> BarGraph<String> {
        let mut graph = BarGraph::with_layout(GraphLayout::default()).unwrap();
        graph
            .set_data(GraphData::new(
                vec![vec![
                    Fraction::new(0.75).with_payload("Sleep".to_string()),
                    Fraction::new(0.5).with_color(Color::Red),
                ]],
                vec!["Mon".to_string()],
            ))
            .unwrap();
        graph
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_lists_segments_top_first() {
        let lines = build_detail_lines(&graph(), 0);
        assert!(text(&lines[0]).contains("50.0%"));
        assert!(text(&lines[1]).contains("Sleep"));
    }

    #[test]
    fn test_overfull_total_is_flagged() {
        let lines = build_detail_lines(&graph(), 0);
        let total = lines.last().unwrap();
        assert!(text(total).contains("125.0%"));
        assert_eq!(total.spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_missing_column() {
        let lines = build_detail_lines(&graph(), 4);
        assert_eq!(lines.len(), 1);
    }
}
