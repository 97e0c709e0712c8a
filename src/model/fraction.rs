//! Input data for the bar graph
//!
//! A graph is a list of columns, each an ordered list of fractions read
//! bottom-to-top, plus a list of labels that cycles across the columns.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// One stacked slice of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fraction<T> {
    /// Caller data carried through to the rendered segment
    pub payload: Option<T>,
    /// Fill color; the graph's default color is used when absent
    pub color: Option<Color>,
    /// Share of the bar's length, nominally in `[0, 1]`
    pub percentage: f64,
}

impl<T> Fraction<T> {
    pub fn new(percentage: f64) -> Self {
        Self {
            payload: None,
            color: None,
            percentage,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Resolve the fill color against a default
    pub fn color_or(&self, default: Color) -> Color {
        self.color.unwrap_or(default)
    }
}

/// One bar of the graph, fractions ordered from the bottom up
pub type Column<T> = Vec<Fraction<T>>;

/// Complete data set for a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData<T> {
    #[serde(default = "Vec::new")]
    pub labels: Vec<String>,
    #[serde(default = "Vec::new")]
    pub columns: Vec<Column<T>>,
}

impl<T> Default for GraphData<T> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            columns: Vec::new(),
        }
    }
}

impl<T> GraphData<T> {
    pub fn new(columns: Vec<Column<T>>, labels: Vec<String>) -> Self {
        Self { labels, columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column<T>> {
        self.columns.get(index)
    }

    /// Label shown under a column
    ///
    /// Labels repeat when there are fewer labels than columns. With no
    /// labels at all every column gets an empty label.
    pub fn label_for(&self, index: usize) -> &str {
        if self.labels.is_empty() {
            return "";
        }
        &self.labels[index % self.labels.len()]
    }

    /// Sum of a column's percentages, useful for spotting overfull columns
    pub fn column_total(&self, index: usize) -> f64 {
        self.columns
            .get(index)
            .map(|column| column.iter().map(|f| f.percentage).sum())
            .unwrap_or(0.0)
    }
}
