//! Bar graph widget state
//!
//! `BarGraph` ties the pure model together: it owns the data, binds visible
//! columns into the segment store, routes pointer input through the
//! interaction controller and reports what happened through callbacks and
//! returned events.
//!
//! Pointer coordinates are viewport-relative graph units: `x = 0` is the
//! left edge of the visible area and `y = 0` the top of the bars.

use crate::model::{
    resolve_point, AnimationDirection, BarGeometry, BindOptions, GraphData, GridLayout,
    InteractionController, PressEvent, SegmentHit, SegmentStore,
};
use ratatui::style::{Color, Style};
use std::ops::Range;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors raised by the widget's configuration contract
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("graph layout must be configured before data is supplied")]
    LayoutNotConfigured,
    #[error("invalid layout value for {field}: {value}")]
    InvalidLayout { field: &'static str, value: f64 },
}

/// Sizing, styling and animation settings
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    pub bar_length: f64,
    /// Height of the label box under each bar
    pub label_size: f64,
    pub bar_width: f64,
    pub column_width: f64,
    pub column_spacing: f64,
    pub label_style: Style,
    pub default_color: Color,
    pub direction: AnimationDirection,
    pub duration: Duration,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            bar_length: 16.0,
            label_size: 2.0,
            bar_width: 4.0,
            column_width: 8.0,
            column_spacing: 2.0,
            label_style: Style::default().fg(Color::White),
            default_color: Color::DarkGray,
            direction: AnimationDirection::BottomUp,
            duration: Duration::from_millis(600),
        }
    }
}

impl GraphLayout {
    /// Check that every length is usable
    pub fn validate(&self) -> Result<(), GraphError> {
        let positive = [
            ("bar_length", self.bar_length),
            ("bar_width", self.bar_width),
            ("column_width", self.column_width),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::InvalidLayout { field, value });
            }
        }

        let non_negative = [
            ("label_size", self.label_size),
            ("column_spacing", self.column_spacing),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidLayout { field, value });
            }
        }

        if self.bar_width > self.column_width {
            return Err(GraphError::InvalidLayout {
                field: "bar_width",
                value: self.bar_width,
            });
        }
        Ok(())
    }

    pub fn geometry(&self) -> BarGeometry {
        BarGeometry::new(self.bar_length, self.bar_width, self.column_width)
    }

    /// Full height of a column: bar plus label box
    pub fn column_height(&self) -> f64 {
        self.bar_length + self.label_size
    }

    pub fn bind_options(&self) -> BindOptions {
        BindOptions {
            geometry: self.geometry(),
            direction: self.direction,
            duration: self.duration,
            default_color: self.default_color,
        }
    }
}

/// Something the user did to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    ColumnSelected(usize),
    SegmentEntered(Option<SegmentHit>),
    PressFinished,
}

impl From<PressEvent> for GraphEvent {
    fn from(event: PressEvent) -> Self {
        match event {
            PressEvent::SegmentEntered(hit) => GraphEvent::SegmentEntered(hit),
            PressEvent::Finished => GraphEvent::PressFinished,
        }
    }
}

type ColumnCallback = Box<dyn FnMut(usize)>;
type SegmentCallback = Box<dyn FnMut(Option<SegmentHit>)>;
type FinishedCallback = Box<dyn FnMut()>;

#[derive(Default)]
struct Callbacks {
    column_selected: Option<ColumnCallback>,
    segment_entered: Option<SegmentCallback>,
    press_finished: Option<FinishedCallback>,
}

impl Callbacks {
    fn dispatch(&mut self, event: GraphEvent) {
        match event {
            GraphEvent::ColumnSelected(column) => {
                if let Some(callback) = self.column_selected.as_mut() {
                    callback(column);
                }
            }
            GraphEvent::SegmentEntered(hit) => {
                if let Some(callback) = self.segment_entered.as_mut() {
                    callback(hit);
                }
            }
            GraphEvent::PressFinished => {
                if let Some(callback) = self.press_finished.as_mut() {
                    callback();
                }
            }
        }
    }
}

/// A horizontally scrolling stacked bar graph
pub struct BarGraph<T> {
    layout: Option<GraphLayout>,
    data: GraphData<T>,
    store: SegmentStore<T>,
    interaction: InteractionController,
    callbacks: Callbacks,
    scroll: f64,
    viewport_width: f64,
    selected: Option<usize>,
}

impl<T> Default for BarGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BarGraph<T> {
    /// Create an unconfigured graph
    pub fn new() -> Self {
        Self {
            layout: None,
            data: GraphData::default(),
            store: SegmentStore::new(),
            interaction: InteractionController::new(),
            callbacks: Callbacks::default(),
            scroll: 0.0,
            viewport_width: 0.0,
            selected: None,
        }
    }

    /// Create a graph with its layout already set
    pub fn with_layout(layout: GraphLayout) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        graph.set_layout(layout)?;
        Ok(graph)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────

    /// Set sizing, styling and animation
    ///
    /// Bound columns are dropped so the next bind uses the new layout.
    pub fn set_layout(&mut self, layout: GraphLayout) -> Result<(), GraphError> {
        layout.validate()?;
        self.layout = Some(layout);
        self.store.clear();
        self.interaction.cancel();
        Ok(())
    }

    pub fn layout(&self) -> Option<&GraphLayout> {
        self.layout.as_ref()
    }

    /// Change only the animation direction
    pub fn set_direction(&mut self, direction: AnimationDirection) -> Result<(), GraphError> {
        let layout = self.layout.as_mut().ok_or(GraphError::LayoutNotConfigured)?;
        layout.direction = direction;
        Ok(())
    }

    pub fn on_column_selected(&mut self, callback: impl FnMut(usize) + 'static) {
        self.callbacks.column_selected = Some(Box::new(callback));
    }

    pub fn on_segment_entered(&mut self, callback: impl FnMut(Option<SegmentHit>) + 'static) {
        self.callbacks.segment_entered = Some(Box::new(callback));
    }

    pub fn on_segment_press_finished(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.press_finished = Some(Box::new(callback));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the graph's data
    ///
    /// Fails when no layout has been set. Existing segments, scroll position,
    /// selection and any press in progress are discarded.
    pub fn set_data(&mut self, data: GraphData<T>) -> Result<(), GraphError> {
        if self.layout.is_none() {
            return Err(GraphError::LayoutNotConfigured);
        }

        tracing::info!(
            columns = data.column_count(),
            labels = data.labels.len(),
            "graph data replaced"
        );
        for column in 0..data.column_count() {
            let total = data.column_total(column);
            if total > 1.0 + 1e-9 {
                tracing::debug!(column, total, "column exceeds full bar length");
            }
        }

        self.data = data;
        self.store.clear();
        self.interaction.cancel();
        self.scroll = 0.0;
        self.selected = None;
        Ok(())
    }

    pub fn data(&self) -> &GraphData<T> {
        &self.data
    }

    pub fn column_count(&self) -> usize {
        self.data.column_count()
    }

    pub fn label_for(&self, column: usize) -> &str {
        self.data.label_for(column)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Segments
    // ─────────────────────────────────────────────────────────────────────────

    pub fn segments(&self) -> &SegmentStore<T> {
        &self.store
    }

    /// Reset every segment to its creation-time frame and color
    pub fn revert_all(&mut self) {
        self.store.revert_all();
    }

    /// Forget all bound columns so the next bind animates them again
    pub fn replay(&mut self) {
        self.store.clear();
        self.interaction.cancel();
    }

    /// Advance running animations; returns whether any are still running
    pub fn tick(&mut self, now: Instant) -> bool {
        self.store.advance(now)
    }

    pub fn is_animating(&self) -> bool {
        self.store.is_animating()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grid
    // ─────────────────────────────────────────────────────────────────────────

    /// Horizontal layout of the current data, if configured
    pub fn grid(&self) -> Option<GridLayout> {
        self.layout.as_ref().map(|layout| {
            GridLayout::new(
                layout.column_width,
                layout.column_spacing,
                self.data.column_count(),
            )
        })
    }

    /// Columns at least partly inside the viewport
    pub fn visible_columns(&self) -> Range<usize> {
        self.grid()
            .map(|grid| grid.visible_range(self.scroll, self.viewport_width))
            .unwrap_or(0..0)
    }

    /// Bind columns that came into view and release those that left it
    ///
    /// Columns entering the viewport are rendered afresh, animation
    /// included. Returns how many columns were bound.
    pub fn bind_visible(&mut self, viewport_width: f64, now: Instant) -> Result<usize, GraphError>
    where
        T: Clone,
    {
        let layout = self.layout.as_ref().ok_or(GraphError::LayoutNotConfigured)?;
        let options = layout.bind_options();
        let grid = GridLayout::new(
            layout.column_width,
            layout.column_spacing,
            self.data.column_count(),
        );

        self.viewport_width = viewport_width.max(0.0);
        self.scroll = grid.clamp_scroll(self.scroll, self.viewport_width);
        let visible = grid.visible_range(self.scroll, self.viewport_width);

        let stale: Vec<usize> = self
            .store
            .bound_columns()
            .filter(|column| !visible.contains(column))
            .collect();
        for column in stale {
            self.store.unbind_column(column);
        }

        let mut bound = 0;
        for column in visible {
            if self.store.is_bound(column) {
                continue;
            }
            if let Some(fractions) = self.data.column(column) {
                self.store.bind_column(column, fractions, &options, now);
                bound += 1;
            }
        }
        Ok(bound)
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Scroll horizontally by `delta` graph units
    pub fn scroll_by(&mut self, delta: f64) {
        if let Some(grid) = self.grid() {
            self.scroll = grid.clamp_scroll(self.scroll + delta, self.viewport_width);
        }
    }

    /// Scroll just far enough to show `column` in full
    pub fn scroll_to_column(&mut self, column: usize) {
        if let Some(grid) = self.grid() {
            self.scroll = grid.scroll_to_reveal(column, self.scroll, self.viewport_width);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection & pointer input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Segment under an active long press
    pub fn pressed_segment(&self) -> Option<SegmentHit> {
        self.interaction.current()
    }

    pub fn is_pressing(&self) -> bool {
        self.interaction.is_tracking()
    }

    /// Select a column and notify listeners
    pub fn select_column(&mut self, column: usize) -> Vec<GraphEvent> {
        if column >= self.data.column_count() {
            return Vec::new();
        }
        self.selected = Some(column);
        self.scroll_to_column(column);
        self.emit(vec![GraphEvent::ColumnSelected(column)])
    }

    /// Column under a viewport-relative x
    pub fn column_at(&self, x: f64) -> Option<usize> {
        self.grid()?
            .column_at(x + self.scroll)
            .map(|(column, _)| column)
    }

    /// Segment under a viewport-relative point
    pub fn segment_at(&self, x: f64, y: f64) -> Option<SegmentHit> {
        let grid = self.grid()?;
        resolve_point(&grid, &self.store, x + self.scroll, y)
    }

    /// Pointer went down: selects the column under it and starts a press
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Vec<GraphEvent> {
        let mut events = Vec::new();
        if let Some(column) = self.column_at(x) {
            self.selected = Some(column);
            events.push(GraphEvent::ColumnSelected(column));
        }

        let hit = self.segment_at(x, y);
        tracing::debug!(x, y, ?hit, "press started");
        events.extend(self.interaction.press(hit).map(GraphEvent::from));
        self.emit(events)
    }

    /// Pointer moved while held down
    pub fn pointer_drag(&mut self, x: f64, y: f64) -> Vec<GraphEvent> {
        let hit = self.segment_at(x, y);
        let events = self.interaction.drag(hit).map(GraphEvent::from);
        self.emit(events.into_iter().collect())
    }

    /// Pointer released
    pub fn pointer_up(&mut self) -> Vec<GraphEvent> {
        let events = self.interaction.release().map(GraphEvent::from);
        self.emit(events.into_iter().collect())
    }

    fn emit(&mut self, events: Vec<GraphEvent>) -> Vec<GraphEvent> {
        for event in &events {
            tracing::debug!(?event, "graph event");
            self.callbacks.dispatch(*event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fraction;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn layout() -> GraphLayout {
        GraphLayout {
            bar_length: 100.0,
            label_size: 2.0,
            bar_width: 4.0,
            column_width: 8.0,
            column_spacing: 2.0,
            direction: AnimationDirection::None,
            ..GraphLayout::default()
        }
    }

    fn data(columns: usize) -> GraphData<&'static str> {
        GraphData::new(
            (0..columns)
                .map(|_| {
                    vec![
                        Fraction::new(0.3).with_payload("low"),
                        Fraction::new(0.5).with_payload("mid"),
                        Fraction::new(0.2).with_payload("high"),
                    ]
                })
                .collect(),
            vec!["a".to_string(), "b".to_string()],
        )
    }

    fn bound_graph(columns: usize, viewport: f64) -> BarGraph<&'static str> {
        let mut graph = BarGraph::with_layout(layout()).unwrap();
        graph.set_data(data(columns)).unwrap();
        graph.bind_visible(viewport, Instant::now()).unwrap();
        graph
    }

    #[test]
    fn test_data_before_layout_is_rejected() {
        let mut graph: BarGraph<&str> = BarGraph::new();
        assert_eq!(graph.set_data(data(1)), Err(GraphError::LayoutNotConfigured));
        assert_eq!(
            graph.bind_visible(10.0, Instant::now()),
            Err(GraphError::LayoutNotConfigured)
        );
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let bad = GraphLayout {
            bar_width: 20.0,
            ..layout()
        };
        assert!(matches!(
            BarGraph::<()>::with_layout(bad),
            Err(GraphError::InvalidLayout { field: "bar_width", .. })
        ));

        let negative = GraphLayout {
            column_spacing: -1.0,
            ..layout()
        };
        assert!(negative.validate().is_err());

        let nan = GraphLayout {
            bar_length: f64::NAN,
            ..layout()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_binds_only_visible_columns() {
        let graph = bound_graph(10, 25.0);
        assert_eq!(graph.visible_columns(), 0..3);
        assert_eq!(graph.segments().bound_columns().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(graph.segments().segments_for_column(1).len(), 3);
    }

    #[test]
    fn test_scrolling_rebinds_columns() {
        let mut graph = bound_graph(10, 25.0);
        graph.scroll_by(40.0);
        let bound = graph.bind_visible(25.0, Instant::now()).unwrap();

        assert_eq!(graph.visible_columns(), 4..7);
        assert_eq!(bound, 3);
        assert!(!graph.segments().is_bound(0));
        assert!(graph.segments().is_bound(5));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut graph = bound_graph(10, 25.0);
        graph.scroll_by(-10.0);
        assert_eq!(graph.scroll(), 0.0);
        graph.scroll_by(1000.0);
        assert_eq!(graph.scroll(), 73.0);
    }

    #[test]
    fn test_pointer_press_resolves_segments() {
        let mut graph = bound_graph(3, 40.0);

        let events = graph.pointer_down(12.0, 10.0);
        assert_eq!(
            events,
            vec![
                GraphEvent::ColumnSelected(1),
                GraphEvent::SegmentEntered(Some(SegmentHit::new(1, 2))),
            ]
        );
        assert_eq!(graph.selected(), Some(1));

        assert!(graph.pointer_drag(13.0, 12.0).is_empty());
        assert_eq!(
            graph.pointer_drag(13.0, 95.0),
            vec![GraphEvent::SegmentEntered(Some(SegmentHit::new(1, 0)))]
        );
        assert_eq!(
            graph.pointer_drag(19.0, 95.0),
            vec![GraphEvent::SegmentEntered(None)]
        );
        assert_eq!(graph.pointer_up(), vec![GraphEvent::PressFinished]);
        assert!(!graph.is_pressing());
    }

    #[test]
    fn test_pointer_accounts_for_scroll() {
        let mut graph = bound_graph(10, 25.0);
        graph.scroll_to_column(5);
        graph.bind_visible(25.0, Instant::now()).unwrap();

        let column = graph.column_at(graph.viewport_width() - 4.0);
        assert_eq!(column, Some(5));
        assert_eq!(
            graph.segment_at(graph.viewport_width() - 4.0, 50.0),
            Some(SegmentHit::new(5, 1))
        );
    }

    #[test]
    fn test_callbacks_receive_events() {
        let mut graph = bound_graph(3, 40.0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        graph.on_column_selected(move |column| sink.borrow_mut().push(format!("column {column}")));
        let sink = Rc::clone(&log);
        graph.on_segment_entered(move |hit| {
            sink.borrow_mut()
                .push(format!("entered {:?}", hit.map(|h| (h.column, h.index))))
        });
        let sink = Rc::clone(&log);
        graph.on_segment_press_finished(move || sink.borrow_mut().push("finished".to_string()));

        graph.pointer_down(2.0, 50.0);
        graph.pointer_up();
        graph.select_column(2);

        assert_eq!(
            *log.borrow(),
            vec![
                "column 0".to_string(),
                "entered Some((0, 1))".to_string(),
                "finished".to_string(),
                "column 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut graph = bound_graph(3, 40.0);
        assert!(graph.select_column(3).is_empty());
        assert_eq!(graph.selected(), None);
    }

    #[test]
    fn test_new_data_resets_state() {
        let mut graph = bound_graph(3, 40.0);
        graph.pointer_down(2.0, 50.0);
        graph.set_data(data(2)).unwrap();

        assert!(!graph.is_pressing());
        assert_eq!(graph.selected(), None);
        assert_eq!(graph.segments().column_count(), 0);
        assert!(graph.pointer_up().is_empty());
    }

    #[test]
    fn test_replay_rebinds_with_animation() {
        let mut graph = bound_graph(3, 40.0);
        graph.set_direction(AnimationDirection::BottomUp).unwrap();
        graph.replay();
        let start = Instant::now();
        graph.bind_visible(40.0, start).unwrap();

        assert!(graph.is_animating());
        assert!(!graph.tick(start + Duration::from_secs(5)));
        assert!(!graph.is_animating());
    }

    #[test]
    fn test_labels_cycle() {
        let graph = bound_graph(5, 40.0);
        let labels: Vec<&str> = (0..5).map(|i| graph.label_for(i)).collect();
        assert_eq!(labels, vec!["a", "b", "a", "b", "a"]);
    }
}
