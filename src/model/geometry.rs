//! Stacked bar geometry
//!
//! Turns a column's fractions into rectangles in the column's local frame.
//! The y axis grows downwards: `y = 0` is the top of the bar and
//! `y = bar_length` its bottom edge. Nothing here touches the terminal.

use super::fraction::Fraction;

/// Axis-aligned rectangle in graph units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Lower edge (largest y)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive vertical containment
    pub fn contains_y(&self, y: f64) -> bool {
        self.y <= y && y <= self.bottom()
    }
}

/// Layout constants needed to stack one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Total length of the bar
    pub bar_length: f64,
    /// Thickness of the bar
    pub bar_width: f64,
    /// Width of the column the bar is centered in
    pub column_width: f64,
}

impl BarGeometry {
    pub fn new(bar_length: f64, bar_width: f64, column_width: f64) -> Self {
        Self {
            bar_length,
            bar_width,
            column_width,
        }
    }

    /// Horizontal offset that centers the bar in its column
    pub fn bar_x(&self) -> f64 {
        (self.column_width - self.bar_width) / 2.0
    }

    /// The whole bar, regardless of data
    pub fn bar_frame(&self) -> Bounds {
        Bounds::new(self.bar_x(), 0.0, self.bar_width, self.bar_length)
    }

    /// Stack a column's fractions from the bottom of the bar upwards
    pub fn layout_column<T>(&self, fractions: &[Fraction<T>]) -> Vec<Bounds> {
        self.stack(fractions.iter().map(|f| f.percentage))
    }

    /// Stack raw percentages from the bottom of the bar upwards
    ///
    /// Percentages are used as given. When they add up to more than 1 the
    /// later rectangles end up above the bar (negative y), still edge to edge.
    pub fn stack<I>(&self, percentages: I) -> Vec<Bounds>
    where
        I: IntoIterator<Item = f64>,
    {
        let length = self.bar_length;
        let x = self.bar_x();
        let mut running = 0.0;

        percentages
            .into_iter()
            .map(|percentage| {
                let height = length * percentage;
                let y = length - running * length - height;
                running += percentage;
                Bounds::new(x, y, self.bar_width, height)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn geometry(length: f64) -> BarGeometry {
        BarGeometry::new(length, 4.0, 8.0)
    }

    #[test]
    fn test_first_fraction_sits_on_the_bottom_edge() {
        let rects = geometry(100.0).stack([0.3, 0.5, 0.2]);

        assert_eq!(rects.len(), 3);
        assert!((rects[0].bottom() - 100.0).abs() < EPSILON);
        assert!((rects[0].y - 70.0).abs() < EPSILON);
        assert!((rects[1].y - 20.0).abs() < EPSILON);
        assert!((rects[2].y - 0.0).abs() < EPSILON);
        assert!((rects[1].height - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_bar_is_centered_in_column() {
        let rects = BarGeometry::new(10.0, 4.0, 10.0).stack([1.0]);
        assert_eq!(rects[0].x, 3.0);
        assert_eq!(rects[0].width, 4.0);
    }

    #[test]
    fn test_overfull_column_stays_contiguous() {
        let rects = geometry(10.0).stack([0.8, 0.5]);
        // still contiguous, the excess sticks out past the top edge
        assert!((rects[1].y - -3.0).abs() < EPSILON);
        assert!((rects[1].bottom() - rects[0].y).abs() < EPSILON);
    }

    #[test]
    fn test_bar_frame_spans_full_length() {
        let bar = BarGeometry::new(12.0, 4.0, 10.0).bar_frame();
        assert_eq!(bar, Bounds::new(3.0, 0.0, 4.0, 12.0));
        assert_eq!(bar.bottom(), 12.0);
    }

    #[test]
    fn test_empty_column_has_no_rects() {
        assert!(geometry(10.0).stack(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_layout_column_matches_stack() {
        let fractions: Vec<Fraction<()>> = vec![Fraction::new(0.4), Fraction::new(0.6)];
        let g = geometry(20.0);
        assert_eq!(g.layout_column(&fractions), g.stack([0.4, 0.6]));
    }

    fn normalized(weights: Vec<f64>) -> Vec<f64> {
        let total: f64 = weights.iter().sum();
        weights.iter().map(|w| w / total).collect()
    }

    proptest! {
        #[test]
        fn prop_full_column_covers_bar_without_gaps(
            weights in prop::collection::vec(0.01f64..10.0, 1..12),
            length in 1.0f64..500.0,
        ) {
            let rects = geometry(length).stack(normalized(weights));

            prop_assert!((rects[0].bottom() - length).abs() < 1e-6);
            for pair in rects.windows(2) {
                prop_assert!((pair[1].bottom() - pair[0].y).abs() < 1e-6);
            }
            prop_assert!(rects.last().map(|r| r.y.abs() < 1e-6).unwrap_or(false));
        }

        #[test]
        fn prop_segments_stack_upwards(
            weights in prop::collection::vec(0.0f64..10.0, 1..12),
            slack in 1.0f64..3.0,
            length in 1.0f64..500.0,
        ) {
            let total: f64 = weights.iter().sum::<f64>() * slack + 1e-3;
            let percentages: Vec<f64> = weights.iter().map(|w| w / total).collect();
            let rects = geometry(length).stack(percentages);

            for pair in rects.windows(2) {
                prop_assert!(pair[1].bottom() <= pair[0].y + 1e-6);
            }
        }
    }
}
