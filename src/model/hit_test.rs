//! Point-to-segment resolution for long presses

use super::grid::GridLayout;
use super::segment::SegmentStore;

/// A segment identified by its column and its index within the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentHit {
    pub column: usize,
    pub index: usize,
}

impl SegmentHit {
    pub fn new(column: usize, index: usize) -> Self {
        Self { column, index }
    }
}

/// Find the segment of `column` whose current frame spans `y`
///
/// `y` is in the bar's local frame. Segments are scanned bottom-to-top and
/// the first one containing `y` wins. Frames only overlap when moved by
/// hand; shared edges resolve to the lower segment.
pub fn hit_test<T>(store: &SegmentStore<T>, column: usize, y: f64) -> Option<SegmentHit> {
    store
        .segments_for_column(column)
        .iter()
        .position(|segment| segment.frame().contains_y(y))
        .map(|index| SegmentHit::new(column, index))
}

/// Resolve a point in content space to a segment
///
/// Content space is the grid's scrolled coordinate system with `y = 0` at
/// the top of the bars. Points between columns or outside every bar do not
/// resolve.
pub fn resolve_point<T>(
    grid: &GridLayout,
    store: &SegmentStore<T>,
    x: f64,
    y: f64,
) -> Option<SegmentHit> {
    let (column, _) = grid.column_at(x)?;
    hit_test(store, column, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fraction::Fraction;
    use crate::model::geometry::{BarGeometry, Bounds};
    use crate::model::keyframe::AnimationDirection;
    use crate::model::segment::BindOptions;
    use ratatui::style::Color;
    use std::time::{Duration, Instant};

    fn store_with(percentages: &[&[f64]]) -> SegmentStore<()> {
        let options = BindOptions {
            geometry: BarGeometry::new(100.0, 4.0, 8.0),
            direction: AnimationDirection::None,
            duration: Duration::from_millis(300),
            default_color: Color::Gray,
        };
        let mut store = SegmentStore::new();
        let now = Instant::now();
        for (column, values) in percentages.iter().enumerate() {
            let fractions: Vec<Fraction<()>> = values.iter().map(|p| Fraction::new(*p)).collect();
            store.bind_column(column, &fractions, &options, now);
        }
        store
    }

    #[test]
    fn test_hits_each_segment_of_column() {
        let store = store_with(&[&[0.3, 0.5, 0.2]]);

        assert_eq!(hit_test(&store, 0, 10.0), Some(SegmentHit::new(0, 2)));
        assert_eq!(hit_test(&store, 0, 50.0), Some(SegmentHit::new(0, 1)));
        assert_eq!(hit_test(&store, 0, 95.0), Some(SegmentHit::new(0, 0)));
    }

    #[test]
    fn test_outside_bar_is_no_match() {
        let store = store_with(&[&[0.3, 0.5, 0.2]]);

        assert_eq!(hit_test(&store, 0, -5.0), None);
        assert_eq!(hit_test(&store, 0, 105.0), None);
        assert_eq!(hit_test(&store, 7, 50.0), None);
    }

    #[test]
    fn test_shared_edge_goes_to_lower_segment() {
        let store = store_with(&[&[0.3, 0.5, 0.2]]);
        assert_eq!(hit_test(&store, 0, 70.0), Some(SegmentHit::new(0, 0)));
        assert_eq!(hit_test(&store, 0, 20.0), Some(SegmentHit::new(0, 1)));
    }

    #[test]
    fn test_gap_in_partial_column_is_no_match() {
        let store = store_with(&[&[0.5]]);
        assert_eq!(hit_test(&store, 0, 25.0), None);
        assert_eq!(hit_test(&store, 0, 75.0), Some(SegmentHit::new(0, 0)));
    }

    #[test]
    fn test_overlap_prefers_first_in_stack() {
        let mut store = store_with(&[&[0.5, 0.5]]);
        {
            let segments = store.segments_for_column_mut(0);
            segments[0].set_frame(Bounds::new(2.0, 40.0, 4.0, 60.0));
            segments[1].set_frame(Bounds::new(2.0, 0.0, 4.0, 70.0));
        }

        // 40..70 is covered by both frames
        assert_eq!(hit_test(&store, 0, 55.0), Some(SegmentHit::new(0, 0)));
        assert_eq!(hit_test(&store, 0, 20.0), Some(SegmentHit::new(0, 1)));
        assert_eq!(hit_test(&store, 0, 90.0), Some(SegmentHit::new(0, 0)));
    }

    #[test]
    fn test_overfull_column_shares_an_edge() {
        let store = store_with(&[&[0.8, 0.5]]);
        // second segment spans -30..20, first spans 20..100
        assert_eq!(hit_test(&store, 0, 10.0), Some(SegmentHit::new(0, 1)));
        assert_eq!(hit_test(&store, 0, -25.0), Some(SegmentHit::new(0, 1)));
        assert_eq!(hit_test(&store, 0, 20.0), Some(SegmentHit::new(0, 0)));
    }

    #[test]
    fn test_uses_current_frame() {
        let mut store = store_with(&[&[1.0]]);
        store.segments_for_column_mut(0)[0].set_frame(Bounds::new(2.0, 90.0, 4.0, 10.0));
        assert_eq!(hit_test(&store, 0, 50.0), None);
        assert_eq!(hit_test(&store, 0, 95.0), Some(SegmentHit::new(0, 0)));
    }

    #[test]
    fn test_resolve_point_through_grid() {
        let store = store_with(&[&[1.0], &[0.5, 0.5]]);
        let grid = GridLayout::new(8.0, 2.0, 2);

        assert_eq!(resolve_point(&grid, &store, 4.0, 50.0), Some(SegmentHit::new(0, 0)));
        assert_eq!(resolve_point(&grid, &store, 14.0, 25.0), Some(SegmentHit::new(1, 1)));
        assert_eq!(resolve_point(&grid, &store, 9.0, 50.0), None);
        assert_eq!(resolve_point(&grid, &store, 40.0, 50.0), None);
    }
}
