//! Rendered segments and the per-column store that owns them
//!
//! A column's segments are always rebuilt in one pass from its fractions,
//! so segment `i` is the rendering of fraction `i`. Nothing outside the
//! bind pass edits a column's sequence.

use super::fraction::Fraction;
use super::geometry::{BarGeometry, Bounds};
use super::keyframe::{AnimationClock, AnimationDirection, Keyframes};
use ratatui::style::Color;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// One colored slice of a rendered bar
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<T> {
    frame: Bounds,
    color: Color,
    payload: Option<T>,
    percentage: f64,
    original_frame: Bounds,
    original_color: Color,
    keyframes: Keyframes,
    clock: Option<AnimationClock>,
}

impl<T> Segment<T> {
    /// Materialize a segment at the first frame of its transition
    pub fn new(
        keyframes: Keyframes,
        color: Color,
        payload: Option<T>,
        percentage: f64,
        clock: Option<AnimationClock>,
    ) -> Self {
        Self {
            frame: keyframes.start,
            color,
            payload,
            percentage,
            original_frame: keyframes.start,
            original_color: color,
            keyframes,
            clock,
        }
    }

    /// Current rectangle, in the column's local frame
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Rectangle captured when the segment was created
    pub fn original_frame(&self) -> Bounds {
        self.original_frame
    }

    pub fn original_color(&self) -> Color {
        self.original_color
    }

    pub fn keyframes(&self) -> Keyframes {
        self.keyframes
    }

    pub fn is_animating(&self) -> bool {
        self.clock.is_some()
    }

    /// Move the segment by hand; this stops its animation
    pub fn set_frame(&mut self, frame: Bounds) {
        self.clock = None;
        self.frame = frame;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Restore the creation-time rectangle and color
    ///
    /// A running animation is left alone and moves the frame again on the
    /// next `advance`.
    pub fn revert(&mut self) {
        self.frame = self.original_frame;
        self.color = self.original_color;
    }

    /// Step the animation; returns whether it is still running
    fn advance(&mut self, now: Instant) -> bool {
        let Some(clock) = self.clock else {
            return false;
        };

        self.frame = self.keyframes.at(clock.eased(now));
        if clock.is_finished(now) {
            self.frame = self.keyframes.end;
            self.clock = None;
        }
        self.clock.is_some()
    }
}

/// How a column should be materialized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindOptions {
    pub geometry: BarGeometry,
    pub direction: AnimationDirection,
    pub duration: Duration,
    pub default_color: Color,
}

/// Live segments per column, bottom-to-top within a column
#[derive(Debug, Clone)]
pub struct SegmentStore<T> {
    columns: BTreeMap<usize, Vec<Segment<T>>>,
}

impl<T> Default for SegmentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SegmentStore<T> {
    pub fn new() -> Self {
        Self {
            columns: BTreeMap::new(),
        }
    }

    /// Replace a column's segments with a fresh rendering of `fractions`
    ///
    /// Every segment of the pass shares one clock started at `now`.
    pub fn bind_column(
        &mut self,
        column: usize,
        fractions: &[Fraction<T>],
        options: &BindOptions,
        now: Instant,
    ) -> &[Segment<T>]
    where
        T: Clone,
    {
        let geometry = options.geometry;
        let clock = (options.direction.is_animated() && !options.duration.is_zero())
            .then(|| AnimationClock::new(now, options.duration));

        let segments: Vec<Segment<T>> = geometry
            .layout_column(fractions)
            .into_iter()
            .zip(fractions)
            .map(|(target, fraction)| {
                let keyframes = match clock {
                    Some(_) => Keyframes::new(target, geometry.bar_length, options.direction),
                    None => Keyframes::at_rest(target),
                };
                Segment::new(
                    keyframes,
                    fraction.color_or(options.default_color),
                    fraction.payload.clone(),
                    fraction.percentage,
                    clock,
                )
            })
            .collect();

        tracing::debug!(
            column,
            segments = segments.len(),
            animated = clock.is_some(),
            "bound column"
        );

        let slot = self.columns.entry(column).or_default();
        *slot = segments;
        slot.as_slice()
    }

    /// Drop a column's segments
    pub fn unbind_column(&mut self, column: usize) -> bool {
        self.columns.remove(&column).is_some()
    }

    pub fn is_bound(&self, column: usize) -> bool {
        self.columns.contains_key(&column)
    }

    /// Indices of all bound columns, ascending
    pub fn bound_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.keys().copied()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// Number of bound columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Segments of one column, empty when the column is not bound
    pub fn segments_for_column(&self, column: usize) -> &[Segment<T>] {
        self.columns
            .get(&column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn segments_for_column_mut(&mut self, column: usize) -> &mut [Segment<T>] {
        self.columns
            .get_mut(&column)
            .map(Vec::as_mut_slice)
            .unwrap_or(&mut [])
    }

    /// All segments, column by column
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment<T>> {
        self.columns.values().flatten()
    }

    /// Reset every segment to its creation-time rectangle and color
    ///
    /// Animations keep running; see `Segment::revert`.
    pub fn revert_all(&mut self) {
        for segment in self.columns.values_mut().flatten() {
            segment.revert();
        }
    }

    /// Step all running animations to `now`
    ///
    /// Returns whether any segment is still animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for segment in self.columns.values_mut().flatten() {
            animating |= segment.advance(now);
        }
        animating
    }

    pub fn is_animating(&self) -> bool {
        self.all_segments().any(Segment::is_animating)
    }
}
