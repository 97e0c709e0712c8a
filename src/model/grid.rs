//! Horizontal placement of fixed-size columns

use std::ops::Range;

/// Single-row grid of equally sized columns separated by a fixed gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub column_width: f64,
    pub spacing: f64,
    pub column_count: usize,
}

impl GridLayout {
    pub fn new(column_width: f64, spacing: f64, column_count: usize) -> Self {
        Self {
            column_width,
            spacing,
            column_count,
        }
    }

    /// Distance between the left edges of neighbouring columns
    pub fn stride(&self) -> f64 {
        self.column_width + self.spacing
    }

    /// Left edge of a column in content space
    pub fn column_x(&self, column: usize) -> f64 {
        column as f64 * self.stride()
    }

    /// Width of all columns laid side by side
    pub fn content_width(&self) -> f64 {
        if self.column_count == 0 {
            return 0.0;
        }
        self.column_count as f64 * self.column_width
            + (self.column_count - 1) as f64 * self.spacing
    }

    /// Column under a content-space x, with the x relative to that column
    ///
    /// Points in the gap between two columns, or outside the grid, do not
    /// resolve to any column.
    pub fn column_at(&self, x: f64) -> Option<(usize, f64)> {
        if x < 0.0 || self.column_count == 0 || self.stride() <= 0.0 {
            return None;
        }

        let column = (x / self.stride()).floor() as usize;
        if column >= self.column_count {
            return None;
        }

        let local_x = x - self.column_x(column);
        (local_x <= self.column_width).then_some((column, local_x))
    }

    /// Furthest the content can be scrolled for a viewport width
    pub fn max_scroll(&self, viewport_width: f64) -> f64 {
        (self.content_width() - viewport_width).max(0.0)
    }

    pub fn clamp_scroll(&self, scroll: f64, viewport_width: f64) -> f64 {
        scroll.clamp(0.0, self.max_scroll(viewport_width))
    }

    /// Columns at least partly inside `[scroll, scroll + viewport_width)`
    pub fn visible_range(&self, scroll: f64, viewport_width: f64) -> Range<usize> {
        if self.column_count == 0 || viewport_width <= 0.0 || self.stride() <= 0.0 {
            return 0..0;
        }

        let first = ((scroll - self.column_width) / self.stride()).floor() + 1.0;
        let first = (first.max(0.0) as usize).min(self.column_count);
        let end = ((scroll + viewport_width) / self.stride()).ceil().max(0.0) as usize;
        first..end.min(self.column_count)
    }

    /// Smallest scroll change that brings `column` fully into view
    pub fn scroll_to_reveal(&self, column: usize, scroll: f64, viewport_width: f64) -> f64 {
        let left = self.column_x(column);
        let right = left + self.column_width;

        let scroll = if left < scroll {
            left
        } else if right > scroll + viewport_width {
            right - viewport_width
        } else {
            scroll
        };
        self.clamp_scroll(scroll, viewport_width)
    }
}
