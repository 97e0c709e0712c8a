//! Animation keyframes for bar segments
//!
//! Segments grow from zero height into their resting rectangle. Only y and
//! height animate; x and width are fixed from the first frame.

use super::geometry::Bounds;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Edge of the bar that segments grow from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationDirection {
    /// Start at the top edge of the bar
    TopDown,
    /// Start at the bottom edge of the bar
    #[default]
    BottomUp,
    /// No animation, segments appear at rest
    None,
}

impl AnimationDirection {
    pub fn name(&self) -> &str {
        match self {
            AnimationDirection::TopDown => "top-down",
            AnimationDirection::BottomUp => "bottom-up",
            AnimationDirection::None => "none",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AnimationDirection::TopDown => AnimationDirection::BottomUp,
            AnimationDirection::BottomUp => AnimationDirection::None,
            AnimationDirection::None => AnimationDirection::TopDown,
        }
    }

    pub fn is_animated(&self) -> bool {
        *self != AnimationDirection::None
    }
}

/// Start and end rectangles of one segment's transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframes {
    pub start: Bounds,
    pub end: Bounds,
}

impl Keyframes {
    /// Build the transition into `target` for a bar of `bar_length`
    pub fn new(target: Bounds, bar_length: f64, direction: AnimationDirection) -> Self {
        let start_y = match direction {
            AnimationDirection::TopDown => 0.0,
            AnimationDirection::BottomUp => bar_length,
            AnimationDirection::None => return Self::at_rest(target),
        };

        Self {
            start: Bounds::new(target.x, start_y, target.width, 0.0),
            end: target,
        }
    }

    pub fn at_rest(target: Bounds) -> Self {
        Self {
            start: target,
            end: target,
        }
    }

    /// Rectangle at `progress` along the transition, clamped to `[0, 1]`
    pub fn at(&self, progress: f64) -> Bounds {
        let t = progress.clamp(0.0, 1.0);
        let lerp = |from: f64, to: f64| from + (to - from) * t;

        Bounds::new(
            self.end.x,
            lerp(self.start.y, self.end.y),
            self.end.width,
            lerp(self.start.height, self.end.height),
        )
    }
}

/// Ease-in-out curve over `[0, 1]`
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Shared start time and duration of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    pub started_at: Instant,
    pub duration: Duration,
}

impl AnimationClock {
    pub fn new(started_at: Instant, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// Linear progress in `[0, 1]` at `now`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased progress in `[0, 1]` at `now`
    pub fn eased(&self, now: Instant) -> f64 {
        ease_in_out(self.progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
