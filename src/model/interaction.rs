//! Long-press tracking
//!
//! The controller does not know about coordinates. The caller resolves the
//! pointer to a segment (or to nothing) and feeds the result in; the
//! controller decides which notifications that produces.

use super::hit_test::SegmentHit;

/// Long-press state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    Idle,
    Tracking { current: Option<SegmentHit> },
}

/// Notification produced by a pointer update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEvent {
    /// The pointer moved onto a different segment, or off all segments
    SegmentEntered(Option<SegmentHit>),
    /// The press ended
    Finished,
}

/// Turns a stream of resolved pointer positions into debounced events
#[derive(Debug, Default)]
pub struct InteractionController {
    state: PressState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, PressState::Tracking { .. })
    }

    /// Segment under the pointer while pressed
    pub fn current(&self) -> Option<SegmentHit> {
        match self.state {
            PressState::Tracking { current } => current,
            PressState::Idle => None,
        }
    }

    /// Pointer went down on `resolved`
    pub fn press(&mut self, resolved: Option<SegmentHit>) -> Option<PressEvent> {
        self.track(resolved)
    }

    /// Pointer moved to `resolved` while held down
    ///
    /// Moves without a preceding press are ignored.
    pub fn drag(&mut self, resolved: Option<SegmentHit>) -> Option<PressEvent> {
        if !self.is_tracking() {
            return None;
        }
        self.track(resolved)
    }

    /// Pointer released
    pub fn release(&mut self) -> Option<PressEvent> {
        if !self.is_tracking() {
            return None;
        }
        self.state = PressState::Idle;
        Some(PressEvent::Finished)
    }

    /// Drop any press in progress without notifying
    pub fn cancel(&mut self) {
        self.state = PressState::Idle;
    }

    fn track(&mut self, resolved: Option<SegmentHit>) -> Option<PressEvent> {
        let previous = self.current();
        self.state = PressState::Tracking { current: resolved };

        (previous != resolved).then_some(PressEvent::SegmentEntered(resolved))
    }
}
