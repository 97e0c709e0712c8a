//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Select the column to the right
    NextColumn,
    /// Select the column to the left
    PrevColumn,
    /// Select the first column
    FirstColumn,
    /// Select the last column
    LastColumn,
    /// Scroll the grid left one column
    ScrollLeft,
    /// Scroll the grid right one column
    ScrollRight,

    // ─────────────────────────────────────────────────────────────────────────
    // Pointer (terminal cell coordinates)
    // ─────────────────────────────────────────────────────────────────────────
    /// Left button pressed
    PointerDown(u16, u16),
    /// Mouse moved with the left button held
    PointerDrag(u16, u16),
    /// Left button released
    PointerUp,

    // ─────────────────────────────────────────────────────────────────────────
    // Graph
    // ─────────────────────────────────────────────────────────────────────────
    /// Bind every visible column again and replay the animation
    ReplayAnimation,
    /// Restore every segment's original frame and color
    RevertAll,
    /// Switch to the next animation direction
    CycleDirection,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the breakdown of the selected column
    OpenColumnDetail,
    /// Open help dialog showing all controls
    OpenHelp,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::FirstColumn => write!(f, "FirstColumn"),
            Action::LastColumn => write!(f, "LastColumn"),
            Action::ScrollLeft => write!(f, "ScrollLeft"),
            Action::ScrollRight => write!(f, "ScrollRight"),
            Action::PointerDown(x, y) => write!(f, "PointerDown({}, {})", x, y),
            Action::PointerDrag(x, y) => write!(f, "PointerDrag({}, {})", x, y),
            Action::PointerUp => write!(f, "PointerUp"),
            Action::ReplayAnimation => write!(f, "ReplayAnimation"),
            Action::RevertAll => write!(f, "RevertAll"),
            Action::CycleDirection => write!(f, "CycleDirection"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenColumnDetail => write!(f, "OpenColumnDetail"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
