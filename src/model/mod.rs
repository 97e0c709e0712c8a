//! Model layer - the graph's data and pure geometry
//!
//! This module contains everything that can be computed without a terminal:
//! - `GraphData` / `Fraction` - input data
//! - `BarGeometry` - stacking fractions into rectangles
//! - `Keyframes` - animation start/end frames
//! - `SegmentStore` - materialized segments per column
//! - `GridLayout` - horizontal column placement
//! - `hit_test` / `InteractionController` - long-press resolution
//! - `ModalStack` - overlay management for the host app

pub mod fraction;
pub mod geometry;
pub mod grid;
pub mod hit_test;
pub mod interaction;
pub mod keyframe;
pub mod modal;
pub mod segment;

// Re-export commonly used types
pub use fraction::{Column, Fraction, GraphData};
pub use geometry::{BarGeometry, Bounds};
pub use grid::GridLayout;
pub use hit_test::{hit_test, resolve_point, SegmentHit};
pub use interaction::{InteractionController, PressEvent, PressState};
pub use keyframe::{ease_in_out, AnimationClock, AnimationDirection, Keyframes};
pub use segment::{BindOptions, Segment, SegmentStore};
