//! stackbar - stacked, segmented bar graphs for the terminal
//!
//! The widget core lives in `model` (pure geometry, keyframes, segment
//! store, hit testing, long-press tracking) and `graph` (the `BarGraph`
//! facade). The remaining modules are the ratatui application built on it.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod graph;
pub mod logging;
pub mod model;
pub mod services;
pub mod tui;

pub use graph::{BarGraph, GraphError, GraphEvent, GraphLayout};
pub use model::{AnimationDirection, Fraction, GraphData, SegmentHit};
