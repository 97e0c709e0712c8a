//! Data sources for the graph
//!
//! - Loading pre-aggregated data files (JSON, YAML, CSV)
//! - Built-in sample data for the demo

pub mod data;
pub mod sample;

pub use data::{load_graph_data, parse_csv};
pub use sample::sample_days;
