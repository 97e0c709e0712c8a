//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod bar_graph;
pub mod column_detail;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;

pub use bar_graph::{render_graph, BarGraphComponent};
pub use column_detail::ColumnDetailDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup, MainLayout};
pub use quit_dialog::QuitDialog;
