//! Display formatting for terminal output
//!
//! Renders expense summaries as text lines and a bar chart, with optional
//! colour.

pub mod chart;
pub mod report;
pub mod summary;

pub use chart::format_category_chart;
pub use report::DisplayOptions;
pub use summary::{category_lines, format_summary};
