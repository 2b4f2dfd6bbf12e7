//! Batch output: CSV persistence and the optional comparison chart.

pub mod chart;
pub mod csv;

pub use chart::render_chart;
pub use csv::{to_csv, write_csv};
