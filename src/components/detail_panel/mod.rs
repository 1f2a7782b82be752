//! Word-frequency bar chart for the hovered topic.

mod chart;
mod render;

pub use chart::BarChart;
pub use render::render;
