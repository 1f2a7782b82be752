//! Canvas views, their layout state, and the panel transition controller.

pub mod bubble_chart;
mod canvas;
pub mod detail_panel;
pub mod network_graph;
pub mod scale;
pub mod simulation;
pub mod transition;
