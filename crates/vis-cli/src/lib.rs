//! CLI library components for the turn visualizer.

pub mod logging;
pub mod summary;
