//! # statboard_render - Leaderboard charts
//!
//! Horizontal bar charts of leaderboard results, written as PNG/JPEG/BMP/SVG
//! through plotters or printed to the terminal.

pub mod config;
pub mod visualizer;

pub use config::PlotConfig;
pub use visualizer::{chart_title, title_case, ImageFormat, PlotOutcome, Visualizer};
