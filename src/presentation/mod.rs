//! Presentation layer: pure mapping from view state to what the page shows.

pub mod chart_config;
pub mod view_model;

pub use chart_config::*;
pub use view_model::*;
