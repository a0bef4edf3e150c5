//! Terminal UI layer for the bakery sales dashboard.
//!
//! Provides themes, the header, metric tile, share bar, chart and sidebar
//! components, the record tables, the dashboard layout and the main
//! application event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use sales_core as core;
