//! Data layer for the bakery sales dashboard.
//!
//! Responsible for reading and cleaning the point-of-sale CSV export,
//! aggregating sales by article, day and ticket, and running the summary
//! pipeline the dashboard displays.

pub mod aggregator;
pub mod analysis;
pub mod cleaning;
pub mod dataset;
pub mod reader;

pub use sales_core as core;
