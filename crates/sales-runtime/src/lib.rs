//! Runtime layer for the bakery sales dashboard.
//!
//! Owns the memoized dataset cache and the UI-agnostic dashboard state that
//! both the terminal UI and the headless summary view read from.

pub mod dashboard;
pub mod dataset_cache;

pub use sales_core as core;
pub use sales_data as data;
