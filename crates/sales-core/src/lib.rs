//! Core types for the bakery sales dashboard.
//!
//! Holds the cleaned [`models::Record`] and the aggregate view types, the
//! error taxonomy, number formatting rules and CLI settings shared by the
//! data, runtime and UI crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ErrorKind, Result, SalesError};
