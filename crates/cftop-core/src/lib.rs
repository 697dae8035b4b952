//! cftop-core - quota-aware space table for the cftop dashboard.
//!
//! Provides:
//! - `fmt` - fixed-width formatting helpers (bytes, counters, percentages)
//! - `models` - space row records and snapshots
//! - `attention` - warm/hot quota classification
//! - `table` - generic column model, column registry, multi-column sort
//! - `view` - UI-agnostic view models, space column set
//!
//! With `api` feature (default):
//! - `api` - JSON-serializable table schema and raw row export
//!
//! With `tui` feature (default):
//! - `tui` - ratatui styles and table widget adapter

/// Crate version including git SHA (e.g. "0.1.0-abc1234").
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("CFTOP_BUILD_SHA"));

pub mod attention;
pub mod fmt;
pub mod models;
pub mod table;
pub mod view;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "tui")]
pub mod tui;
