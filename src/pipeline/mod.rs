//! Pipeline entry points for menu operations.
//!
//! - `run_update`: Download, parse and cache the configured menus
//! - `lookup`: Answer a menu/week/day query with a response envelope

pub mod lookup;
pub mod update;

pub use lookup::{ApiResponse, ResponseStatus, lookup};
pub use update::{UpdateStatus, UpdateSummary, check_interval, ingest, run_update};
