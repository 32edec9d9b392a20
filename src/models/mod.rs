// src/models/mod.rs

//! Domain models for menu parsing and caching.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod blob;
mod config;
mod menu;
mod record;

// Re-export all public types
pub use blob::{FooterItem, RawFooter, RawWeeklyBlob};
pub use config::{CacheConfig, Config, FetcherConfig, LoggingConfig, ParserConfig};
pub use menu::{DayName, DayRecord, ParsedMenu, SpecialFeature, SpecialFeatures, Weekday};
pub use record::{CacheEntry, CachedMenuRecord, MenuId, Revision};
