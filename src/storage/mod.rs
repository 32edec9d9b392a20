//! Storage for cached menus.
//!
//! Each menu gets one directory, and each week of a year one subdirectory
//! holding the record with its revision history.
//!
//! ## Directory Structure
//!
//! ```text
//! cached/
//! ├── kista-nod/            # Normalized menu id (leading "/" stripped)
//! │   ├── 6-2023/
//! │   │   └── data.json
//! │   └── 7-2023/
//! │       └── data.json
//! └── 521/                  # Legacy numeric id
//!     └── 7-2023/
//!         └── data.json
//! ```

pub mod local;
pub mod migrate;

use std::path::PathBuf;

use crate::error::Result;
use crate::models::{CacheEntry, CachedMenuRecord};

// Re-export for convenience
pub use local::LocalMenuCache;
pub use migrate::{MigrationReport, migrate_legacy_layout};

/// Name of the record file inside a week directory.
pub const DATA_FILE: &str = "data.json";

/// Metadata about a save operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Record file that was written
    pub path: PathBuf,
    /// Whether the record did not exist before
    pub created: bool,
    /// Number of the revision appended by this save, if the menu changed
    pub revision: Option<u32>,
}

/// Trait for menu cache backends.
///
/// Assumes a single writer per (menu, week, year); concurrent writers to one
/// key can lose or duplicate revisions.
pub trait MenuStorage {
    /// Merge a parsed menu into the record for its week and the current year.
    fn save(&self, identity: &str, entry: &CacheEntry) -> Result<SaveOutcome>;

    /// Load the record for a menu, week and year.
    ///
    /// `identity` is either a slug or a legacy numeric id. `Ok(None)` means
    /// nothing is stored; unreadable records are an error.
    fn load(&self, identity: &str, week: u32, year: i32) -> Result<Option<CachedMenuRecord>>;
}

/// Whether an identity is a legacy numeric id ("521") rather than a slug.
pub fn is_legacy_id(identity: &str) -> bool {
    !identity.is_empty() && identity.bytes().all(|b| b.is_ascii_digit())
}

/// Strip path separators around a menu id ("/kista-nod" -> "kista-nod").
pub fn normalize_identity(identity: &str) -> &str {
    identity.trim_matches('/')
}
