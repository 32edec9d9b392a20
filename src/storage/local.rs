//! Local filesystem menu cache.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── {menu id}/
//!     └── {week}-{year}/
//!         └── data.json     # CachedMenuRecord
//! ```
//!
//! ## Features
//!
//! - **Merge on save**: a changed menu pushes the old one onto the
//!   revision history; an identical one only refreshes `last_retrieved_at`
//! - **Atomic writes**: records are written to a temp file and renamed, so
//!   readers see either the old or the new record
//! - **Legacy lookup**: numeric ids are resolved by scanning every menu

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, Result};
use crate::models::{CacheConfig, CacheEntry, CachedMenuRecord};
use crate::storage::{DATA_FILE, MenuStorage, SaveOutcome, is_legacy_id, normalize_identity};
use crate::utils::time::week_and_year;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalMenuCache {
    root_dir: PathBuf,
    timezone: Tz,
}

impl LocalMenuCache {
    /// Create a cache rooted at the configured directory.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        Ok(Self::with_root(&config.directory).with_timezone(config.timezone()?))
    }

    /// Create a cache rooted at the given directory, on Stockholm time.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            timezone: chrono_tz::Europe::Stockholm,
        }
    }

    /// Use another zone's calendar for the week and year of a save.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// ISO week and year of `now` in the cache's zone.
    pub fn week_and_year(&self, now: DateTime<Utc>) -> (u32, i32) {
        week_and_year(&now.with_timezone(&self.timezone))
    }

    /// Directory holding the record for a menu, week and year.
    pub fn locate(&self, identity: &str, week: u32, year: i32) -> PathBuf {
        self.root_dir
            .join(normalize_identity(identity))
            .join(format!("{week}-{year}"))
    }

    /// Save a menu as of `now`.
    ///
    /// The year of `now` in the cache's zone selects the record; a menu
    /// without a week number is filed under the ISO week of `now`.
    pub fn save_at(
        &self,
        identity: &str,
        entry: &CacheEntry,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome> {
        log::info!("Saving menu for {identity}...");
        let (current_week, year) = self.week_and_year(now);
        let week = entry.menu.week_number.unwrap_or_else(|| {
            log::warn!("Menu for {identity} has no week number. Using current week {current_week}.");
            current_week
        });

        let dir = self.locate(identity, week, year);
        if !dir.exists() {
            log::info!("Creating directory for menu {identity}, week {week}...");
        }
        fs::create_dir_all(&dir)?;

        let path = dir.join(DATA_FILE);
        let (record, created, revision) = match Self::read_record(&path)? {
            Some(mut record) => {
                log::info!("Menu data already exists. Comparing for differences...");
                let revision = if record.merge(entry, now) {
                    record.latest_revision().map(|r| r.revision_number)
                } else {
                    None
                };
                if let Some(number) = revision {
                    log::info!("Got changed menu data. Added revision {number}.");
                }
                (record, false, revision)
            }
            None => {
                log::info!("Menu data will be new.");
                (CachedMenuRecord::new(entry, now), true, None)
            }
        };

        Self::write_json(&path, &record)?;
        log::info!("Menu data written to {}.", path.display());

        Ok(SaveOutcome {
            path,
            created,
            revision,
        })
    }

    /// Read a record, returning None if the file doesn't exist.
    fn read_record(path: &Path) -> Result<Option<CachedMenuRecord>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| AppError::corruption(path, e))
    }

    /// Write JSON atomically (write to temp, then rename).
    fn write_json(path: &Path, record: &CachedMenuRecord) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(record)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Find a record by legacy numeric id by walking every menu directory.
    fn scan_for_legacy(
        &self,
        identity: &str,
        week: u32,
        year: i32,
    ) -> Result<Option<CachedMenuRecord>> {
        let entries = match fs::read_dir(&self.root_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut menu_dirs = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                menu_dirs.push(entry.path());
            }
        }
        menu_dirs.sort();

        let wanted: Option<u64> = identity.parse().ok();
        let week_dir = format!("{week}-{year}");
        for menu_dir in menu_dirs {
            let path = menu_dir.join(&week_dir).join(DATA_FILE);
            let Some(record) = Self::read_record(&path)? else {
                continue;
            };

            let dir_name = menu_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let dir_matches = is_legacy_id(&dir_name) && dir_name == identity;
            let id_matches = wanted.is_some() && record.legacy_number() == wanted;
            if dir_matches || id_matches {
                log::debug!("Legacy id {identity} resolved to {}", path.display());
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

impl MenuStorage for LocalMenuCache {
    fn save(&self, identity: &str, entry: &CacheEntry) -> Result<SaveOutcome> {
        self.save_at(identity, entry, Utc::now())
    }

    fn load(&self, identity: &str, week: u32, year: i32) -> Result<Option<CachedMenuRecord>> {
        log::info!("Getting menu for ID {identity}, week {week}, year {year}");
        if is_legacy_id(identity) {
            log::debug!("Numeric id - scanning all menus...");
            self.scan_for_legacy(identity, week, year)
        } else {
            Self::read_record(&self.locate(identity, week, year).join(DATA_FILE))
        }
    }
}
