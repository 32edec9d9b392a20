//! One-shot migration of the pre-2023 cache layout.
//!
//! Older caches stored weeks as `{menu id}/{week}` without a year. This
//! renames them to `{menu id}/{week}-{year}` for a year chosen by the
//! operator. It only runs when invoked explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// What a migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Directories renamed, as (from, to)
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Legacy directories left alone because the target already exists
    pub skipped: Vec<PathBuf>,
}

/// Whether a week directory name uses the legacy year-less format.
fn is_legacy_week_dir(name: &str) -> bool {
    (1..=2).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_digit())
}

/// Rename every legacy `{week}` directory under `root` to `{week}-{year}`.
pub fn migrate_legacy_layout(root: &Path, year: i32) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    if !root.exists() {
        log::info!("No cache at {}. Nothing to migrate.", root.display());
        return Ok(report);
    }

    for menu in fs::read_dir(root)? {
        let menu = menu?;
        if !menu.file_type()?.is_dir() {
            continue;
        }
        for week in fs::read_dir(menu.path())? {
            let week = week?;
            let name = week.file_name().to_string_lossy().into_owned();
            if !week.file_type()?.is_dir() || !is_legacy_week_dir(&name) {
                continue;
            }

            let from = week.path();
            let to = menu.path().join(format!("{name}-{year}"));
            if to.exists() {
                log::warn!(
                    "Not migrating {}: {} already exists",
                    from.display(),
                    to.display()
                );
                report.skipped.push(from);
                continue;
            }
            log::info!("Migrating {} to {}", from.display(), to.display());
            fs::rename(&from, &to)?;
            report.moved.push((from, to));
        }
    }

    log::info!(
        "Migration complete: {} moved, {} skipped",
        report.moved.len(),
        report.skipped.len()
    );
    Ok(report)
}
