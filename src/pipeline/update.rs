// src/pipeline/update.rs

//! Scheduled menu update: download, parse and cache.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::{CacheEntry, Config, MenuId, RawWeeklyBlob};
use crate::parser::MenuParser;
use crate::services::MenuFetcher;
use crate::storage::MenuStorage;
use crate::utils::fs::{load_json, save_json};
use crate::utils::time::{from_epoch_seconds, to_epoch_seconds};

/// Contents of the status file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatus {
    /// Epoch seconds of the last finished update
    #[serde(default)]
    pub menu_last_updated_at: Option<f64>,
}

impl UpdateStatus {
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.menu_last_updated_at.and_then(from_epoch_seconds)
    }
}

/// Summary of an update run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Menus parsed and saved
    pub saved: usize,
    /// Saves that recorded a new revision
    pub changed: usize,
    /// Configured menus the provider did not return
    pub missing: usize,
    /// Menus the parser rejected
    pub failed: usize,
}

/// Refuse to run if the previous update is younger than the minimum interval.
pub fn check_interval(
    status: &UpdateStatus,
    now: DateTime<Utc>,
    min_interval_minutes: u64,
) -> Result<()> {
    let Some(last) = status.last_updated() else {
        log::debug!("No previous update recorded.");
        return Ok(());
    };
    let elapsed = now.signed_duration_since(last).num_seconds() as f64 / 60.0;
    log::info!("Minutes elapsed since last download: {elapsed:.1}");
    if elapsed < min_interval_minutes as f64 {
        return Err(AppError::validation(format!(
            "Last update was {elapsed:.1} minutes ago; updates are allowed every {min_interval_minutes} minutes"
        )));
    }
    Ok(())
}

/// Parse and cache every configured menu present in the provider response.
///
/// Parser rejections are logged and counted; storage failures abort.
pub fn ingest(
    menus: &Map<String, Value>,
    menu_ids: &[MenuId],
    parser: &MenuParser,
    storage: &dyn MenuStorage,
) -> Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();

    for menu_id in menu_ids {
        let key = menu_id.to_string();
        let Some(value) = menus.get(&key) else {
            log::warn!("Menu {key} is not available from the provider. Skipping.");
            summary.missing += 1;
            continue;
        };

        log::info!("Menu {key} is available. Sending to parser...");
        let parsed = serde_json::from_value::<RawWeeklyBlob>(value.clone())
            .map_err(AppError::from)
            .and_then(|blob| parser.parse(&blob));
        let menu = match parsed {
            Ok(menu) => menu,
            Err(e) => {
                log::warn!("Failed to parse menu {key}: {e}");
                summary.failed += 1;
                continue;
            }
        };

        let outcome = storage.save(&key, &CacheEntry::new(menu_id.clone(), menu))?;
        summary.saved += 1;
        if outcome.revision.is_some() {
            summary.changed += 1;
        }
    }

    Ok(summary)
}

/// Run a full update: interval check, download, parse, save, status.
pub async fn run_update(
    config: &Config,
    parser: &MenuParser,
    storage: &dyn MenuStorage,
    force: bool,
) -> Result<UpdateSummary> {
    let status_path: &Path = &config.fetcher.status_file;
    let status: UpdateStatus = load_json(status_path)?.unwrap_or_default();

    if force {
        log::info!("Forced update; skipping interval check.");
    } else {
        check_interval(&status, Utc::now(), config.fetcher.min_interval_minutes)?;
    }

    let fetcher = MenuFetcher::new(&config.fetcher)?;
    let menus = fetcher.fetch_all().await?;
    let summary = ingest(&menus, &config.fetcher.menu_ids, parser, storage)?;

    let status = UpdateStatus {
        menu_last_updated_at: Some(to_epoch_seconds(&Utc::now())),
    };
    save_json(status_path, &status)?;
    log::info!(
        "Update complete: {} saved, {} changed, {} missing, {} failed",
        summary.saved,
        summary.changed,
        summary.missing,
        summary.failed
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParserConfig;
    use crate::storage::LocalMenuCache;
    use chrono::Duration;
    use serde_json::json;
    use tempfile::TempDir;

    fn provider_menus(dish: &str) -> Map<String, Value> {
        let value = json!({
            "/kista-nod": {
                "uri": "/kista-nod",
                "content": {
                    "title": "Meny vecka 7",
                    "content": format!("<p>Måndag</p><p>{dish}</p>"),
                    "footer": [{"text": "Välkommen"}]
                }
            },
            "521": { "content": { "content": "<p>Måndag</p>" } }
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_check_interval() {
        let now = Utc::now();
        let recent = UpdateStatus {
            menu_last_updated_at: Some(to_epoch_seconds(&(now - Duration::minutes(5)))),
        };
        let old = UpdateStatus {
            menu_last_updated_at: Some(to_epoch_seconds(&(now - Duration::minutes(30)))),
        };

        assert!(check_interval(&recent, now, 15).is_err());
        assert!(check_interval(&old, now, 15).is_ok());
        assert!(check_interval(&UpdateStatus::default(), now, 15).is_ok());
    }

    #[test]
    fn test_ingest_saves_and_counts() {
        let tmp = TempDir::new().unwrap();
        let cache = LocalMenuCache::with_root(tmp.path());
        let parser = MenuParser::new(&ParserConfig::default()).unwrap();
        let ids = vec![
            MenuId::from("/kista-nod"),
            MenuId::Numeric(521),
            MenuId::from("/missing"),
        ];

        let first = ingest(&provider_menus("Pasta"), &ids, &parser, &cache).unwrap();
        assert_eq!(
            first,
            UpdateSummary {
                saved: 1,
                changed: 0,
                missing: 1,
                failed: 1,
            }
        );

        let second = ingest(&provider_menus("Soppa"), &ids, &parser, &cache).unwrap();
        assert_eq!(second.changed, 1);
    }
}
