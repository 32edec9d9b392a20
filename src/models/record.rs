// src/models/record.rs

//! Cached menu records and their revision history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ParsedMenu;
use crate::utils::time::epoch_seconds;

/// Identity of a menu: a slug such as `/kista-nod`, or a legacy numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuId {
    Numeric(u64),
    Slug(String),
}

impl MenuId {
    /// Numeric value of the id, parsing slugs that consist only of digits.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            MenuId::Numeric(n) => Some(*n),
            MenuId::Slug(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuId::Numeric(n) => write!(f, "{n}"),
            MenuId::Slug(s) => f.write_str(s),
        }
    }
}

impl From<u64> for MenuId {
    fn from(id: u64) -> Self {
        MenuId::Numeric(id)
    }
}

impl From<&str> for MenuId {
    fn from(id: &str) -> Self {
        MenuId::Slug(id.to_string())
    }
}

impl From<String> for MenuId {
    fn from(id: String) -> Self {
        MenuId::Slug(id)
    }
}

/// A parsed menu together with the id it was published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub menu_id: MenuId,
    pub menu: ParsedMenu,
}

impl CacheEntry {
    pub fn new(menu_id: impl Into<MenuId>, menu: ParsedMenu) -> Self {
        Self {
            menu_id: menu_id.into(),
            menu,
        }
    }
}

/// A menu snapshot displaced by a later change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// 1-based, contiguous per record
    pub revision_number: u32,

    #[serde(with = "epoch_seconds")]
    pub change_discovered_at: DateTime<Utc>,

    pub previous_data: ParsedMenu,
}

/// Stored state for one (menu, week, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedMenuRecord {
    pub menu: ParsedMenu,

    /// Absent in records written before ids were stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<MenuId>,

    #[serde(with = "epoch_seconds")]
    pub last_retrieved_at: DateTime<Utc>,

    #[serde(default)]
    pub previous_revisions: Vec<Revision>,
}

impl CachedMenuRecord {
    /// First record for a key.
    pub fn new(entry: &CacheEntry, now: DateTime<Utc>) -> Self {
        Self {
            menu: entry.menu.clone(),
            menu_id: Some(entry.menu_id.clone()),
            last_retrieved_at: now,
            previous_revisions: Vec::new(),
        }
    }

    /// Merge a freshly parsed menu into this record.
    ///
    /// A differing menu pushes the current one onto the revision history
    /// before it is replaced. Returns whether a revision was recorded.
    pub fn merge(&mut self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        let changed = self.menu != entry.menu;
        if changed {
            let revision_number = self.previous_revisions.len() as u32 + 1;
            let previous_data = std::mem::replace(&mut self.menu, entry.menu.clone());
            self.previous_revisions.push(Revision {
                revision_number,
                change_discovered_at: now,
                previous_data,
            });
        }
        self.menu_id = Some(entry.menu_id.clone());
        self.last_retrieved_at = now;
        changed
    }

    /// Numeric form of the stored id, if there is one.
    pub fn legacy_number(&self) -> Option<u64> {
        self.menu_id.as_ref().and_then(MenuId::as_number)
    }

    /// The newest revision, if the menu ever changed.
    pub fn latest_revision(&self) -> Option<&Revision> {
        self.previous_revisions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn menu(title: &str) -> ParsedMenu {
        ParsedMenu {
            title: title.to_string(),
            week_number: Some(7),
            url: None,
            days: BTreeMap::new(),
            footer: None,
        }
    }

    #[test]
    fn test_menu_id_untagged_json() {
        assert_eq!(serde_json::to_string(&MenuId::from(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&MenuId::from("/kista-nod")).unwrap(),
            "\"/kista-nod\""
        );
        let parsed: MenuId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, MenuId::Numeric(42));
    }

    #[test]
    fn test_menu_id_as_number() {
        assert_eq!(MenuId::from(7).as_number(), Some(7));
        assert_eq!(MenuId::from("7").as_number(), Some(7));
        assert_eq!(MenuId::from("kista-nod").as_number(), None);
    }

    #[test]
    fn test_merge_identical_menu_adds_no_revision() {
        let now = Utc::now();
        let entry = CacheEntry::new("kista", menu("A"));
        let mut record = CachedMenuRecord::new(&entry, now);

        assert!(!record.merge(&entry, now));
        assert!(record.previous_revisions.is_empty());
    }

    #[test]
    fn test_merge_changed_menu_keeps_old_snapshot() {
        let now = Utc::now();
        let mut record = CachedMenuRecord::new(&CacheEntry::new("kista", menu("A")), now);

        assert!(record.merge(&CacheEntry::new("kista", menu("B")), now));
        assert!(record.merge(&CacheEntry::new("kista", menu("C")), now));

        assert_eq!(record.menu.title, "C");
        let numbers: Vec<u32> = record
            .previous_revisions
            .iter()
            .map(|r| r.revision_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(record.previous_revisions[0].previous_data.title, "A");
        assert_eq!(record.latest_revision().unwrap().previous_data.title, "B");
    }

    #[test]
    fn test_record_json_field_names() {
        let record = CachedMenuRecord::new(&CacheEntry::new(42, menu("A")), Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["menu_id"], 42);
        assert!(value["last_retrieved_at"].is_f64());
        assert!(value["previous_revisions"].as_array().unwrap().is_empty());
        assert!(value["menu"]["week_number"].is_u64());
    }

    #[test]
    fn test_record_without_menu_id() {
        let json = r#"{
            "menu": {"title": "Meny v7", "week_number": 7, "url": null, "days": {}, "footer": null},
            "last_retrieved_at": 1676284200.5
        }"#;
        let mut record: CachedMenuRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.menu_id, None);
        assert_eq!(record.legacy_number(), None);
        assert!(record.previous_revisions.is_empty());

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("menu_id").is_none());

        record.merge(&CacheEntry::new(521, record.menu.clone()), Utc::now());
        assert_eq!(record.legacy_number(), Some(521));
    }
}
