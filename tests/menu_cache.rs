//! End-to-end: provider JSON -> parser -> cache -> lookups.

use chrono::{TimeZone, Utc};
use eatery::models::{CacheEntry, MenuId, ParserConfig, RawWeeklyBlob, Weekday};
use eatery::parser::MenuParser;
use eatery::pipeline::{ResponseStatus, lookup};
use eatery::storage::{LocalMenuCache, MenuStorage};
use tempfile::TempDir;

const PROVIDER_JSON: &str = r#"{
    "uri": "/kista-nod/",
    "content": {
        "title": "Lunchmeny vecka 7",
        "content": "<p>Välkommen till Eatery Kista Nod!</p>\n<p><strong>Torsdag</strong></p>\n<p>Ärtsoppa med fläsk</p>\n<p>Pancake Thursday</p>\n<p>Måndag</p>\n<p>Pasta med tomatsås</p>\n<p>Alla måndagar: Rädda maten!</p>\n<p>Fredag</p>\n<p>Burgare</p>\n<p>Salladsbuffé och nybakat bröd ingår</p>",
        "footer": [{"text": "Lunch 125 kr"}]
    }
}"#;

fn parse(json: &str) -> eatery::models::ParsedMenu {
    let blob: RawWeeklyBlob = serde_json::from_str(json).unwrap();
    MenuParser::new(&ParserConfig::default())
        .unwrap()
        .parse(&blob)
        .unwrap()
}

#[test]
fn parses_provider_menu() {
    let menu = parse(PROVIDER_JSON);

    assert_eq!(menu.title, "Lunchmeny vecka 7");
    assert_eq!(menu.week_number, Some(7));
    assert_eq!(menu.url.as_deref(), Some("https://eatery.se/kista-nod"));

    let days: Vec<Weekday> = menu.days.keys().copied().collect();
    assert_eq!(days, vec![Weekday::Monday, Weekday::Thursday, Weekday::Friday]);

    // The plural mention neither opened a day nor closed Monday
    assert_eq!(menu.days[&Weekday::Monday].dishes, vec!["Pasta med tomatsås"]);
    assert_eq!(
        menu.days[&Weekday::Thursday].dishes,
        vec!["Ärtsoppa med fläsk", "Pancake Thursday"]
    );
    assert!(menu.days[&Weekday::Thursday].special_features.pancake_thursday);
    assert_eq!(menu.days[&Weekday::Friday].dishes, vec!["Burgare"]);

    assert_eq!(
        menu.footer.as_deref(),
        Some("Lunch 125 kr\nAlla måndagar: Rädda maten!\nSalladsbuffé och nybakat bröd ingår")
    );

    let json = serde_json::to_string(&menu).unwrap();
    let monday = json.find("\"monday\"").unwrap();
    let thursday = json.find("\"thursday\"").unwrap();
    let friday = json.find("\"friday\"").unwrap();
    assert!(monday < thursday && thursday < friday);
}

#[test]
fn caches_revisions_and_resolves_both_identities() {
    let tmp = TempDir::new().unwrap();
    let cache = LocalMenuCache::with_root(tmp.path());
    let now = Utc.with_ymd_and_hms(2023, 2, 15, 9, 0, 0).unwrap();

    let first = parse(PROVIDER_JSON);
    let second = parse(&PROVIDER_JSON.replace("Burgare", "Halloumiburgare"));

    cache
        .save_at("/kista-nod", &CacheEntry::new(42, first.clone()), now)
        .unwrap();
    cache
        .save_at("/kista-nod", &CacheEntry::new(42, first.clone()), now)
        .unwrap();
    let outcome = cache
        .save_at("/kista-nod", &CacheEntry::new(42, second.clone()), now)
        .unwrap();
    assert_eq!(outcome.revision, Some(1));

    let by_slug = cache.load("/kista-nod", 7, 2023).unwrap().unwrap();
    let by_number = cache.load("42", 7, 2023).unwrap().unwrap();

    assert_eq!(by_slug.menu_id, Some(MenuId::Numeric(42)));
    assert_eq!(by_slug.menu, second);
    assert_eq!(by_slug.previous_revisions.len(), 1);
    assert_eq!(by_slug.previous_revisions[0].revision_number, 1);
    assert_eq!(by_slug.previous_revisions[0].previous_data, first);
    assert_eq!(
        serde_json::to_vec(&by_slug.menu).unwrap(),
        serde_json::to_vec(&by_number.menu).unwrap()
    );

    let stored: serde_json::Value = serde_json::from_slice(
        &std::fs::read(tmp.path().join("kista-nod/7-2023/data.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(stored["menu_id"], 42);
    assert!(stored["last_retrieved_at"].is_f64());
    assert_eq!(stored["previous_revisions"][0]["revision_number"], 1);
    assert!(stored["previous_revisions"][0]["change_discovered_at"].is_f64());

    let response = lookup(&cache, "42", 7, 2023, Some(5));
    assert_eq!(response.status, ResponseStatus::Success);
    assert_eq!(
        response.content["dishes"],
        serde_json::json!(["Halloumiburgare"])
    );
}
