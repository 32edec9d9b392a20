// src/parser/builder.rs

//! Incremental construction of a parsed menu.

use std::collections::BTreeMap;

use crate::models::{DayRecord, ParsedMenu, SpecialFeature, Weekday};

/// Where the parser currently is in the menu text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Before the first day heading
    Preamble,
    InDay(Weekday),
}

/// Accumulates days, dishes and footer lines while scanning a menu.
#[derive(Debug)]
pub struct MenuBuilder {
    days: BTreeMap<Weekday, DayRecord>,
    footer: Option<String>,
    cursor: Cursor,
}

impl MenuBuilder {
    /// Start a menu whose footer begins with the provider-supplied text.
    pub fn new(footer: Option<String>) -> Self {
        Self {
            days: BTreeMap::new(),
            footer,
            cursor: Cursor::Preamble,
        }
    }

    /// Open a fresh record for `day` and make it current.
    pub fn start_day(&mut self, day: Weekday) {
        self.days.insert(day, DayRecord::new(day));
        self.cursor = Cursor::InDay(day);
    }

    /// The current day, or `None` while still in the preamble.
    pub fn current_day(&mut self) -> Option<DayCursor<'_>> {
        match self.cursor {
            Cursor::Preamble => None,
            Cursor::InDay(day) => self.days.get_mut(&day).map(|record| DayCursor { day, record }),
        }
    }

    /// Append a boilerplate line to the footer.
    pub fn append_footer(&mut self, line: &str) {
        let footer = self.footer.get_or_insert_with(String::new);
        footer.push('\n');
        footer.push_str(line);
    }

    pub fn finish(self, title: String, week_number: Option<u32>, url: Option<String>) -> ParsedMenu {
        ParsedMenu {
            title,
            week_number,
            url,
            days: self.days,
            footer: self.footer,
        }
    }
}

/// Mutable access to the day currently being filled.
#[derive(Debug)]
pub struct DayCursor<'a> {
    day: Weekday,
    record: &'a mut DayRecord,
}

impl DayCursor<'_> {
    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn append_dish(&mut self, dish: String) {
        log::info!("Adding {:?} to dishes for {}", dish, self.day);
        self.record.dishes.push(dish);
    }

    pub fn set_flag(&mut self, feature: SpecialFeature) {
        log::info!("Found {} on {}", feature.trigger(), self.day);
        self.record.special_features.set(feature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_has_no_current_day() {
        let mut builder = MenuBuilder::new(None);
        assert!(builder.current_day().is_none());
    }

    #[test]
    fn test_restarting_a_day_resets_it() {
        let mut builder = MenuBuilder::new(None);
        builder.start_day(Weekday::Monday);
        builder.current_day().unwrap().append_dish("Soppa".to_string());
        builder.start_day(Weekday::Monday);

        let menu = builder.finish("t".to_string(), None, None);
        assert!(menu.days[&Weekday::Monday].dishes.is_empty());
    }

    #[test]
    fn test_footer_lines_are_newline_prefixed() {
        let mut builder = MenuBuilder::new(Some("Från API".to_string()));
        builder.append_footer("Välkommen!");

        let mut empty = MenuBuilder::new(None);
        empty.append_footer("Välkommen!");

        assert_eq!(
            builder.finish("t".into(), None, None).footer.as_deref(),
            Some("Från API\nVälkommen!")
        );
        assert_eq!(
            empty.finish("t".into(), None, None).footer.as_deref(),
            Some("\nVälkommen!")
        );
    }

    #[test]
    fn test_days_finish_in_calendar_order() {
        let mut builder = MenuBuilder::new(None);
        builder.start_day(Weekday::Thursday);
        builder.start_day(Weekday::Monday);
        assert_eq!(builder.current_day().unwrap().day(), Weekday::Monday);

        let menu = builder.finish("t".into(), None, None);
        let keys: Vec<Weekday> = menu.days.keys().copied().collect();
        assert_eq!(keys, vec![Weekday::Monday, Weekday::Thursday]);
    }
}
