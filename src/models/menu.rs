// src/models/menu.rs

//! Parsed weekly menu structures.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven canonical weekdays.
///
/// Variant order is Monday through Sunday, so `BTreeMap<Weekday, _>` iterates
/// and serializes in calendar order no matter how days were discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical JSON key (e.g. `"monday"`).
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Label used in the menu text.
    pub fn swedish(self) -> &'static str {
        match self {
            Weekday::Monday => "Måndag",
            Weekday::Tuesday => "Tisdag",
            Weekday::Wednesday => "Onsdag",
            Weekday::Thursday => "Torsdag",
            Weekday::Friday => "Fredag",
            Weekday::Saturday => "Lördag",
            Weekday::Sunday => "Söndag",
        }
    }

    /// English display name (e.g. `"Monday"`).
    pub fn english(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Weekday for a 1-based day number (1 = Monday, 7 = Sunday).
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Self::ALL[usize::from(number) - 1]),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Weekday-themed promotions flagged per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFeature {
    SweetTuesday,
    FruityWednesday,
    PancakeThursday,
    BurgerFriday,
}

impl SpecialFeature {
    pub const ALL: [SpecialFeature; 4] = [
        SpecialFeature::SweetTuesday,
        SpecialFeature::FruityWednesday,
        SpecialFeature::PancakeThursday,
        SpecialFeature::BurgerFriday,
    ];

    /// Phrase whose presence in a line sets this flag.
    pub fn trigger(self) -> &'static str {
        match self {
            SpecialFeature::SweetTuesday => "Sweet Tuesday",
            SpecialFeature::FruityWednesday => "Fruity Wednesday",
            SpecialFeature::PancakeThursday => "Pancake Thursday",
            SpecialFeature::BurgerFriday => "Burger Friday",
        }
    }
}

/// Fixed set of special feature flags for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialFeatures {
    pub sweet_tuesday: bool,
    pub fruity_wednesday: bool,
    pub pancake_thursday: bool,
    pub burger_friday: bool,
}

impl SpecialFeatures {
    /// Mark a feature as present. Flags are never cleared.
    pub fn set(&mut self, feature: SpecialFeature) {
        match feature {
            SpecialFeature::SweetTuesday => self.sweet_tuesday = true,
            SpecialFeature::FruityWednesday => self.fruity_wednesday = true,
            SpecialFeature::PancakeThursday => self.pancake_thursday = true,
            SpecialFeature::BurgerFriday => self.burger_friday = true,
        }
    }

    pub fn get(&self, feature: SpecialFeature) -> bool {
        match feature {
            SpecialFeature::SweetTuesday => self.sweet_tuesday,
            SpecialFeature::FruityWednesday => self.fruity_wednesday,
            SpecialFeature::PancakeThursday => self.pancake_thursday,
            SpecialFeature::BurgerFriday => self.burger_friday,
        }
    }
}

/// Native and English names of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayName {
    pub swedish: String,
    pub english: String,
}

impl From<Weekday> for DayName {
    fn from(day: Weekday) -> Self {
        Self {
            swedish: day.swedish().to_string(),
            english: day.english().to_string(),
        }
    }
}

/// Dishes and promotions served on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day_name: DayName,

    /// Dishes in the order they appear in the menu
    pub dishes: Vec<String>,

    pub special_features: SpecialFeatures,
}

impl DayRecord {
    /// Empty record for a freshly discovered day.
    pub fn new(day: Weekday) -> Self {
        Self {
            day_name: DayName::from(day),
            dishes: Vec::new(),
            special_features: SpecialFeatures::default(),
        }
    }
}

/// A weekly menu converted into day-indexed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMenu {
    pub title: String,

    /// ISO week number extracted from the title
    pub week_number: Option<u32>,

    /// Public page of the menu
    pub url: Option<String>,

    /// Only days present in the menu, Monday first
    pub days: BTreeMap<Weekday, DayRecord>,

    /// Newline-joined boilerplate collected from the menu
    pub footer: Option<String>,
}

impl ParsedMenu {
    /// Look up a day by its 1-based number (1 = Monday).
    pub fn day(&self, number: u8) -> Option<&DayRecord> {
        Weekday::from_number(number).and_then(|day| self.days.get(&day))
    }
}
