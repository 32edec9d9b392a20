// src/utils/time.rs

//! Timestamp helpers.
//!
//! Cache records store instants as unix epoch seconds with a fractional part.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Convert an instant to fractional unix seconds.
pub fn to_epoch_seconds(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_micros()) / 1_000_000.0
}

/// Convert fractional unix seconds back to an instant.
pub fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let micros = ((seconds - whole) * 1_000_000.0).round() as u32;
    DateTime::from_timestamp(whole as i64, micros.min(999_999) * 1_000)
}

/// ISO week number and calendar year of an instant, read in its own zone.
pub fn week_and_year<Tz: TimeZone>(now: &DateTime<Tz>) -> (u32, i32) {
    (now.iso_week().week(), now.year())
}

/// Serde adapter for `DateTime<Utc>` stored as epoch seconds.
pub mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(super::to_epoch_seconds(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let seconds = f64::deserialize(d)?;
        super::from_epoch_seconds(seconds)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_epoch_seconds_round_trip_keeps_millis() {
        let instant = Utc.with_ymd_and_hms(2023, 2, 13, 10, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let seconds = to_epoch_seconds(&instant);
        assert_eq!(seconds, 1_676_284_200.25);
        assert_eq!(from_epoch_seconds(seconds), Some(instant));
    }

    #[test]
    fn test_from_epoch_seconds_rejects_nan() {
        assert!(from_epoch_seconds(f64::NAN).is_none());
    }

    #[test]
    fn test_week_and_year() {
        let now = Utc.with_ymd_and_hms(2023, 1, 13, 12, 0, 0).unwrap();
        assert_eq!(week_and_year(&now), (2, 2023));
    }

    #[test]
    fn test_week_and_year_follows_zone() {
        let now = Utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(week_and_year(&now), (52, 2023));
        let stockholm = now.with_timezone(&chrono_tz::Europe::Stockholm);
        assert_eq!(week_and_year(&stockholm), (1, 2024));
    }
}
