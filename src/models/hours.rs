use std::collections::BTreeMap;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Serde adapter for "HH:MM" time-of-day strings (the wire format used
/// throughout the API for shift boundaries and booking times).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(d)?;
        NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// Lowercase three-letter day key, `mon..sun`. Ordering follows the week so
/// a `BTreeMap` keyed by it iterates Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<Weekday> for DayKey {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Mon => DayKey::Mon,
            Weekday::Tue => DayKey::Tue,
            Weekday::Wed => DayKey::Wed,
            Weekday::Thu => DayKey::Thu,
            Weekday::Fri => DayKey::Fri,
            Weekday::Sat => DayKey::Sat,
            Weekday::Sun => DayKey::Sun,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(rename = "start_time", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(rename = "end_time", with = "hhmm")]
    pub end: NaiveTime,
}

/// Weekly schedule: one window per day, absent day means closed (for a
/// salon) or not working (for a staff member).
///
/// Wire format: `{"mon": {"start_time": "09:00", "end_time": "21:00"}, ...}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyHours(pub BTreeMap<DayKey, TimeWindow>);

impl WeeklyHours {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let hours: WeeklyHours = serde_json::from_str(s)?;
        hours.validate()?;
        Ok(hours)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (day, window) in &self.0 {
            if window.start >= window.end {
                anyhow::bail!(
                    "invalid window for {day:?}: start {} must be before end {}",
                    window.start.format("%H:%M"),
                    window.end.format("%H:%M"),
                );
            }
        }
        Ok(())
    }

    pub fn window_for(&self, day: DayKey) -> Option<&TimeWindow> {
        self.0.get(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
