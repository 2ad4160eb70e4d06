//! Thought-related data models.
//!
//! - `Mood`: closed three-value enum used for filtering and the trend chart
//! - `Thought`: a timestamped, mood-tagged note attached to one game

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Error};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Mood {
    #[serde(rename = "Happy", alias = "Positive")]
    Positive,
    #[default]
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Dissatisfied", alias = "Negative")]
    Negative,
}

impl Mood {
    /// Moods in the order the filter menu lists them.
    pub const ALL: [Mood; 3] = [Mood::Positive, Mood::Neutral, Mood::Negative];

    /// Label persisted in the `mood` column and shown in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Positive => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Negative => "Dissatisfied",
        }
    }

    /// Vertical position on the trend chart.
    pub fn ordinal(&self) -> u8 {
        match self {
            Mood::Negative => 0,
            Mood::Neutral => 1,
            Mood::Positive => 2,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "happy" | "positive" => Ok(Mood::Positive),
            "neutral" => Ok(Mood::Neutral),
            "dissatisfied" | "negative" => Ok(Mood::Negative),
            _ => Err(anyhow!("unknown mood '{trimmed}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: i64,
    pub game_id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
}

impl Thought {
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    pub fn display_timestamp(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// Local-time rendering for the thought list. Never used for ordering.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format_timestamp_in(timestamp, &Local)
}

pub fn format_timestamp_in<Tz>(timestamp: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp
        .with_timezone(zone)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_labels_and_variant_names() {
        assert_eq!("Happy".parse::<Mood>().unwrap(), Mood::Positive);
        assert_eq!("positive".parse::<Mood>().unwrap(), Mood::Positive);
        assert_eq!(" Neutral ".parse::<Mood>().unwrap(), Mood::Neutral);
        assert_eq!("Dissatisfied".parse::<Mood>().unwrap(), Mood::Negative);
        assert_eq!("NEGATIVE".parse::<Mood>().unwrap(), Mood::Negative);
    }

    #[test]
    fn rejects_moods_outside_the_closed_set() {
        let err = "Sad".parse::<Mood>().unwrap_err();
        assert!(err.to_string().contains("Sad"));
        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn ordinals_follow_the_chart_axis() {
        assert_eq!(Mood::Negative.ordinal(), 0);
        assert_eq!(Mood::Neutral.ordinal(), 1);
        assert_eq!(Mood::Positive.ordinal(), 2);
    }

    #[test]
    fn defaults_to_neutral() {
        assert_eq!(Mood::default(), Mood::Neutral);
    }

    #[test]
    fn timestamps_render_as_month_day_year_with_twelve_hour_clock() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 3, 13, 5, 9).unwrap();
        assert_eq!(format_timestamp_in(timestamp, &Utc), "5/3/2024, 1:05:09 PM");

        let tokyo = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_timestamp_in(timestamp, &tokyo), "5/3/2024, 10:05:09 PM");

        let midnight = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp_in(midnight, &Utc), "12/31/2023, 12:00:00 AM");
    }

    #[test]
    fn display_timestamp_uses_the_local_zone() {
        let thought = Thought {
            id: 1,
            game_id: 1,
            content: "noted".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap(),
            mood: Mood::Neutral,
        };
        assert_eq!(
            thought.display_timestamp(),
            format_timestamp_in(thought.timestamp, &Local)
        );
    }

    #[test]
    fn serializes_with_storage_labels() {
        let json = serde_json::to_string(&Mood::Negative).unwrap();
        assert_eq!(json, "\"Dissatisfied\"");
        let parsed: Mood = serde_json::from_str("\"Positive\"").unwrap();
        assert_eq!(parsed, Mood::Positive);
        assert!(serde_json::from_str::<Mood>("\"Sad\"").is_err());
    }
}
