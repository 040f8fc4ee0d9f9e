//! Commute record types.
//!
//! Every categorical field is a closed enum. Declaration order is the
//! canonical ordering used wherever output is ordered (weekday axes,
//! weather columns, tie breaking).

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::error::CommuteError;

/// Durations below this many minutes are `Happy`.
pub const HAPPY_BELOW_MIN: u32 = 40;
/// Durations at or above this many minutes are `Frustrated`.
pub const FRUSTRATED_FROM_MIN: u32 = 70;

/// Trip origin.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
pub enum Origin {
    Ikeja,
    Yaba,
    Lekki,
    Surulere,
    Ajah,
    #[serde(rename = "VI")]
    #[strum(serialize = "VI")]
    VictoriaIsland,
    Ikorodu,
}

/// Trip destination.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
pub enum Destination {
    #[serde(rename = "CMS")]
    #[strum(serialize = "CMS")]
    Cms,
    Obalende,
    Oshodi,
    Apapa,
    Festac,
    #[serde(rename = "Mile 2")]
    #[strum(serialize = "Mile 2")]
    MileTwo,
    Ojota,
}

/// Transport mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Bus,
    Okada,
    Keke,
    Car,
    Ferry,
    Walking,
}

impl Mode {
    /// Modes that pick up an extra delay on top of the base trip time.
    pub fn is_slow(self) -> bool {
        matches!(self, Self::Walking | Self::Ferry)
    }

    /// Title-cased name for display ("Bus", "Okada", ...).
    pub fn title(self) -> &'static str {
        match self {
            Self::Bus => "Bus",
            Self::Okada => "Okada",
            Self::Keke => "Keke",
            Self::Car => "Car",
            Self::Ferry => "Ferry",
            Self::Walking => "Walking",
        }
    }
}

/// Weather during the trip.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
}

impl Weather {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "☀️ Sunny",
            Self::Rainy => "🌧️ Rainy",
            Self::Cloudy => "☁️ Cloudy",
        }
    }
}

/// Weekday of the trip.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

/// Commuter mood, derived from the trip duration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Frustrated,
}

impl Mood {
    /// Maps a duration onto the three mood tiers.
    ///
    /// | Duration (min) | Mood       |
    /// |----------------|------------|
    /// | < 40           | Happy      |
    /// | 40 ..< 70      | Neutral    |
    /// | >= 70          | Frustrated |
    pub fn from_duration(duration_min: u32) -> Self {
        match duration_min {
            d if d < HAPPY_BELOW_MIN => Self::Happy,
            d if d < FRUSTRATED_FROM_MIN => Self::Neutral,
            _ => Self::Frustrated,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Happy => "🙂",
            Self::Neutral => "😐",
            Self::Frustrated => "😩",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Neutral => "Neutral",
            Self::Frustrated => "Frustrated",
        }
    }
}

/// One simulated trip. Mood is always derived from `duration_min`.
///
/// Field order matches the CSV export columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CommuteRow")]
pub struct CommuteRecord {
    start: Origin,
    end: Destination,
    mode: Mode,
    duration_min: u32,
    weather: Weather,
    day: Day,
    mood: Mood,
}

impl CommuteRecord {
    pub fn new(
        start: Origin,
        end: Destination,
        mode: Mode,
        weather: Weather,
        day: Day,
        duration_min: u32,
    ) -> Self {
        Self {
            start,
            end,
            mode,
            duration_min,
            weather,
            day,
            mood: Mood::from_duration(duration_min),
        }
    }

    pub fn start(&self) -> Origin {
        self.start
    }

    pub fn end(&self) -> Destination {
        self.end
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }
}

/// Raw CSV row, validated into a [`CommuteRecord`] on read.
#[derive(Deserialize)]
struct CommuteRow {
    start: Origin,
    end: Destination,
    mode: Mode,
    duration_min: u32,
    weather: Weather,
    day: Day,
    mood: Mood,
}

impl TryFrom<CommuteRow> for CommuteRecord {
    type Error = CommuteError;

    fn try_from(row: CommuteRow) -> Result<Self, Self::Error> {
        let record = Self::new(
            row.start,
            row.end,
            row.mode,
            row.weather,
            row.day,
            row.duration_min,
        );
        if record.mood != row.mood {
            return Err(CommuteError::InconsistentMood {
                duration_min: row.duration_min,
                mood: row.mood,
            });
        }
        Ok(record)
    }
}

/// An ordered, read-only collection of records produced by a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommuteRecordSet {
    records: Vec<CommuteRecord>,
}

impl CommuteRecordSet {
    pub fn new(records: Vec<CommuteRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommuteRecord> {
        self.records.iter()
    }
}

impl FromIterator<CommuteRecord> for CommuteRecordSet {
    fn from_iter<I: IntoIterator<Item = CommuteRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CommuteRecordSet {
    type Item = &'a CommuteRecord;
    type IntoIter = std::slice::Iter<'a, CommuteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
