//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{Day, Destination, Mode, Mood, Origin, Weather};

/// Distribution of trip durations within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: u32,
    pub max: u32,
    pub std_dev: f64,
}

/// Every duration observed under one weather condition, in record order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDurations {
    pub weather: Weather,
    pub durations: Vec<u32>,
    /// `None` when no trip had this weather.
    pub summary: Option<DistributionSummary>,
}

/// Mood tally for one weekday. Missing moods count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayMoodCounts {
    pub day: Day,
    pub happy: usize,
    pub neutral: usize,
    pub frustrated: usize,
}

impl DayMoodCounts {
    pub(crate) fn empty(day: Day) -> Self {
        Self {
            day,
            happy: 0,
            neutral: 0,
            frustrated: 0,
        }
    }

    pub fn count(&self, mood: Mood) -> usize {
        match mood {
            Mood::Happy => self.happy,
            Mood::Neutral => self.neutral,
            Mood::Frustrated => self.frustrated,
        }
    }

    pub fn total(&self) -> usize {
        self.happy + self.neutral + self.frustrated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteMean {
    pub start: Origin,
    pub end: Destination,
    pub trips: usize,
    pub mean_duration: f64,
}

/// Mean duration per (origin, destination) pair. Only travelled routes are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteMeans {
    pub routes: Vec<RouteMean>,
}

impl RouteMeans {
    /// Mean for a route, or `None` if no trip took it.
    pub fn get(&self, start: Origin, end: Destination) -> Option<f64> {
        self.routes
            .iter()
            .find(|r| r.start == start && r.end == end)
            .map(|r| r.mean_duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeShare {
    pub mode: Mode,
    pub count: usize,
    /// Share of all trips, 0.0 to 1.0.
    pub fraction: f64,
}

/// Mean and spread of durations for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyStats {
    pub day: Day,
    pub trips: usize,
    /// `None` when no trip fell on this day.
    pub mean_duration: Option<f64>,
    /// Sample standard deviation; 0.0 with fewer than two trips.
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherModeMean {
    pub weather: Weather,
    pub mode: Mode,
    pub trips: usize,
    pub mean_duration: f64,
}

/// Mean duration per (weather, mode) pair. Only observed combinations are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeatherModeMeans {
    pub cells: Vec<WeatherModeMean>,
}

impl WeatherModeMeans {
    pub fn get(&self, weather: Weather, mode: Mode) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| c.weather == weather && c.mode == mode)
            .map(|c| c.mean_duration)
    }
}

/// All grouped views consumed by the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateViews {
    pub durations_by_weather: Vec<WeatherDurations>,
    pub mood_counts_by_day: Vec<DayMoodCounts>,
    pub mean_duration_by_route: RouteMeans,
    pub mode_share: Vec<ModeShare>,
    pub daily_mean_and_std_dev: Vec<DailyStats>,
    pub mean_duration_by_weather_and_mode: WeatherModeMeans,
}

/// Scalar statistics over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub mean_duration: f64,
    pub max_duration: u32,
    pub min_duration: u32,
    /// Rainy minus sunny mean; `None` when either group is empty.
    pub rain_impact: Option<f64>,
    pub most_popular_mode: Mode,
    pub worst_day: Day,
    pub happy_fraction: f64,
}

/// Top-level JSON document written by `--views-json`.
#[derive(Debug, Serialize)]
pub struct ViewsExport {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub views: AggregateViews,
}
