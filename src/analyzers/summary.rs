//! Scalar statistics over a whole record set.
//!
//! Each statistic is its own fallible function so a caller can report one
//! failure without losing the rest.

use crate::analyzers::aggregate::{daily_mean_and_std_dev, mode_share};
use crate::analyzers::types::Summary;
use crate::analyzers::utility::{as_f64, mean};
use crate::error::CommuteError;
use crate::record::{CommuteRecordSet, Day, Mode, Mood, Weather};

pub fn total_count(records: &CommuteRecordSet) -> usize {
    records.len()
}

pub fn mean_duration(records: &CommuteRecordSet) -> Result<f64, CommuteError> {
    let durations: Vec<u32> = records.iter().map(|r| r.duration_min()).collect();
    mean(&as_f64(&durations)).ok_or(CommuteError::EmptyDataset)
}

pub fn max_duration(records: &CommuteRecordSet) -> Result<u32, CommuteError> {
    records
        .iter()
        .map(|r| r.duration_min())
        .max()
        .ok_or(CommuteError::EmptyDataset)
}

pub fn min_duration(records: &CommuteRecordSet) -> Result<u32, CommuteError> {
    records
        .iter()
        .map(|r| r.duration_min())
        .min()
        .ok_or(CommuteError::EmptyDataset)
}

/// Mean rainy duration minus mean sunny duration.
///
/// # Errors
///
/// [`CommuteError::EmptyDataset`] on an empty set, [`CommuteError::EmptyGroup`]
/// when there are no rainy or no sunny trips.
pub fn rain_impact(records: &CommuteRecordSet) -> Result<f64, CommuteError> {
    if records.is_empty() {
        return Err(CommuteError::EmptyDataset);
    }
    Ok(weather_mean(records, Weather::Rainy)? - weather_mean(records, Weather::Sunny)?)
}

/// Most frequent mode; ties go to the mode seen first.
pub fn most_popular_mode(records: &CommuteRecordSet) -> Result<Mode, CommuteError> {
    mode_share(records)?
        .first()
        .map(|s| s.mode)
        .ok_or(CommuteError::EmptyDataset)
}

/// Weekday with the highest mean duration; ties go to the earlier weekday.
pub fn worst_day(records: &CommuteRecordSet) -> Result<Day, CommuteError> {
    let mut worst: Option<(Day, f64)> = None;

    for stats in daily_mean_and_std_dev(records) {
        let Some(m) = stats.mean_duration else {
            continue;
        };
        match worst {
            Some((_, best)) if m <= best => {}
            _ => worst = Some((stats.day, m)),
        }
    }

    worst.map(|(day, _)| day).ok_or(CommuteError::EmptyDataset)
}

/// Share of trips with a happy commuter, 0.0 to 1.0.
pub fn happy_fraction(records: &CommuteRecordSet) -> Result<f64, CommuteError> {
    if records.is_empty() {
        return Err(CommuteError::EmptyDataset);
    }
    let happy = records.iter().filter(|r| r.mood() == Mood::Happy).count();
    Ok(happy as f64 / records.len() as f64)
}

/// Bundles every scalar statistic.
///
/// A missing rainy or sunny group leaves `rain_impact` as `None` rather than
/// failing the whole summary.
///
/// # Errors
///
/// Returns [`CommuteError::EmptyDataset`] if `records` is empty.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn summarize(records: &CommuteRecordSet) -> Result<Summary, CommuteError> {
    Ok(Summary {
        total_count: total_count(records),
        mean_duration: mean_duration(records)?,
        max_duration: max_duration(records)?,
        min_duration: min_duration(records)?,
        rain_impact: rain_impact(records).ok(),
        most_popular_mode: most_popular_mode(records)?,
        worst_day: worst_day(records)?,
        happy_fraction: happy_fraction(records)?,
    })
}

fn weather_mean(records: &CommuteRecordSet, weather: Weather) -> Result<f64, CommuteError> {
    let durations: Vec<f64> = records
        .iter()
        .filter(|r| r.weather() == weather)
        .map(|r| f64::from(r.duration_min()))
        .collect();
    mean(&durations).ok_or_else(|| CommuteError::EmptyGroup {
        group: format!("weather={weather}"),
    })
}
