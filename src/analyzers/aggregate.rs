use crate::analyzers::types::{
    AggregateViews, DailyStats, DayMoodCounts, DistributionSummary, ModeShare, RouteMean,
    RouteMeans, WeatherDurations, WeatherModeMean, WeatherModeMeans,
};
use crate::analyzers::utility::{as_f64, mean, median, sample_stddev};
use crate::error::CommuteError;
use crate::record::{CommuteRecord, CommuteRecordSet, Day, Mood, Weather};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use strum::VariantArray;
use tracing::debug;

/// Computes every grouped view in one go.
///
/// # Errors
///
/// Returns [`CommuteError::EmptyDataset`] if `records` is empty.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn aggregate(records: &CommuteRecordSet) -> Result<AggregateViews, CommuteError> {
    if records.is_empty() {
        return Err(CommuteError::EmptyDataset);
    }

    let views = AggregateViews {
        durations_by_weather: durations_by_weather(records),
        mood_counts_by_day: mood_counts_by_day(records),
        mean_duration_by_route: mean_duration_by_route(records),
        mode_share: mode_share(records)?,
        daily_mean_and_std_dev: daily_mean_and_std_dev(records),
        mean_duration_by_weather_and_mode: mean_duration_by_weather_and_mode(records),
    };

    debug!(
        routes = views.mean_duration_by_route.routes.len(),
        weather_mode_cells = views.mean_duration_by_weather_and_mode.cells.len(),
        "Aggregate views computed"
    );
    Ok(views)
}

/// Partitions durations by weather, always listing sunny, rainy, cloudy in that order.
pub fn durations_by_weather(records: &CommuteRecordSet) -> Vec<WeatherDurations> {
    let groups = group_durations(records, CommuteRecord::weather);

    Weather::VARIANTS
        .iter()
        .map(|&weather| {
            let durations = groups.get(&weather).cloned().unwrap_or_default();
            let summary = distribution(&durations);
            WeatherDurations {
                weather,
                durations,
                summary,
            }
        })
        .collect()
}

/// Counts trips per (day, mood), zero-filled for all five weekdays.
pub fn mood_counts_by_day(records: &CommuteRecordSet) -> Vec<DayMoodCounts> {
    let mut counts: BTreeMap<Day, DayMoodCounts> = Day::VARIANTS
        .iter()
        .map(|&day| (day, DayMoodCounts::empty(day)))
        .collect();

    for r in records {
        let Some(entry) = counts.get_mut(&r.day()) else {
            continue;
        };
        match r.mood() {
            Mood::Happy => entry.happy += 1,
            Mood::Neutral => entry.neutral += 1,
            Mood::Frustrated => entry.frustrated += 1,
        }
    }

    counts.into_values().collect()
}

/// Mean duration per (origin, destination); routes nobody took are absent.
pub fn mean_duration_by_route(records: &CommuteRecordSet) -> RouteMeans {
    let groups = group_durations(records, |r| (r.start(), r.end()));

    let routes = groups
        .into_iter()
        .filter_map(|((start, end), durations)| {
            let mean_duration = mean(&as_f64(&durations))?;
            Some(RouteMean {
                start,
                end,
                trips: durations.len(),
                mean_duration,
            })
        })
        .collect();

    RouteMeans { routes }
}

/// Trip count and share per mode, most common first.
///
/// Ties keep the order in which the modes first appear in `records`.
///
/// # Errors
///
/// Returns [`CommuteError::EmptyDataset`] if `records` is empty.
pub fn mode_share(records: &CommuteRecordSet) -> Result<Vec<ModeShare>, CommuteError> {
    if records.is_empty() {
        return Err(CommuteError::EmptyDataset);
    }

    let mut counts: IndexMap<_, usize> = IndexMap::new();
    for r in records {
        *counts.entry(r.mode()).or_default() += 1;
    }

    let total = records.len() as f64;
    let mut shares: Vec<ModeShare> = counts
        .into_iter()
        .map(|(mode, count)| ModeShare {
            mode,
            count,
            fraction: count as f64 / total,
        })
        .collect();
    // stable: equal counts stay in first-seen order
    shares.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(shares)
}

/// Mean and sample standard deviation per weekday, Monday through Friday.
pub fn daily_mean_and_std_dev(records: &CommuteRecordSet) -> Vec<DailyStats> {
    let groups = group_durations(records, CommuteRecord::day);

    Day::VARIANTS
        .iter()
        .map(|&day| {
            let values = groups.get(&day).map(|d| as_f64(d)).unwrap_or_default();
            let mean_duration = mean(&values);
            DailyStats {
                day,
                trips: values.len(),
                mean_duration,
                std_dev: mean_duration.map_or(0.0, |m| sample_stddev(&values, m)),
            }
        })
        .collect()
}

/// Mean duration per (weather, mode); unobserved combinations are absent.
pub fn mean_duration_by_weather_and_mode(records: &CommuteRecordSet) -> WeatherModeMeans {
    let groups = group_durations(records, |r| (r.weather(), r.mode()));

    let cells = groups
        .into_iter()
        .filter_map(|((weather, mode), durations)| {
            let mean_duration = mean(&as_f64(&durations))?;
            Some(WeatherModeMean {
                weather,
                mode,
                trips: durations.len(),
                mean_duration,
            })
        })
        .collect();

    WeatherModeMeans { cells }
}

/// Single pass: key -> durations in record order.
fn group_durations<K, F>(records: &CommuteRecordSet, key: F) -> BTreeMap<K, Vec<u32>>
where
    K: Ord,
    F: Fn(&CommuteRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<u32>> = BTreeMap::new();
    for r in records {
        groups.entry(key(r)).or_default().push(r.duration_min());
    }
    groups
}

fn distribution(durations: &[u32]) -> Option<DistributionSummary> {
    let values = as_f64(durations);
    let avg = mean(&values)?;

    Some(DistributionSummary {
        count: durations.len(),
        mean: avg,
        median: median(&values)?,
        min: durations.iter().copied().min()?,
        max: durations.iter().copied().max()?,
        std_dev: sample_stddev(&values, avg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::record::{Destination, Mode, Origin};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn trip(mode: Mode, weather: Weather, day: Day, duration: u32) -> CommuteRecord {
        CommuteRecord::new(
            Origin::Ikeja,
            Destination::Oshodi,
            mode,
            weather,
            day,
            duration,
        )
    }

    fn route(start: Origin, end: Destination, duration: u32) -> CommuteRecord {
        CommuteRecord::new(start, end, Mode::Bus, Weather::Sunny, Day::Mon, duration)
    }

    #[test]
    fn test_aggregate_empty_dataset() {
        assert_eq!(
            aggregate(&CommuteRecordSet::default()),
            Err(CommuteError::EmptyDataset)
        );
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = generate(200, Some(5)).unwrap();
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn test_durations_by_weather_partitions_all_records() {
        let records = CommuteRecordSet::new(vec![
            trip(Mode::Bus, Weather::Rainy, Day::Mon, 60),
            trip(Mode::Car, Weather::Sunny, Day::Tue, 30),
            trip(Mode::Car, Weather::Rainy, Day::Wed, 80),
        ]);
        let views = durations_by_weather(&records);

        let weathers: Vec<_> = views.iter().map(|v| v.weather).collect();
        assert_eq!(weathers, vec![Weather::Sunny, Weather::Rainy, Weather::Cloudy]);

        assert_eq!(views[0].durations, vec![30]);
        assert_eq!(views[1].durations, vec![60, 80]);
        assert!(views[2].durations.is_empty());
        assert!(views[2].summary.is_none());

        let rainy = views[1].summary.as_ref().unwrap();
        assert_eq!(rainy.count, 2);
        assert_eq!(rainy.mean, 70.0);
        assert_eq!(rainy.median, 70.0);
        assert_eq!((rainy.min, rainy.max), (60, 80));
        assert_relative_eq!(rainy.std_dev, 200.0f64.sqrt());
    }

    #[test]
    fn test_mood_counts_zero_filled() {
        let records = CommuteRecordSet::new(vec![
            trip(Mode::Bus, Weather::Sunny, Day::Mon, 25),
            trip(Mode::Bus, Weather::Sunny, Day::Mon, 85),
        ]);
        let counts = mood_counts_by_day(&records);

        assert_eq!(counts.len(), 5);
        assert_eq!(counts[0].day, Day::Mon);
        assert_eq!(counts[0].count(Mood::Happy), 1);
        assert_eq!(counts[0].count(Mood::Neutral), 0);
        assert_eq!(counts[0].count(Mood::Frustrated), 1);
        assert!(counts[1..].iter().all(|c| c.total() == 0));
    }

    #[test]
    fn test_mood_counts_total_matches_record_count() {
        let records = generate(300, Some(9)).unwrap();
        let total: usize = mood_counts_by_day(&records).iter().map(DayMoodCounts::total).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_route_means_absent_is_not_zero() {
        let records = CommuteRecordSet::new(vec![
            route(Origin::Lekki, Destination::Cms, 40),
            route(Origin::Lekki, Destination::Cms, 60),
            route(Origin::Yaba, Destination::Ojota, 25),
        ]);
        let means = mean_duration_by_route(&records);

        assert_eq!(means.routes.len(), 2);
        assert_eq!(means.get(Origin::Lekki, Destination::Cms), Some(50.0));
        assert_eq!(means.get(Origin::Yaba, Destination::Ojota), Some(25.0));
        assert_eq!(means.get(Origin::Ajah, Destination::Festac), None);
    }

    #[test]
    fn test_mode_share_all_bus() {
        let records: CommuteRecordSet = (0..100)
            .map(|i| trip(Mode::Bus, Weather::Cloudy, Day::Thu, 20 + i % 50))
            .collect();
        let shares = mode_share(&records).unwrap();

        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].mode, Mode::Bus);
        assert_eq!(shares[0].count, 100);
        assert_eq!(shares[0].fraction, 1.0);
    }

    #[test]
    fn test_mode_share_fractions_sum_to_one() {
        let records = generate(257, Some(13)).unwrap();
        let shares = mode_share(&records).unwrap();
        let sum: f64 = shares.iter().map(|s| s.fraction).sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
        assert!(shares.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_mode_share_ties_keep_first_seen_order() {
        let records = CommuteRecordSet::new(vec![
            trip(Mode::Keke, Weather::Sunny, Day::Mon, 30),
            trip(Mode::Car, Weather::Sunny, Day::Mon, 30),
            trip(Mode::Car, Weather::Sunny, Day::Mon, 30),
            trip(Mode::Keke, Weather::Sunny, Day::Mon, 30),
            trip(Mode::Ferry, Weather::Sunny, Day::Mon, 30),
        ]);
        let modes: Vec<_> = mode_share(&records).unwrap().iter().map(|s| s.mode).collect();
        assert_eq!(modes, vec![Mode::Keke, Mode::Car, Mode::Ferry]);
    }

    #[test]
    fn test_mode_share_empty() {
        assert_eq!(
            mode_share(&CommuteRecordSet::default()),
            Err(CommuteError::EmptyDataset)
        );
    }

    #[test]
    fn test_daily_stats_handles_sparse_days() {
        let records = CommuteRecordSet::new(vec![
            trip(Mode::Bus, Weather::Sunny, Day::Wed, 40),
            trip(Mode::Bus, Weather::Sunny, Day::Wed, 60),
            trip(Mode::Bus, Weather::Sunny, Day::Fri, 75),
        ]);
        let daily = daily_mean_and_std_dev(&records);

        let days: Vec<_> = daily.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri]);

        assert_eq!(daily[0].trips, 0);
        assert_eq!(daily[0].mean_duration, None);
        assert_eq!(daily[0].std_dev, 0.0);

        assert_eq!(daily[2].mean_duration, Some(50.0));
        assert_relative_eq!(daily[2].std_dev, 200.0f64.sqrt());

        assert_eq!(daily[4].mean_duration, Some(75.0));
        assert_eq!(daily[4].std_dev, 0.0);
    }

    #[test]
    fn test_weather_mode_means_only_observed() {
        let records = CommuteRecordSet::new(vec![
            trip(Mode::Ferry, Weather::Rainy, Day::Mon, 90),
            trip(Mode::Ferry, Weather::Rainy, Day::Tue, 100),
            trip(Mode::Okada, Weather::Sunny, Day::Tue, 35),
        ]);
        let means = mean_duration_by_weather_and_mode(&records);

        assert_eq!(means.cells.len(), 2);
        assert_eq!(means.get(Weather::Rainy, Mode::Ferry), Some(95.0));
        assert_eq!(means.get(Weather::Sunny, Mode::Okada), Some(35.0));
        assert_eq!(means.get(Weather::Cloudy, Mode::Okada), None);
        // ordered by weather, then mode
        assert_eq!(means.cells[0].weather, Weather::Sunny);
    }
}
