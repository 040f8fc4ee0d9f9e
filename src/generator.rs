//! Synthetic commute generation.
//!
//! Categorical fields are sampled uniformly and independently. The trip
//! duration starts from a uniform base and picks up additive delays for
//! rain and for slow modes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use strum::VariantArray;
use tracing::{debug, info};

use crate::error::CommuteError;
use crate::record::{CommuteRecord, CommuteRecordSet, Day, Destination, Mode, Origin, Weather};

pub const DEFAULT_RECORD_COUNT: usize = 200;

pub const BASE_DURATION_MIN: RangeInclusive<u32> = 20..=90;
pub const RAIN_DELAY_MIN: RangeInclusive<u32> = 10..=30;
pub const SLOW_MODE_DELAY_MIN: RangeInclusive<u32> = 5..=15;

/// Generates `n` records, seeded from `seed` or from OS entropy when absent.
///
/// # Errors
///
/// Returns [`CommuteError::InvalidSampleSize`] if `n` is zero.
#[tracing::instrument]
pub fn generate(n: usize, seed: Option<u64>) -> Result<CommuteRecordSet, CommuteError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    generate_with_rng(&mut rng, n)
}

/// Generates `n` records drawing from the supplied random source.
///
/// # Errors
///
/// Returns [`CommuteError::InvalidSampleSize`] if `n` is zero.
pub fn generate_with_rng<R: Rng>(
    rng: &mut R,
    n: usize,
) -> Result<CommuteRecordSet, CommuteError> {
    if n == 0 {
        return Err(CommuteError::InvalidSampleSize { requested: n });
    }

    let records: CommuteRecordSet = (0..n).map(|_| sample_record(rng)).collect();

    info!(records = records.len(), "Generated commute records");
    Ok(records)
}

/// Draws a single trip.
pub fn sample_record<R: Rng>(rng: &mut R) -> CommuteRecord {
    let start: Origin = pick(rng);
    let end: Destination = pick(rng);
    let mode: Mode = pick(rng);
    let weather: Weather = pick(rng);
    let day: Day = pick(rng);

    let base = rng.random_range(BASE_DURATION_MIN);
    let rain_delay = (weather == Weather::Rainy).then(|| rng.random_range(RAIN_DELAY_MIN));
    let slow_mode_delay = mode
        .is_slow()
        .then(|| rng.random_range(SLOW_MODE_DELAY_MIN));

    let duration_min = trip_duration(base, weather, mode, rain_delay, slow_mode_delay);
    debug!(%start, %end, %mode, %weather, %day, base, duration_min, "Sampled trip");

    CommuteRecord::new(start, end, mode, weather, day, duration_min)
}

/// Applies the weather and mode delays to a base duration.
///
/// A delay is only added when its condition holds: `rain_delay` for rainy
/// trips, `slow_mode_delay` for walking and ferry trips. Both are additive.
pub fn trip_duration(
    base: u32,
    weather: Weather,
    mode: Mode,
    rain_delay: Option<u32>,
    slow_mode_delay: Option<u32>,
) -> u32 {
    let mut duration = base;
    if weather == Weather::Rainy {
        duration += rain_delay.unwrap_or(0);
    }
    if mode.is_slow() {
        duration += slow_mode_delay.unwrap_or(0);
    }
    duration
}

/// Uniform choice over every variant of a categorical field.
fn pick<C, R>(rng: &mut R) -> C
where
    C: VariantArray + Copy,
    R: Rng,
{
    C::VARIANTS[rng.random_range(0..C::VARIANTS.len())]
}
