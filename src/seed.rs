use chrono::{Datelike, NaiveDate};
use core_types::{DateRange, Observation, MAX_INDEX, MIN_INDEX};

/// Deterministic sample index for the `day_number`-th day (1-based) of `year`:
/// two slow waves plus a small repeating offset, clamped to the valid range.
pub fn sample_index(day_number: u32, year: i32) -> i32 {
    let x = f64::from(day_number);
    let wave1 = 6.0 * (x / 9.0).sin();
    let wave2 = 3.0 * (x / 17.0).cos();

    let noise_seed = (i64::from(year) * 1000 + i64::from(day_number)).rem_euclid(11);
    let noise = (noise_seed - 5) as f64 * 0.25;

    ((wave1 + wave2 + noise).round() as i32).clamp(MIN_INDEX, MAX_INDEX)
}

/// One sample observation per day of `range`, numbered by day of year.
pub fn sample_observations(range: DateRange) -> Vec<Observation> {
    range
        .days()
        .map(|date| Observation {
            date,
            value: sample_index(date.ordinal(), date.year()),
        })
        .collect()
}

/// The seeded ranges: the first `current_days` of `year` and all of the year before.
pub fn seed_ranges(year: i32, current_days: u32) -> anyhow::Result<[DateRange; 2]> {
    let current_start = NaiveDate::from_yo_opt(year, 1)
        .ok_or_else(|| anyhow::anyhow!("year {} is out of range", year))?;
    let last_days = analytics::calendar::days_in_year(year - 1);
    let current_days = current_days.clamp(1, analytics::calendar::days_in_year(year));

    let current_end = NaiveDate::from_yo_opt(year, current_days)
        .ok_or_else(|| anyhow::anyhow!("day {} of {} is out of range", current_days, year))?;
    let last_start = NaiveDate::from_yo_opt(year - 1, 1)
        .ok_or_else(|| anyhow::anyhow!("year {} is out of range", year - 1))?;
    let last_end = NaiveDate::from_yo_opt(year - 1, last_days)
        .ok_or_else(|| anyhow::anyhow!("year {} is out of range", year - 1))?;

    Ok([
        DateRange::new(current_start, current_end)?,
        DateRange::new(last_start, last_end)?,
    ])
}
