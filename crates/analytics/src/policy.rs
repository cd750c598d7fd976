//! Named aggregation and rounding policies.
//!
//! Every level of the engine (daily, weekly, monthly, yearly) reads the same
//! [`AggregationPolicy`], so a single configuration value decides the reducer
//! for all of them.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The statistic used to collapse a group of values into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    #[default]
    Mean,
    Median,
}

impl Statistic {
    /// Reduces `values` to a single number, or `None` for an empty group.
    pub fn reduce(&self, values: &[Decimal]) -> Option<Decimal> {
        if values.is_empty() {
            return None;
        }
        match self {
            Statistic::Mean => Some(mean(values)),
            Statistic::Median => {
                let mut sorted = values.to_vec();
                sorted.sort();
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 1 {
                    Some(sorted[mid])
                } else {
                    Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
                }
            }
        }
    }
}

/// How the yearly aggregate is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearDerivation {
    /// Reduce every daily value of the year directly.
    #[default]
    FromDaily,
    /// Reduce the already computed month aggregates of the year.
    FromMonths,
}

/// Conversion of a real-valued statistic into a displayed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Nearest integer, ties away from zero (2.5 -> 3, -2.5 -> -3).
    #[default]
    HalfUp,
    /// Round toward positive infinity.
    Ceiling,
}

impl RoundingPolicy {
    pub fn apply(&self, value: Decimal) -> i32 {
        let rounded = match self {
            RoundingPolicy::HalfUp => {
                value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            RoundingPolicy::Ceiling => value.ceil(),
        };
        // Engine values are bounded by [-10, 10]; anything else is a caller bug.
        rounded.to_i32().unwrap_or_default()
    }
}

/// The complete set of choices that shape the engine's arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationPolicy {
    #[serde(default)]
    pub statistic: Statistic,
    #[serde(default)]
    pub year_derivation: YearDerivation,
    /// Rounding for the per-day year series. Every other display value uses
    /// [`RoundingPolicy::HalfUp`].
    #[serde(default)]
    pub series_rounding: RoundingPolicy,
}

/// Arithmetic mean of a non-empty slice.
pub fn mean(values: &[Decimal]) -> Decimal {
    let sum: Decimal = values.iter().sum();
    sum / Decimal::from(values.len())
}

/// Rounds to the displayed integer with [`RoundingPolicy::HalfUp`].
pub fn display_int(value: Decimal) -> i32 {
    RoundingPolicy::HalfUp.apply(value)
}

/// Rounds to `dp` decimal places, ties away from zero.
pub fn round_dp_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
