//! # Lifeindex Analytics Engine
//!
//! This crate turns a sparse set of daily happiness observations into the
//! statistics the dashboard shows: period aggregates, rolling momentum, best
//! and worst days, and per-day year series.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage
//!   or HTTP. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `HappinessEngine` takes observations and a
//!   reference date and produces a `HappinessReport`. Nothing is cached, no
//!   wall clock is read, and every result is recomputed per call.
//! - **Explicit Policies:** The reducer statistic, the year derivation and the
//!   rounding conventions are named values in `AggregationPolicy`, never ad hoc
//!   per call site.
//!
//! ## Public API
//!
//! - `HappinessEngine`: Assembles the full report.
//! - `DailySeries`, `PeriodAggregator`, `YearSeries`, `momentum`, `find_extremes`:
//!   The individual computations, usable on their own.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod calendar;
pub mod daily;
pub mod engine;
pub mod error;
pub mod extremum;
pub mod period;
pub mod policy;
pub mod report;
pub mod rolling;
pub mod series;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use calendar::{MonthKey, ReportingZone, WeekKey, YearKey};
pub use daily::DailySeries;
pub use engine::HappinessEngine;
pub use error::AnalyticsError;
pub use extremum::{find_extremes, Extremes, Extremum};
pub use period::{PeriodAggregates, PeriodAggregator};
pub use policy::{AggregationPolicy, RoundingPolicy, Statistic, YearDerivation};
pub use report::{HappinessReport, Headline, MomentumBlock};
pub use rolling::{momentum, trailing_window, Momentum, Trend};
pub use series::YearSeries;
pub use summary::SummaryAverages;
