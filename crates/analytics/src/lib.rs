//! # Weightwise Statistics Engine
//!
//! This crate derives every number the dashboard shows from the raw weight
//! history: the headline summary, weekly averages, logging consistency, goal
//! progress, BMI and the chart series.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   storage or presentation. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StatisticsEngine` takes entries, an
//!   optional goal and an explicit `now`, and returns plain structs. Identical
//!   inputs always produce identical outputs.
//! - **Sentinels over errors:** Degenerate input (no entries, a zero-day span,
//!   a goal equal to the starting weight) produces documented sentinel values.
//!   Only invalid BMI input is reported as an `AnalyticsError`.
//!
//! ## Public API
//!
//! - `StatisticsEngine`: summary, weekly averages, completion rate, goal progress.
//! - `classify_bmi`: BMI value and category.
//! - `chart`: range filtering, axis bounds and moving-average trend.
//! - `AnalyticsError`: invalid BMI inputs.

// Declare the modules that constitute this crate.
pub mod bmi;
pub mod chart;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use bmi::classify_bmi;
pub use chart::{chart_series, ChartBounds, ChartSeries, TrendPoint};
pub use engine::{week_start_of, StatisticsEngine};
pub use error::AnalyticsError;
pub use report::{
    BmiReading, ConsistencyRating, GoalStatus, ProgressBand, Summary, WeeklyAverage, WeightSummary,
};
