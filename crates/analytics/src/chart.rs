//! Series preparation for the weight chart: time-range filtering, axis
//! bounds and a smoothed trend line.

use crate::engine::chronological;
use chrono::{Days, NaiveDateTime};
use core_types::{TimeRange, WeightEntry, WeightGoal};
use serde::{Deserialize, Serialize};

/// Axis bounds used when there is nothing to plot.
pub const DEFAULT_BOUNDS: ChartBounds = ChartBounds {
    min: 60.0,
    max: 90.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBounds {
    pub min: f64,
    pub max: f64,
}

/// A single point of the smoothed trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: chrono::NaiveDate,
    pub weight: f64,
}

/// Everything needed to draw the chart for one time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub range: TimeRange,
    pub points: Vec<WeightEntry>,
    pub trend: Vec<TrendPoint>,
    pub bounds: ChartBounds,
    pub goal: Option<f64>,
}

/// Keeps the entries dated within the range's look-back window: the last
/// `lookback_days` calendar days, today included.
///
/// The result is sorted ascending by date. Entries dated after today are
/// dropped for every range except `TimeRange::All`.
pub fn filter_range(
    entries: &[WeightEntry],
    range: TimeRange,
    now: NaiveDateTime,
) -> Vec<WeightEntry> {
    let sorted = chronological(entries);
    let Some(days) = range.lookback_days() else {
        return sorted.into_iter().cloned().collect();
    };

    let today = now.date();
    let start = today
        .checked_sub_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(today);
    sorted
        .into_iter()
        .filter(|e| e.date >= start && e.date <= today)
        .cloned()
        .collect()
}

/// Y-axis bounds covering every weight (and the goal, when shown), padded by
/// 20% of the spread but never less than 5 units, with the lower bound kept
/// at or above zero.
pub fn chart_bounds(entries: &[WeightEntry], goal: Option<&WeightGoal>) -> ChartBounds {
    if entries.is_empty() {
        return DEFAULT_BOUNDS;
    }

    let (data_min, data_max) = entries
        .iter()
        .map(|e| e.weight)
        .chain(goal.map(|g| g.target))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), w| {
            (min.min(w), max.max(w))
        });

    let padding = ((data_max - data_min) * 0.2).max(5.0);
    ChartBounds {
        min: (data_min - padding).floor().max(0.0),
        max: (data_max + padding).ceil(),
    }
}

/// Centered moving average over the sorted series.
///
/// Each point averages up to `radius` entries on either side of it; the
/// window shrinks at both ends of the series rather than padding.
pub fn moving_average(entries: &[WeightEntry], radius: usize) -> Vec<TrendPoint> {
    let sorted = chronological(entries);
    let weights: Vec<f64> = sorted.iter().map(|e| e.weight).collect();
    let last = weights.len().saturating_sub(1);

    sorted
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let window = &weights[i.saturating_sub(radius)..=i.saturating_add(radius).min(last)];
            TrendPoint {
                date: e.date,
                weight: window.iter().sum::<f64>() / window.len() as f64,
            }
        })
        .collect()
}

/// Filters, bounds and smooths the history for one chart view.
pub fn chart_series(
    entries: &[WeightEntry],
    goal: Option<&WeightGoal>,
    range: TimeRange,
    radius: usize,
    now: NaiveDateTime,
) -> ChartSeries {
    let points = filter_range(entries, range, now);
    let trend = moving_average(&points, radius);
    let bounds = chart_bounds(&points, goal);
    tracing::debug!(?range, points = points.len(), ?bounds, "Prepared chart series.");

    ChartSeries {
        range,
        points,
        trend,
        bounds,
        goal: goal.map(|g| g.target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::EntryId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn entry(day: u32, weight: f64) -> WeightEntry {
        WeightEntry {
            id: EntryId::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            weight,
            note: None,
        }
    }

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[rstest]
    #[case::week(TimeRange::Week, vec![24, 30])]
    #[case::month(TimeRange::Month, vec![1, 23, 24, 30])]
    #[case::all(TimeRange::All, vec![1, 23, 24, 30, 31])]
    fn filters_by_lookback(#[case] range: TimeRange, #[case] expected_days: Vec<u32>) {
        let entries = vec![
            entry(31, 79.0),
            entry(1, 82.0),
            entry(23, 80.0),
            entry(24, 79.8),
            entry(30, 79.5),
        ];
        let days: Vec<u32> = filter_range(&entries, range, noon(30))
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(days, expected_days);
    }

    #[rstest]
    #[case::week(TimeRange::Week, 7)]
    #[case::month(TimeRange::Month, 30)]
    fn window_spans_exactly_the_lookback_days(#[case] range: TimeRange, #[case] expected: usize) {
        let daily: Vec<WeightEntry> = (1..=31).map(|d| entry(d, 80.0)).collect();
        assert_eq!(filter_range(&daily, range, noon(31)).len(), expected);
    }

    #[test]
    fn empty_chart_uses_default_bounds() {
        assert_eq!(chart_bounds(&[], None), DEFAULT_BOUNDS);
    }

    #[test]
    fn bounds_include_goal_and_minimum_padding() {
        let entries = vec![entry(1, 80.0), entry(2, 78.0)];
        let goal = WeightGoal::new(70.0, None).unwrap();
        // Spread 10 -> 20% is 2, so the 5 unit floor applies.
        assert_eq!(
            chart_bounds(&entries, Some(&goal)),
            ChartBounds { min: 65.0, max: 85.0 }
        );
    }

    #[test]
    fn bounds_scale_padding_with_spread_and_stay_non_negative() {
        let entries = vec![entry(1, 2.0), entry(2, 52.0)];
        assert_eq!(chart_bounds(&entries, None), ChartBounds { min: 0.0, max: 62.0 });
    }

    #[test]
    fn moving_average_shrinks_window_at_edges() {
        let entries = vec![
            entry(1, 81.0),
            entry(2, 82.0),
            entry(3, 83.0),
            entry(5, 84.0),
            entry(6, 85.0),
        ];
        let trend: Vec<f64> = moving_average(&entries, 1).iter().map(|p| p.weight).collect();
        assert_eq!(trend, vec![81.5, 82.0, 83.0, 84.0, 84.5]);
    }

    #[test]
    fn moving_average_of_nothing_is_empty() {
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn series_carries_goal_line() {
        let entries = vec![entry(29, 80.0), entry(30, 79.0)];
        let goal = WeightGoal::new(75.0, None).unwrap();
        let series = chart_series(&entries, Some(&goal), TimeRange::Week, 2, noon(30));
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.trend.len(), 2);
        assert_eq!(series.goal, Some(75.0));
    }
}
