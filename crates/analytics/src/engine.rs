use crate::report::{GoalStatus, ProgressBand, Summary, WeeklyAverage, WeightSummary};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use core_types::{WeekStart, WeightEntry, WeightGoal};
use std::collections::{HashMap, HashSet};

/// A stateless calculator for deriving statistics from a weight history.
///
/// Every method is a pure function of its arguments. Time-sensitive methods
/// take `now` explicitly; the engine never reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticsEngine {
    week_start: WeekStart,
}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that groups weekly averages by the given first weekday.
    pub fn with_week_start(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    /// The main entry point for the dashboard metrics.
    ///
    /// # Arguments
    ///
    /// * `entries` - The weight history, in any order.
    /// * `now` - The caller's current local time.
    ///
    /// # Returns
    ///
    /// `Summary::Empty` for an empty history, otherwise the populated metrics.
    #[tracing::instrument(
        name = "compute_summary",
        skip(self, entries),
        fields(entries = entries.len())
    )]
    pub fn compute_summary(&self, entries: &[WeightEntry], now: NaiveDateTime) -> Summary {
        let sorted = chronological(entries);
        let (Some(first), Some(latest)) = (sorted.first(), sorted.last()) else {
            return Summary::Empty;
        };

        let mut summary = WeightSummary::zeroed();
        summary.entry_count = sorted.len();
        summary.current = latest.weight;
        summary.start = first.weight;

        self.calculate_change(&sorted, first.date, latest.date, &mut summary);
        self.calculate_range(&sorted, &mut summary);
        self.calculate_recent_changes(&sorted, now, &mut summary);
        summary.streak = tracking_streak(&sorted);

        tracing::debug!(
            "Summary: current={}, start={}, change={}, streak={}",
            summary.current,
            summary.start,
            summary.change,
            summary.streak
        );
        Summary::Tracked(summary)
    }

    /// Calculates the overall change and its weekly rate.
    fn calculate_change(
        &self,
        sorted: &[&WeightEntry],
        first_date: NaiveDate,
        last_date: NaiveDate,
        summary: &mut WeightSummary,
    ) {
        summary.change = summary.current - summary.start;

        if summary.start != 0.0 {
            summary.change_percent = Some(summary.change / summary.start * 100.0);
        }

        summary.total_days = (last_date - first_date).num_days();
        if summary.total_days > 0 {
            summary.avg_weekly_change = summary.change / summary.total_days as f64 * 7.0;
        }

        tracing::debug!(
            "Change over {} days from {} entries: {}",
            summary.total_days,
            sorted.len(),
            summary.change
        );
    }

    /// Finds the lightest and heaviest recorded weights.
    fn calculate_range(&self, sorted: &[&WeightEntry], summary: &mut WeightSummary) {
        let (min, max) = sorted
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), e| {
                (min.min(e.weight), max.max(e.weight))
            });
        summary.min_weight = min;
        summary.max_weight = max;
    }

    /// Compares the current weight with the latest entries at least one and four weeks old.
    fn calculate_recent_changes(
        &self,
        sorted: &[&WeightEntry],
        now: NaiveDateTime,
        summary: &mut WeightSummary,
    ) {
        let current = summary.current;
        let change_since = |days: i64| {
            let cutoff = (now - Duration::days(days)).date();
            sorted
                .iter()
                .rev()
                .find(|e| e.date <= cutoff)
                .map(|e| current - e.weight)
        };

        summary.week_change = change_since(7);
        summary.four_week_change = change_since(28);
    }

    /// Groups entries by reporting week and averages each group.
    ///
    /// Weeks appear in chronological order. Weeks without entries are absent.
    pub fn compute_weekly_averages(&self, entries: &[WeightEntry]) -> Vec<WeeklyAverage> {
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut groups: Vec<(NaiveDate, f64, usize)> = Vec::new();

        for entry in chronological(entries) {
            let week = week_start_of(entry.date, self.week_start);
            match index.get(&week) {
                Some(&i) => {
                    let group = &mut groups[i];
                    group.1 += entry.weight;
                    group.2 += 1;
                }
                None => {
                    index.insert(week, groups.len());
                    groups.push((week, entry.weight, 1));
                }
            }
        }

        groups
            .into_iter()
            .map(|(week_start, total, count)| WeeklyAverage {
                week_start,
                average: total / count as f64,
                entry_count: count,
            })
            .collect()
    }

    /// Percentage of calendar days, from the first to the last entry inclusive,
    /// that have at least one entry. Zero for an empty history.
    pub fn compute_completion_rate(&self, entries: &[WeightEntry]) -> f64 {
        let sorted = chronological(entries);
        let (Some(first), Some(latest)) = (sorted.first(), sorted.last()) else {
            return 0.0;
        };

        let distinct: HashSet<NaiveDate> = sorted.iter().map(|e| e.date).collect();
        let span_days = (latest.date - first.date).num_days() + 1;
        distinct.len() as f64 / span_days as f64 * 100.0
    }

    /// Share of the distance from the starting weight to the goal already
    /// covered, clamped to `[0, 100]`.
    ///
    /// Returns `None` without a goal or without entries. When the goal equals
    /// the starting weight the result is `100` if the current weight is at the
    /// goal and `0` otherwise.
    pub fn compute_goal_progress(
        &self,
        entries: &[WeightEntry],
        goal: Option<&WeightGoal>,
    ) -> Option<f64> {
        let goal = goal?;
        let sorted = chronological(entries);
        let start = sorted.first()?.weight;
        let current = sorted.last()?.weight;
        Some(progress_towards(start, current, goal.target))
    }

    /// The full goal card: progress, weight left and days to the deadline.
    pub fn goal_status(
        &self,
        entries: &[WeightEntry],
        goal: Option<&WeightGoal>,
        now: NaiveDateTime,
    ) -> Option<GoalStatus> {
        let goal = goal?;
        let progress = self.compute_goal_progress(entries, Some(goal))?;
        let current = chronological(entries).last()?.weight;

        let remaining = if current > goal.target {
            current - goal.target
        } else {
            0.0
        };
        let days_until_deadline = goal
            .deadline
            .map(|deadline| (deadline - now.date()).num_days());

        Some(GoalStatus {
            target: goal.target,
            current,
            progress,
            remaining,
            deadline: goal.deadline,
            days_until_deadline,
            band: ProgressBand::from_progress(progress),
        })
    }
}

/// Returns references to `entries` sorted ascending by date.
///
/// The sort is stable, so same-day entries keep their original order. The
/// caller's slice is left untouched.
pub(crate) fn chronological(entries: &[WeightEntry]) -> Vec<&WeightEntry> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}

/// The first day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = match week_start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(i64::from(offset))
}

/// Consecutive days with an entry, counted backwards from the latest entry date.
fn tracking_streak(sorted: &[&WeightEntry]) -> u32 {
    let (Some(first), Some(latest)) = (sorted.first(), sorted.last()) else {
        return 0;
    };
    let dates: HashSet<NaiveDate> = sorted.iter().map(|e| e.date).collect();

    let mut streak = 0;
    let mut day = latest.date;
    while day >= first.date && dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

fn progress_towards(start: f64, current: f64, target: f64) -> f64 {
    let total_change = start - target;
    if total_change == 0.0 {
        return if current == target { 100.0 } else { 0.0 };
    }
    let current_change = start - current;
    (current_change / total_change * 100.0).clamp(0.0, 100.0)
}
