use chrono::NaiveDate;
use core_types::BmiCategory;
use serde::{Deserialize, Serialize};

/// The headline metrics derived from a non-empty entry collection.
///
/// This struct is the main output of the `StatisticsEngine` and the input of
/// every downstream formatter (tables, exports, share text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    // I. Position
    pub current: f64,
    pub start: f64,
    pub min_weight: f64,
    pub max_weight: f64,

    // II. Change
    pub change: f64,
    pub change_percent: Option<f64>, // None when the start weight is zero
    pub avg_weekly_change: f64,
    pub week_change: Option<f64>,      // None without an entry at least 7 days old
    pub four_week_change: Option<f64>, // None without an entry at least 28 days old

    // III. Tracking habits
    pub streak: u32,
    pub total_days: i64,
    pub entry_count: usize,
}

impl WeightSummary {
    /// Creates a zeroed-out summary, the documented values behind `Summary::Empty`.
    pub fn zeroed() -> Self {
        Self {
            current: 0.0,
            start: 0.0,
            min_weight: 0.0,
            max_weight: 0.0,
            change: 0.0,
            change_percent: None,
            avg_weekly_change: 0.0,
            week_change: None,
            four_week_change: None,
            streak: 0,
            total_days: 0,
            entry_count: 0,
        }
    }
}

impl Default for WeightSummary {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Result of `StatisticsEngine::compute_summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "metrics", rename_all = "lowercase")]
pub enum Summary {
    /// No entries were supplied; callers render an empty-state message.
    Empty,
    Tracked(WeightSummary),
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        matches!(self, Summary::Empty)
    }

    pub fn as_tracked(&self) -> Option<&WeightSummary> {
        match self {
            Summary::Empty => None,
            Summary::Tracked(summary) => Some(summary),
        }
    }

    /// The metrics, with `Empty` mapped to `WeightSummary::zeroed()`.
    pub fn metrics(&self) -> WeightSummary {
        self.as_tracked().cloned().unwrap_or_default()
    }
}

/// Mean weight of one reporting week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAverage {
    pub week_start: NaiveDate,
    pub average: f64,
    pub entry_count: usize,
}

/// Quartile of goal progress, used to colour progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressBand {
    FirstQuarter,
    SecondQuarter,
    ThirdQuarter,
    FinalQuarter,
}

impl ProgressBand {
    pub fn from_progress(progress: f64) -> Self {
        if progress < 25.0 {
            ProgressBand::FirstQuarter
        } else if progress < 50.0 {
            ProgressBand::SecondQuarter
        } else if progress < 75.0 {
            ProgressBand::ThirdQuarter
        } else {
            ProgressBand::FinalQuarter
        }
    }
}

/// Everything the goal card shows: progress, distance left and deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    pub target: f64,
    pub current: f64,
    pub progress: f64,
    /// Weight still to lose; zero once the current weight is at or below the target.
    pub remaining: f64,
    pub deadline: Option<NaiveDate>,
    /// Negative once the deadline has passed.
    pub days_until_deadline: Option<i64>,
    pub band: ProgressBand,
}

/// How regularly the user logs, judged from the completion rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ConsistencyRating {
    pub fn from_completion_rate(rate: f64) -> Self {
        if rate >= 80.0 {
            ConsistencyRating::Excellent
        } else if rate >= 60.0 {
            ConsistencyRating::Good
        } else {
            ConsistencyRating::NeedsImprovement
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConsistencyRating::Excellent => {
                "Excellent tracking consistency! Keep up the great work!"
            }
            ConsistencyRating::Good => {
                "Good tracking habits. Try to log your weight more regularly for better insights."
            }
            ConsistencyRating::NeedsImprovement => {
                "Consider tracking your weight more frequently for better progress monitoring."
            }
        }
    }
}

/// A body-mass-index value and its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}
