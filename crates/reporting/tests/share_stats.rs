use analytics::StatisticsEngine;
use chrono::NaiveDate;
use core_types::{Journal, NewEntry, WeightGoal, WeightUnit};
use pretty_assertions::assert_eq;
use reporting::{share_text, ShareStats};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

#[test]
fn share_stats_need_two_entries() {
    let engine = StatisticsEngine::new();
    let now = day(2).and_hms_opt(8, 0, 0).unwrap();
    let mut journal = Journal::new();

    let summary = engine.compute_summary(journal.entries(), now);
    assert_eq!(ShareStats::from_summary(&summary, None), None);

    journal.add(NewEntry::new(day(1), 80.0)).unwrap();
    let summary = engine.compute_summary(journal.entries(), now);
    assert_eq!(ShareStats::from_summary(&summary, None), None);
}

#[test]
fn share_stats_use_engine_numbers() {
    let engine = StatisticsEngine::new();
    let now = day(10).and_hms_opt(8, 0, 0).unwrap();
    let mut journal = Journal::new();
    journal.add(NewEntry::new(day(1), 80.0)).unwrap();
    journal.add(NewEntry::new(day(5), 78.0)).unwrap();
    journal.add(NewEntry::new(day(10), 75.0)).unwrap();
    let goal = WeightGoal::new(70.0, None).unwrap();

    let summary = engine.compute_summary(journal.entries(), now);
    let progress = engine.compute_goal_progress(journal.entries(), Some(&goal));
    let stats = ShareStats::from_summary(&summary, progress).unwrap();

    assert_eq!(stats.total_change, -5.0);
    assert_eq!(stats.percent_change, Some(-6.25));
    assert_eq!(stats.entries_tracked, 3);
    assert_eq!(stats.goal_progress, Some(50.0));

    let text = share_text(&stats, WeightUnit::Kg);
    assert!(text.contains("Total Change: -5.0kg"));
    assert!(text.contains("Days Tracked: 3"));
    assert!(text.contains("Goal Progress: 50.0%"));
}
