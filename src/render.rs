//! Terminal rendering of engine output. Every weight arrives in kilograms and
//! is converted to the display unit here.

use analytics::{
    BmiReading, ChartBounds, ChartSeries, GoalStatus, ProgressBand, WeeklyAverage, WeightSummary,
};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use core_types::{WeightEntry, WeightUnit};

const BAR_WIDTH: usize = 30;

pub fn weight(kg: f64, unit: WeightUnit) -> String {
    format!("{:.1} {}", unit.from_kg(kg), unit.symbol())
}

pub fn change(kg: f64, unit: WeightUnit) -> String {
    format!("{:+.1} {}", unit.from_kg(kg), unit.symbol())
}

fn optional_change(kg: Option<f64>, unit: WeightUnit) -> String {
    kg.map(|c| change(c, unit)).unwrap_or_else(|| "n/a".to_string())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// History table, in the order given.
pub fn entries_table<'a>(
    entries: impl IntoIterator<Item = &'a WeightEntry>,
    unit: WeightUnit,
) -> Table {
    let mut table = new_table(vec!["Date", "Weight", "Note", "Id"]);
    for entry in entries {
        let mut row = Row::new();
        row.add_cell(Cell::new(entry.date));
        row.add_cell(right(weight(entry.weight, unit)));
        row.add_cell(Cell::new(entry.note.as_deref().unwrap_or("")));
        row.add_cell(Cell::new(entry.id));
        table.add_row(row);
    }
    table
}

pub fn summary_table(summary: &WeightSummary, unit: WeightUnit) -> Table {
    let percent = summary
        .change_percent
        .map(|p| format!(" ({p:+.1}%)"))
        .unwrap_or_default();

    let mut table = new_table(vec!["Metric", "Value"]);
    let rows = [
        ("Current weight", weight(summary.current, unit)),
        ("Starting weight", weight(summary.start, unit)),
        ("Total change", format!("{}{percent}", change(summary.change, unit))),
        ("Lowest", weight(summary.min_weight, unit)),
        ("Highest", weight(summary.max_weight, unit)),
        ("Average per week", change(summary.avg_weekly_change, unit)),
        ("Last 7 days", optional_change(summary.week_change, unit)),
        ("Last 4 weeks", optional_change(summary.four_week_change, unit)),
        ("Current streak", format!("{} days", summary.streak)),
        ("Days tracked", summary.total_days.to_string()),
        ("Entries", summary.entry_count.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), right(value)]);
    }
    table
}

pub fn weekly_table(weeks: &[WeeklyAverage], unit: WeightUnit) -> Table {
    let mut table = new_table(vec!["Week of", "Average", "Change", "Entries"]);
    let mut previous: Option<f64> = None;
    for week in weeks {
        let delta = previous.map(|p| week.average - p);
        table.add_row(vec![
            Cell::new(week.week_start),
            right(weight(week.average, unit)),
            right(optional_change(delta, unit)),
            right(week.entry_count.to_string()),
        ]);
        previous = Some(week.average);
    }
    table
}

pub fn goal_table(status: &GoalStatus, unit: WeightUnit) -> Table {
    let mut table = new_table(vec!["Goal", ""]);
    table.add_row(vec![Cell::new("Target"), right(weight(status.target, unit))]);
    table.add_row(vec![Cell::new("Current"), right(weight(status.current, unit))]);
    table.add_row(vec![Cell::new("Remaining"), right(weight(status.remaining, unit))]);
    table.add_row(vec![
        Cell::new("Progress"),
        right(format!("{} {:.1}%", progress_bar(status.progress, status.band), status.progress)),
    ]);
    if let Some(deadline) = status.deadline {
        let days = match status.days_until_deadline {
            Some(days) if days < 0 => format!("{deadline} ({} days ago)", -days),
            Some(days) => format!("{deadline} ({days} days left)"),
            None => deadline.to_string(),
        };
        table.add_row(vec![Cell::new("Deadline"), right(days)]);
    }
    table
}

pub fn bmi_table(reading: &BmiReading) -> Table {
    let mut table = new_table(vec!["BMI", "Category", "Range", "Notes"]);
    table.add_row(vec![
        right(format!("{:.1}", reading.value)),
        Cell::new(reading.category),
        Cell::new(reading.category.range_label()),
        Cell::new(reading.category.description()),
    ]);
    table
}

/// One row per plotted entry with its trend value and a bar scaled to the
/// series bounds.
pub fn chart_table(series: &ChartSeries, unit: WeightUnit) -> Table {
    let mut table = new_table(vec!["Date", "Weight", "Trend", ""]);
    for (point, trend) in series.points.iter().zip(&series.trend) {
        table.add_row(vec![
            Cell::new(point.date),
            right(weight(point.weight, unit)),
            right(weight(trend.weight, unit)),
            Cell::new(bar(point.weight, series.bounds, series.goal)),
        ]);
    }
    table
}

/// A horizontal bar whose length places `value` between the bounds. The goal
/// position, when inside the bar, is marked with `|`.
fn bar(value: f64, bounds: ChartBounds, goal: Option<f64>) -> String {
    let cells = scale(value, bounds);
    let goal_cell = goal.map(|g| scale(g, bounds));

    (0..BAR_WIDTH)
        .map(|i| match (i < cells, goal_cell == Some(i)) {
            (_, true) => '|',
            (true, false) => '█',
            (false, false) => ' ',
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn scale(value: f64, bounds: ChartBounds) -> usize {
    let span = bounds.max - bounds.min;
    if span <= 0.0 {
        return 0;
    }
    let fraction = ((value - bounds.min) / span).clamp(0.0, 1.0);
    (fraction * (BAR_WIDTH - 1) as f64).round() as usize
}

fn progress_bar(progress: f64, band: ProgressBand) -> String {
    let filled = (progress.clamp(0.0, 100.0) / 10.0).round() as usize;
    let fill = match band {
        ProgressBand::FirstQuarter => '░',
        ProgressBand::SecondQuarter => '▒',
        ProgressBand::ThirdQuarter => '▓',
        ProgressBand::FinalQuarter => '█',
    };
    let mut bar: String = std::iter::repeat_n(fill, filled).collect();
    bar.extend(std::iter::repeat_n('·', 10 - filled));
    format!("[{bar}]")
}
