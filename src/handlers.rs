use crate::render;
use crate::{AddArgs, BmiArgs, ChartArgs, EditArgs, ExportArgs, GoalCommand, ShareArgs};
use analytics::{chart_series, classify_bmi, ConsistencyRating, StatisticsEngine, Summary};
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use configuration::Config;
use core_types::{
    CoreError, EntryId, Journal, NewEntry, TimeRange, WeightGoal, WeightUnit, MAX_WEIGHT_KG,
};
use reporting::{share_link, share_text, ReportError, SharePlatform, ShareStats};
use std::path::PathBuf;
use storage::{JsonFileStore, WeightStore};
use tracing::{debug, info, warn};

const EMPTY_STATE: &str = "Add weight entries to see statistics.";
const ALL_PLATFORMS: [SharePlatform; 4] = [
    SharePlatform::Twitter,
    SharePlatform::Facebook,
    SharePlatform::Linkedin,
    SharePlatform::Email,
];

/// Loaded state for one CLI invocation: the journal, the goal and the store
/// they are written back to.
pub struct App<S = JsonFileStore> {
    config: Config,
    unit: WeightUnit,
    store: S,
    journal: Journal,
    goal: Option<WeightGoal>,
    engine: StatisticsEngine,
    now: NaiveDateTime,
}

impl App<JsonFileStore> {
    /// Opens the JSON store in the configured (or overridden) data directory.
    pub fn open(
        config: Config,
        unit: Option<WeightUnit>,
        data_dir: Option<PathBuf>,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
        let store = JsonFileStore::open(&data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        Self::with_store(config, unit, store, now)
    }
}

impl<S: WeightStore> App<S> {
    pub fn with_store(
        config: Config,
        unit: Option<WeightUnit>,
        store: S,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let journal = store.load_journal().context("Failed to load weight entries")?;
        let goal = store.load_goal().context("Failed to load goal")?;
        debug!(entries = journal.len(), has_goal = goal.is_some(), "Loaded tracker data.");

        Ok(Self {
            unit: unit.unwrap_or(config.profile.unit),
            engine: StatisticsEngine::with_week_start(config.reports.week_start),
            config,
            store,
            journal,
            goal,
            now,
        })
    }

    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn ensure_not_future(&self, date: NaiveDate) -> Result<()> {
        if date > self.today() {
            bail!("Date {date} is in the future; weights can only be logged up to today");
        }
        Ok(())
    }

    /// Checks a weight typed in the display unit and converts it to kilograms.
    fn weight_in_kg(&self, value: f64) -> Result<f64> {
        let max = self.unit.from_kg(MAX_WEIGHT_KG);
        if !value.is_finite() || value <= 0.0 || value > max {
            bail!(
                "Please enter a valid weight (0-{max:.0} {unit}), got {value} {unit}",
                unit = self.unit.symbol()
            );
        }
        // Round-trip error must not push the upper bound past the stored limit.
        Ok(self.unit.to_kg(value).min(MAX_WEIGHT_KG))
    }

    fn save_entries(&mut self) -> Result<()> {
        self.store
            .save_entries(self.journal.entries())
            .context("Failed to save weight entries")
    }

    // ==========================================================================
    // Entries
    // ==========================================================================

    pub fn add(&mut self, args: AddArgs) -> Result<()> {
        let date = args.date.unwrap_or_else(|| self.today());
        self.ensure_not_future(date)?;
        if self.journal.has_entry_on(date) {
            warn!(%date, "An entry for this date already exists; both are kept.");
        }

        let mut entry = NewEntry::new(date, self.weight_in_kg(args.weight)?);
        if let Some(note) = args.note {
            entry = entry.with_note(note);
        }
        let recorded = self.journal.add(entry)?.clone();
        self.save_entries()?;

        info!(id = %recorded.id, date = %recorded.date, "Weight entry added.");
        println!(
            "Recorded {} on {} (id {}).",
            render::weight(recorded.weight, self.unit),
            recorded.date,
            recorded.id
        );
        Ok(())
    }

    pub fn edit(&mut self, args: EditArgs) -> Result<()> {
        let existing = self
            .journal
            .get(args.id)
            .cloned()
            .ok_or(CoreError::NotFound(args.id))?;

        let date = args.date.unwrap_or(existing.date);
        self.ensure_not_future(date)?;
        let weight = match args.weight {
            Some(weight) => self.weight_in_kg(weight)?,
            None => existing.weight,
        };

        let mut entry = NewEntry::new(date, weight);
        if let Some(note) = args.note.or(existing.note) {
            entry = entry.with_note(note);
        }
        let updated = self.journal.update(args.id, entry)?.clone();
        self.save_entries()?;

        info!(id = %updated.id, date = %updated.date, "Weight entry updated.");
        println!(
            "Updated entry {}: {} on {}.",
            updated.id,
            render::weight(updated.weight, self.unit),
            updated.date
        );
        Ok(())
    }

    pub fn remove(&mut self, id: EntryId) -> Result<()> {
        let removed = self.journal.remove(id)?;
        self.save_entries()?;

        info!(%id, date = %removed.date, "Weight entry removed.");
        println!("Removed the entry from {}.", removed.date);
        Ok(())
    }

    pub fn list(&self, limit: Option<usize>) -> Result<()> {
        if self.journal.is_empty() {
            println!("No weight entries yet. Record one with `weightwise add <weight>`.");
            return Ok(());
        }
        let newest_first = self
            .journal
            .entries()
            .iter()
            .rev()
            .take(limit.unwrap_or(usize::MAX));
        println!("{}", render::entries_table(newest_first, self.unit));
        Ok(())
    }

    // ==========================================================================
    // Goal
    // ==========================================================================

    pub fn goal(&mut self, command: GoalCommand) -> Result<()> {
        match command {
            GoalCommand::Set { target, deadline } => {
                if let Some(deadline) = deadline {
                    if deadline < self.today() {
                        bail!("Goal deadline {deadline} is in the past");
                    }
                }
                let goal = WeightGoal::new(self.weight_in_kg(target)?, deadline)?;
                self.store
                    .save_goal(Some(&goal))
                    .context("Failed to save goal")?;
                info!(target_kg = goal.target, deadline = ?goal.deadline, "Goal set.");
                println!("Goal set: {}.", render::weight(goal.target, self.unit));
                self.goal = Some(goal);
            }
            GoalCommand::Clear => {
                self.store.save_goal(None).context("Failed to clear goal")?;
                self.goal = None;
                info!("Goal cleared.");
                println!("Goal cleared.");
            }
            GoalCommand::Show => self.show_goal(),
        }
        Ok(())
    }

    fn show_goal(&self) {
        let Some(goal) = &self.goal else {
            println!("No goal set. Set one with `weightwise goal set <target>`.");
            return;
        };
        match self
            .engine
            .goal_status(self.journal.entries(), Some(goal), self.now)
        {
            Some(status) => println!("{}", render::goal_table(&status, self.unit)),
            None => {
                println!("Goal: {}.", render::weight(goal.target, self.unit));
                println!("{EMPTY_STATE}");
            }
        }
    }

    // ==========================================================================
    // Statistics
    // ==========================================================================

    pub fn stats(&self) -> Result<()> {
        match self.engine.compute_summary(self.journal.entries(), self.now) {
            Summary::Empty => println!("{EMPTY_STATE}"),
            Summary::Tracked(summary) => println!("{}", render::summary_table(&summary, self.unit)),
        }
        Ok(())
    }

    pub fn weekly(&self) -> Result<()> {
        let weeks = self.engine.compute_weekly_averages(self.journal.entries());
        if weeks.is_empty() {
            println!("{EMPTY_STATE}");
        } else {
            println!("{}", render::weekly_table(&weeks, self.unit));
        }
        Ok(())
    }

    /// Weekly averages followed by the tracking-consistency verdict.
    pub fn report(&self) -> Result<()> {
        let entries = self.journal.entries();
        let Summary::Tracked(summary) = self.engine.compute_summary(entries, self.now) else {
            println!("{EMPTY_STATE}");
            return Ok(());
        };

        let weeks = self.engine.compute_weekly_averages(entries);
        println!("{}", render::weekly_table(&weeks, self.unit));

        let rate = self.engine.compute_completion_rate(entries);
        let rating = ConsistencyRating::from_completion_rate(rate);
        println!();
        println!("Total change:        {}", render::change(summary.change, self.unit));
        println!("Weeks tracked:       {}", weeks.len());
        println!("Tracking completion: {rate:.0}% over {} days", summary.total_days);
        println!("{}", rating.message());
        Ok(())
    }

    pub fn bmi(&self, args: BmiArgs) -> Result<()> {
        let height = args
            .height
            .or(self.config.profile.height_cm)
            .context("No height known; pass --height or set profile.height_cm")?;
        let weight = match args.weight {
            Some(weight) => self.weight_in_kg(weight)?,
            None => {
                self.journal
                    .entries()
                    .last()
                    .context("No weight known; pass --weight or record an entry first")?
                    .weight
            }
        };

        let reading = classify_bmi(height, weight)?;
        println!("{}", render::bmi_table(&reading));
        Ok(())
    }

    pub fn chart(&self, args: ChartArgs) -> Result<()> {
        let range = args.range.unwrap_or(self.config.reports.default_range);
        let goal = if args.no_goal { None } else { self.goal.as_ref() };
        let series = chart_series(
            self.journal.entries(),
            goal,
            range,
            self.config.reports.trend_radius,
            self.now,
        );

        if series.points.is_empty() {
            println!("No entries in the {}.", describe_range(range));
            return Ok(());
        }
        println!(
            "Weight over the {} (axis {} to {})",
            describe_range(range),
            render::weight(series.bounds.min, self.unit),
            render::weight(series.bounds.max, self.unit)
        );
        if let Some(target) = series.goal {
            println!("Goal line at {}", render::weight(target, self.unit));
        }
        println!("{}", render::chart_table(&series, self.unit));
        Ok(())
    }

    // ==========================================================================
    // Export & Share
    // ==========================================================================

    pub fn export(&self, args: ExportArgs) -> Result<()> {
        let entries = self.journal.entries();
        let content = args.format.render(entries)?;

        match args.output {
            Some(path) if path.as_os_str() == "-" => print!("{content}"),
            output => {
                let path = output.unwrap_or_else(|| PathBuf::from(args.format.file_name()));
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(format = %args.format, path = %path.display(), "Exported entries.");
                println!("Exported {} entries to {}.", entries.len(), path.display());
            }
        }
        Ok(())
    }

    pub fn share(&self, args: ShareArgs) -> Result<()> {
        let entries = self.journal.entries();
        let summary = self.engine.compute_summary(entries, self.now);
        let progress = self.engine.compute_goal_progress(entries, self.goal.as_ref());
        let stats = ShareStats::from_summary(&summary, progress).ok_or(ReportError::NotEnoughData)?;

        let text = share_text(&stats, self.unit);
        let page = args.url.or_else(|| self.config.reports.share_url.clone());
        println!("{text}\n");

        let platforms = match args.platform {
            Some(platform) => vec![platform],
            None => ALL_PLATFORMS.to_vec(),
        };
        for platform in platforms {
            match share_link(platform, &text, page.as_deref()) {
                Ok(link) => println!("{platform}: {link}"),
                // Without an explicit platform, skip the ones that need a page URL.
                Err(ReportError::MissingShareUrl(_)) if args.platform.is_none() => {
                    debug!(%platform, "Skipped share link without page URL.");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    // ==========================================================================
    // Data
    // ==========================================================================

    /// Wipes all entries and the goal. Without `confirmed` nothing is touched.
    pub fn clear(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            bail!(
                "This deletes {} entries and the goal and cannot be undone; \
                 run `weightwise clear --yes` to confirm",
                self.journal.len()
            );
        }

        let removed = self.journal.len();
        self.journal.clear();
        self.save_entries()?;
        self.store.save_goal(None).context("Failed to clear goal")?;
        self.goal = None;

        info!(removed, "Cleared all tracker data.");
        println!("All data has been cleared.");
        Ok(())
    }
}

fn describe_range(range: TimeRange) -> &'static str {
    match range {
        TimeRange::Week => "last 7 days",
        TimeRange::Month => "last 30 days",
        TimeRange::Quarter => "last 90 days",
        TimeRange::All => "full history",
    }
}
