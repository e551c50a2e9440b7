use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use configuration::Logging;
use core_types::{EntryId, TimeRange, WeightUnit};
use reporting::{ExportFormat, SharePlatform};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod handlers;
mod render;

use handlers::App;

/// The main entry point for the Weightwise tracker.
fn main() -> Result<()> {
    // Optional .env file with WEIGHTWISE__* overrides
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    // Held until exit so buffered log lines are flushed.
    let _log_guard = init_tracing(&config.logging)?;

    let now = Local::now().naive_local();
    let mut app = App::open(config, cli.unit, cli.data_dir, now)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Add(args) => app.add(args),
        Commands::Edit(args) => app.edit(args),
        Commands::Remove { id } => app.remove(id),
        Commands::List { limit } => app.list(limit),
        Commands::Goal { command } => app.goal(command),
        Commands::Stats => app.stats(),
        Commands::Weekly => app.weekly(),
        Commands::Report => app.report(),
        Commands::Bmi(args) => app.bmi(args),
        Commands::Chart(args) => app.chart(args),
        Commands::Export(args) => app.export(args),
        Commands::Share(args) => app.share(args),
        Commands::Clear { yes } => app.clear(yes),
    }
}

/// Installs the global tracing subscriber.
///
/// Logs go to stderr unless `logging.directory` is set, in which case they go
/// to a daily rolling file there. `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(logging: &Logging) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log filter")?;

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "weightwise.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Log body weight, follow the trend and track a target-weight goal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (default: ./weightwise.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding entries.json and goal.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Unit for entering and displaying weights.
    #[arg(long, global = true, value_enum)]
    unit: Option<WeightUnit>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a weight entry.
    Add(AddArgs),
    /// Replace the date, weight or note of an entry.
    Edit(EditArgs),
    /// Delete an entry.
    Remove {
        /// The id shown by `list`.
        id: EntryId,
    },
    /// Show the weight history, newest first.
    List {
        /// Only show the most recent N entries.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Set, clear or inspect the target-weight goal.
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },
    /// Show summary statistics.
    Stats,
    /// Show weekly average weights.
    Weekly,
    /// Show weekly averages, tracking consistency and overall change.
    Report,
    /// Calculate body-mass index.
    Bmi(BmiArgs),
    /// Plot the weight trend for a time range.
    Chart(ChartArgs),
    /// Export all entries to CSV or JSON.
    Export(ExportArgs),
    /// Print a progress message and share links.
    Share(ShareArgs),
    /// Delete every entry and the goal.
    Clear {
        /// Confirm the deletion. This cannot be undone.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// The weight, in the display unit.
    pub weight: f64,

    /// The day of the measurement (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// A free-text note.
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// The id shown by `list`.
    pub id: EntryId,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// The new weight, in the display unit.
    #[arg(long)]
    pub weight: Option<f64>,

    /// The new note. Pass an empty string to remove the note.
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Subcommand)]
pub enum GoalCommand {
    /// Set or replace the goal.
    Set {
        /// Target weight, in the display unit.
        target: f64,
        /// Target date (format: YYYY-MM-DD).
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Remove the goal.
    Clear,
    /// Show progress towards the goal.
    Show,
}

#[derive(Args)]
pub struct BmiArgs {
    /// Height in centimetres. Defaults to `profile.height_cm`.
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in the display unit. Defaults to the latest entry.
    #[arg(long)]
    pub weight: Option<f64>,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Time window ending today. Defaults to `reports.default_range`.
    #[arg(long, value_enum)]
    pub range: Option<TimeRange>,

    /// Hide the goal line.
    #[arg(long)]
    pub no_goal: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file. Defaults to weight-tracking-data.<format>; `-` writes to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShareArgs {
    /// Only build the link for this platform.
    #[arg(long, value_enum)]
    pub platform: Option<SharePlatform>,

    /// Page to link to. Defaults to `reports.share_url`.
    #[arg(long)]
    pub url: Option<String>,
}
