//! Main entry point for the callboard CLI.
//!
//! Loads the call-record table, applies the selected filters, and renders the
//! dashboard snapshot as text tables or JSON.

use std::path::{Path, PathBuf};

use anyhow::Context;
use callboard_common::{init_logging, Month, Weekday};
use callboard_config::{Config, ConfigLoader};
use callboard_reports::{
    build_snapshot, CsvIngestOptions, FilterSelection, RecordStore, Selection,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;

mod render;

/// The "all values" sidebar label of the original dashboard.
const ALL_LABEL: &str = "Todos";

#[derive(Parser)]
#[command(name = "callboard")]
#[command(about = "Call-center reporting dashboard engine", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard report for a filter selection
    Report(ReportArgs),
    /// List the filter options the data offers
    Options {
        /// CSV source path (overrides configuration)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// CSV source path (overrides configuration)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Destination/analyst to keep; all when omitted
    #[arg(long)]
    destination: Option<String>,

    /// Month label to keep, e.g. "Janeiro"; all when omitted
    #[arg(long)]
    month: Option<String>,

    /// Weekday label to keep, e.g. "Segunda"; all when omitted
    #[arg(long)]
    weekday: Option<String>,

    /// Inclusive range start (YYYY-MM-DD); data minimum when omitted
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Inclusive range end (YYYY-MM-DD); data maximum when omitted
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Emit the snapshot as JSON instead of text tables
    #[arg(long)]
    json: bool,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    init_logging(config.logging.to_logging_config())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Report(args) => run_report(&config, args),
        Commands::Options { csv } => run_options(&config, csv.as_deref()),
    }
}

fn run_report(config: &Config, args: ReportArgs) -> anyhow::Result<()> {
    let store = load_store(config, args.csv.as_deref())?;

    // The sidebar defaults its slider to the full data span.
    let (data_start, data_end) = store
        .date_span()
        .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
    let from = args.from.unwrap_or(data_start);
    let to = args.to.unwrap_or(data_end);
    anyhow::ensure!(from <= to, "range start {from} is after range end {to}");

    let selection = FilterSelection {
        destination: destination_selection(args.destination),
        month: month_selection(args.month.as_deref())?,
        weekday: weekday_selection(args.weekday.as_deref())?,
        date_range: (from, to),
    };

    let snapshot = build_snapshot(&store, &selection);

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&snapshot)
            .context("failed to serialize the snapshot")?;
        json.push('\n');
        json
    } else {
        render::render_text(&snapshot)
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, &output)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn run_options(config: &Config, csv_override: Option<&Path>) -> anyhow::Result<()> {
    let store = load_store(config, csv_override)?;

    println!("Analistas:");
    for destination in store.destinations() {
        println!("- {destination}");
    }

    println!("Meses:");
    for month in store.months_present() {
        println!("- {month}");
    }

    println!("Dias da Semana:");
    for weekday in store.weekdays_present() {
        println!("- {weekday}");
    }

    match store.date_span() {
        Some((start, end)) => println!("Período: {start} a {end}"),
        None => println!("Período: sem registros"),
    }

    Ok(())
}

fn load_store(config: &Config, csv_override: Option<&Path>) -> anyhow::Result<RecordStore> {
    let path = csv_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.data.csv_path));
    let options = CsvIngestOptions {
        date_format: config.data.date_format.clone(),
    };
    RecordStore::load_csv_with(&path, &options)
        .with_context(|| format!("failed to load call records from {}", path.display()))
}

fn destination_selection(label: Option<String>) -> Selection<String> {
    match label {
        None => Selection::All,
        Some(label) if label == ALL_LABEL => Selection::All,
        Some(label) => Selection::Only(label),
    }
}

fn month_selection(label: Option<&str>) -> anyhow::Result<Selection<Month>> {
    match label {
        None => Ok(Selection::All),
        Some(ALL_LABEL) => Ok(Selection::All),
        Some(label) => label.parse().map(Selection::Only).map_err(|_| {
            anyhow::anyhow!(
                "unknown month '{label}'; valid labels: {}",
                Month::ALL.map(Month::label).join(", ")
            )
        }),
    }
}

fn weekday_selection(label: Option<&str>) -> anyhow::Result<Selection<Weekday>> {
    match label {
        None => Ok(Selection::All),
        Some(ALL_LABEL) => Ok(Selection::All),
        Some(label) => label.parse().map(Selection::Only).map_err(|_| {
            anyhow::anyhow!(
                "unknown weekday '{label}'; valid labels: {}",
                Weekday::ALL.map(Weekday::label).join(", ")
            )
        }),
    }
}
