//! CLI entry point for the bikeshare explorer.
//!
//! Provides subcommands for printing trip statistics for a city, paging
//! through the filtered rows, and listing the configured cities.

use anyhow::Result;
use bikeshare_explorer::{
    Aggregator, Dataset, FilterCriteria, Month, Pager, RowPolicy,
    config::CityCatalog,
    dataset::weekday_from_name,
    filter, load_file,
    output::{render_page, report_sections, to_json, title_case},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// JSON file mapping city names to CSV files (overrides BIKESHARE_CITIES)
    #[arg(long, global = true)]
    cities: Option<PathBuf>,

    /// Directory the city CSV files live in (overrides BIKESHARE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum MonthArg {
    All,
    January,
    February,
    March,
    April,
    May,
    June,
}

#[derive(Clone, Copy, ValueEnum)]
enum DayArg {
    All,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(clap::Args)]
struct Query {
    /// City to analyze
    #[arg(short, long)]
    city: String,

    /// Month to filter by
    #[arg(short, long, value_enum, default_value_t = MonthArg::All)]
    month: MonthArg,

    /// Day of week to filter by
    #[arg(short, long, value_enum, default_value_t = DayArg::All)]
    day: DayArg,

    /// Fail on the first malformed row instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print time, station, duration and user statistics
    Stats {
        #[command(flatten)]
        query: Query,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Page through the filtered rows five at a time
    Browse {
        #[command(flatten)]
        query: Query,
    },
    /// List the configured cities
    Cities,
}

impl Query {
    fn criteria(&self) -> FilterCriteria {
        let month = match self.month {
            MonthArg::All => None,
            m => m
                .to_possible_value()
                .and_then(|v| Month::from_name(v.get_name())),
        };
        let day = match self.day {
            DayArg::All => None,
            d => d
                .to_possible_value()
                .and_then(|v| weekday_from_name(v.get_name())),
        };
        FilterCriteria::new(month, day)
    }

    fn policy(&self) -> RowPolicy {
        if self.strict {
            RowPolicy::Abort
        } else {
            RowPolicy::Skip
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let catalog = city_catalog(cli.cities, cli.data_dir)?;

    match cli.command {
        Commands::Stats { query, json } => {
            let dataset = load_filtered(&catalog, &query)?;
            let report = Aggregator::default().report(&dataset);

            if json {
                println!("{}", to_json(&report)?);
            } else {
                for (heading, lines) in report_sections(&report, &query.city) {
                    println!("\n{heading}\n");
                    for line in lines {
                        println!("{line}");
                    }
                    println!("{}", "-".repeat(40));
                }
            }
        }
        Commands::Browse { query } => {
            let dataset = load_filtered(&catalog, &query)?;
            browse(&dataset)?;
        }
        Commands::Cities => {
            for city in catalog.cities() {
                println!("{}", title_case(city));
            }
        }
    }

    Ok(())
}

/// Builds the city catalog from flags, then environment, then built-in defaults.
fn city_catalog(cities: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<CityCatalog> {
    let data_dir = data_dir
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let cities = cities.or_else(|| std::env::var_os("BIKESHARE_CITIES").map(PathBuf::from));

    let catalog = match cities {
        Some(path) => {
            info!(path = %path.display(), "Loading city catalog");
            CityCatalog::load(&path, data_dir)?
        }
        None => CityCatalog::builtin(data_dir),
    };
    Ok(catalog)
}

/// Loads a city's trips and applies the query's filters.
#[tracing::instrument(skip_all, fields(city = %query.city))]
fn load_filtered(catalog: &CityCatalog, query: &Query) -> Result<Dataset> {
    let path = catalog.path_for(&query.city)?;
    let (dataset, summary) = load_file(&path, query.policy())?;
    if summary.skipped() > 0 {
        warn!(
            skipped = summary.skipped(),
            malformed_timestamp = summary.malformed_timestamp,
            malformed_duration = summary.malformed_duration,
            malformed_birth_year = summary.malformed_birth_year,
            unreadable = summary.unreadable,
            "Some rows could not be read and were skipped"
        );
    }

    let filtered = filter(&dataset, &query.criteria());
    info!(total = dataset.len(), matched = filtered.len(), "Dataset ready");
    Ok(filtered)
}

/// Shows pages while the user answers "y".
fn browse(dataset: &Dataset) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut pager = Pager::new(dataset);

    while !pager.is_exhausted() {
        let which = if pager.cursor() == 0 { "first" } else { "next" };
        print!("Would you like to view the {which} five rows of the raw data? (y/n) ");
        std::io::stdout().flush()?;

        let answer = match lines.next() {
            Some(line) => line?.trim().to_lowercase(),
            None => break,
        };
        match answer.as_str() {
            "y" | "yes" => {
                println!("{}", render_page(&pager.next_page(), dataset.len())?)
            }
            "n" | "no" => break,
            other => {
                println!("Sorry, {other:?} is not a valid answer, please input \"y\" or \"n\".")
            }
        }
    }

    Ok(())
}
