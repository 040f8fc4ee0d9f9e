//! CLI entry point for the commute pulse tool.
//!
//! Generates a synthetic commute dataset, exports it as CSV, aggregates it
//! into the chart views and prints the summary report. A previously
//! exported CSV can be summarized again without regenerating.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use commute_pulse::{
    CommuteRecordSet,
    analyzers::{aggregate, summarize, types::ViewsExport},
    generator::{DEFAULT_RECORD_COUNT, generate},
    output::{read_records, write_json, write_records},
    report::render_report,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "commute_pulse")]
#[command(about = "Synthesize and summarize urban commute records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset, export it and print the summary
    Run {
        /// Number of commute records to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_RECORD_COUNT)]
        count: usize,

        /// Seed for reproducible output; omitted means a fresh random run
        #[arg(short, long)]
        seed: Option<u64>,

        /// CSV file to write records to (overwritten)
        #[arg(short, long, default_value = "lagos_commute_pulse.csv")]
        output: String,

        /// Optional: JSON file to write the summary and chart views to
        #[arg(long)]
        views_json: Option<String>,
    },
    /// Summarize a previously exported CSV
    Summarize {
        /// CSV file produced by `run`
        #[arg(short, long, default_value = "lagos_commute_pulse.csv")]
        input: String,

        /// Optional: JSON file to write the summary and chart views to
        #[arg(long)]
        views_json: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/commute_pulse.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("commute_pulse.log"));

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

    match cli.command {
        Commands::Run {
            count,
            seed,
            output,
            views_json,
        } => {
            let records = generate(count, seed)?;
            write_records(&output, &records)?;
            info!(path = %output, "Data saved");

            present(&records, views_json.as_deref())?;
        }
        Commands::Summarize { input, views_json } => {
            let records = read_records(&input)?;
            info!(path = %input, records = records.len(), "Records loaded");

            present(&records, views_json.as_deref())?;
        }
    }

    Ok(())
}

/// Aggregates the records, optionally exports the views as JSON and prints
/// the summary report. A failed aggregation skips the JSON export only.
#[tracing::instrument(skip(records), fields(records = records.len()))]
fn present(records: &CommuteRecordSet, views_json: Option<&str>) -> Result<()> {
    if let Some(path) = views_json {
        match aggregate(records).and_then(|views| {
            summarize(records).map(|summary| ViewsExport {
                generated_at: Utc::now(),
                summary,
                views,
            })
        }) {
            Ok(export) => write_json(path, &export)?,
            Err(e) => error!(error = %e, "Skipping views export"),
        }
    }

    println!("{}", render_report(records));
    Ok(())
}
