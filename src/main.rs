//! CLI entry point for the NTD metrics preprocessor.
//!
//! Reconciles multiple years of National Transit Database performance CSVs
//! into the pre-aggregated JSON views consumed by the dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ntd_preprocess::pipeline;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Report years covered by the published NTD metrics files.
const DEFAULT_YEARS: &[i32] = &[2019, 2020, 2021, 2022, 2023, 2024];

#[derive(Parser)]
#[command(name = "ntd_preprocess")]
#[command(about = "Preprocess NTD metrics data for the dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all dashboard JSON views from the yearly metrics CSVs
    Preprocess {
        /// Directory containing one {year}.csv per configured year
        #[arg(short, long, default_value = "metrics")]
        input_dir: PathBuf,

        /// Directory to write the JSON views into
        #[arg(short, long, default_value = "app/public/data")]
        output_dir: PathBuf,

        /// Report years to load
        #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_YEARS.to_vec())]
        years: Vec<i32>,
    },
    /// Print the reconciled output schema without writing anything
    Schema {
        #[arg(short, long, default_value = "metrics")]
        input_dir: PathBuf,

        #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_YEARS.to_vec())]
        years: Vec<i32>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ntd_preprocess.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ntd_preprocess.log"));

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
        Commands::Preprocess {
            input_dir,
            output_dir,
            years,
        } => {
            info!(
                input_dir = %input_dir.display(),
                output_dir = %output_dir.display(),
                ?years,
                "starting preprocessing run"
            );
            pipeline::run(&input_dir, &output_dir, &years)?;
        }
        Commands::Schema { input_dir, years } => {
            let schema = pipeline::report_schema(&input_dir, &years)?;
            for column in &schema {
                println!("{column}");
            }
        }
    }

    Ok(())
}
