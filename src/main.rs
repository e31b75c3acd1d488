//! CLI entry point for the PPM viewer.
//!
//! Loads the punctuality dataset once, builds the station views, and either
//! renders them as tables, serves an interactive browse loop, or writes them
//! out as JSON or CSV.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use ppm_viewer::{
    config::ViewerConfig,
    expansion::Expansion,
    fetch::{BasicClient, load_source},
    output::{export_day_rows, to_json},
    parser::parse_dataset,
    render::render_dataset,
    view::{StationView, build_dataset_view},
};
use std::ffi::OsStr;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ppm_viewer")]
#[command(about = "Browse railway PPM punctuality statistics per station", long_about = None)]
struct Cli {
    /// Dataset file or URL (overrides PPM_DATA_SOURCE / PUBLIC_URL)
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each station's daily PPM table
    Show {
        /// Only show this station key
        #[arg(short, long)]
        station: Option<String>,

        /// Date key to show expanded with its services
        #[arg(short, long, value_name = "DATE")]
        expand: Option<String>,
    },
    /// Interactively expand and collapse days
    Browse {
        /// Only show this station key
        #[arg(short, long)]
        station: Option<String>,
    },
    /// Print the computed view as JSON
    Json,
    /// Export all day rows to a CSV file
    Export {
        /// CSV file to write
        #[arg(short, long, default_value = "ppm.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = ViewerConfig::from_env().with_source(cli.source);
    let _file_guard = init_tracing(&config.log_file_path)?;

    let client = BasicClient::new();
    let bytes = load_source(&client, &config.data_source).await?;
    let dataset = parse_dataset(&bytes)?;
    info!(
        source = %config.data_source,
        stations = dataset.len(),
        "Dataset loaded"
    );

    let views = build_dataset_view(&dataset);

    match cli.command {
        Commands::Show { station, expand } => {
            let views = select_station(views, station.as_deref())?;
            let mut expansion = Expansion::new();
            if let Some(date) = expand {
                if !has_day(&views, &date) {
                    warn!(date = %date, "Date not found, nothing expanded");
                }
                expansion.toggle(&date);
            }
            print!("{}", render_dataset(&views, &expansion));
        }
        Commands::Browse { station } => {
            let views = select_station(views, station.as_deref())?;
            browse(&views).await?;
        }
        Commands::Json => {
            println!("{}", to_json(&views)?);
        }
        Commands::Export { output } => {
            export_day_rows(&output, &views)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing(log_file_path: &str) -> Result<WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ppm_viewer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

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

    Ok(file_guard)
}

fn select_station(views: Vec<StationView>, station: Option<&str>) -> Result<Vec<StationView>> {
    let Some(key) = station else {
        return Ok(views);
    };

    let selected: Vec<_> = views.into_iter().filter(|v| v.key == key).collect();
    if selected.is_empty() {
        bail!("station '{key}' is not in the dataset");
    }
    Ok(selected)
}

fn has_day(views: &[StationView], key: &str) -> bool {
    views
        .iter()
        .any(|view| view.days.iter().any(|day| day.key == key))
}

/// Reads date keys from stdin and toggles them one at a time, re-rendering
/// after each. This loop is the only writer of the expansion state.
async fn browse(views: &[StationView]) -> Result<()> {
    let mut expansion = Expansion::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render_dataset(views, &expansion));
    println!("Enter a date to expand or collapse it, q to quit.");

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "q" | "quit" => break,
            "" => {}
            key if !has_day(views, key) => {
                warn!(date = key, "Date not found");
                continue;
            }
            key => {
                expansion.toggle(key);
            }
        }
        println!("{}", render_dataset(views, &expansion));
    }

    info!(expanded = ?expansion.expanded_key(), "Browse finished");
    Ok(())
}
