//! Command line entry point for the Time Clock Analyzer.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use timeclock_analyzer::analysis::analyze;
use timeclock_analyzer::api::{create_router, AppState};
use timeclock_analyzer::config::{ConfigLoader, ScheduleConfig};
use timeclock_analyzer::error::{EngineError, EngineResult};
use timeclock_analyzer::ingest::load_punches_from_path;
use timeclock_analyzer::report::{build_heatmap, render_report};

/// Time Clock Analyzer - scores punch exports for attendance anomalies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a CSV punch export
    Analyze {
        /// Path to the punch export
        csv: PathBuf,

        /// Schedule configuration file. Uses the standard schedule if omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the text report here instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Write the full analysis as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the heat map grid as JSON
        #[arg(long)]
        heatmap: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        /// Port to bind the server to
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Schedule configuration file. Uses the standard schedule if omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> EngineResult<ScheduleConfig> {
    match path {
        Some(path) => Ok(ConfigLoader::load(path)?.into_config()),
        None => Ok(ScheduleConfig::default()),
    }
}

fn write_output(path: &Path, contents: &str) -> EngineResult<()> {
    fs::write(path, contents).map_err(|e| EngineError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), "Wrote output");
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> EngineResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| EngineError::Serialize {
        message: e.to_string(),
    })
}

fn run_analyze(
    csv: &Path,
    config: Option<&Path>,
    report: Option<&Path>,
    json: Option<&Path>,
    heatmap: Option<&Path>,
) -> EngineResult<()> {
    let config = load_config(config)?;
    let loaded = load_punches_from_path(csv)?;
    let result = analyze(loaded.records, loaded.issues, &config)?;

    // Render everything before writing anything.
    let report_text = render_report(&result);
    let json_text = json.map(|_| to_json(&result)).transpose()?;
    let heatmap_text = heatmap
        .map(|_| to_json(&build_heatmap(&result, &config)))
        .transpose()?;

    match report {
        Some(path) => write_output(path, &report_text)?,
        None => print!("{}", report_text),
    }
    if let (Some(path), Some(text)) = (json, json_text) {
        write_output(path, &text)?;
    }
    if let (Some(path), Some(text)) = (heatmap, heatmap_text) {
        write_output(path, &text)?;
    }

    Ok(())
}

async fn run_serve(port: u16, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let app = create_router(AppState::new(config));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match args.command {
        Command::Analyze {
            csv,
            config,
            report,
            json,
            heatmap,
        } => run_analyze(
            &csv,
            config.as_deref(),
            report.as_deref(),
            json.as_deref(),
            heatmap.as_deref(),
        )?,
        Command::Serve { port, config } => run_serve(port, config.as_deref()).await?,
    }

    Ok(())
}
