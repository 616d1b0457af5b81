mod bench;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use campus_client::{CampusApi, ResourceClient};
use campus_core::CampusConfig;
use campus_tui::Screen;

/// campus: terminal client for the online course platform.
///
/// Lists, creates, edits and deletes courses and students through the
/// platform's HTTP API, and runs the server-side database performance tests.
#[derive(Parser, Debug)]
#[command(name = "campus", version, about)]
struct Cli {
    /// Backend base URL including the /api prefix (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Screen to open first: courses, students or benchmark.
    #[arg(short, long)]
    screen: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the performance tests and print the timings per operation.
    Bench,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, discard logs rather than writing to the screen.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("campus");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("campus.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = CampusConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        CampusConfig::default()
    });
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    tracing::info!(
        "Starting campus v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let client = ResourceClient::from_config(&config.api)?;

    match cli.command {
        Some(Command::Bench) => {
            let results = client
                .run_benchmark()
                .await
                .context("Failed to run performance tests. Please try again.")?;
            print!("{}", bench::summary(&results));
        }
        None => {
            let screen_name = cli.screen.as_deref().unwrap_or(&config.ui.start_screen);
            let start = Screen::from_name(screen_name)
                .ok_or_else(|| anyhow!("Unknown screen '{screen_name}'"))?;

            let mut app = campus_tui::App::new(Arc::new(client), start)
                .with_tick_rate(Duration::from_millis(config.ui.tick_rate_ms))
                .with_backend_label(config.api.base_url.clone());
            app.run().await?;
        }
    }

    tracing::info!("campus exited cleanly");
    Ok(())
}
