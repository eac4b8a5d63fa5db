//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `flight_scan` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Session backend selection
//! - User-facing output and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use flight_scan::app::{
    exit_code, print_extraction_statistics, print_search_summary, render_listings,
    EXIT_INIT_FAILURE,
};
use flight_scan::config::Opt;
use flight_scan::initialization::{init_client, init_logger_with};
use flight_scan::{
    search_flights, Config, ExtractionStats, HttpSessionProvider, SearchError, SearchReport,
    SearchRequest, SessionBackend, StaticSessionProvider,
};

#[tokio::main]
async fn main() {
    // Try loading .env from the current directory first, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    if let Err(e) = init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")
    {
        eprintln!("flight_scan error: {:#}", e);
        process::exit(EXIT_INIT_FAILURE);
    }

    let (request, config) = opt.to_parts();
    let stats = ExtractionStats::new();

    let result = match run_search(&opt, &request, &config, &stats).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("flight_scan error: {:#}", e);
            process::exit(EXIT_INIT_FAILURE);
        }
    };

    match &result {
        Ok(report) => match render_listings(&report.listings, opt.output) {
            Ok(rendered) => {
                println!("{}", rendered);
                print_search_summary(report);
            }
            Err(e) => {
                eprintln!("flight_scan error: failed to render results: {}", e);
                process::exit(EXIT_INIT_FAILURE);
            }
        },
        Err(e) => eprintln!("flight_scan error: {}", e),
    }

    if opt.show_stats {
        print_extraction_statistics(&stats);
    }

    process::exit(exit_code(&result));
}

/// Validates the configuration, builds the selected session provider and runs
/// the search.
///
/// The outer error covers setup failures; the inner result is the search outcome.
async fn run_search(
    opt: &Opt,
    request: &SearchRequest,
    config: &Config,
    stats: &ExtractionStats,
) -> Result<std::result::Result<SearchReport, SearchError>> {
    config.validate().context("Invalid configuration")?;

    if let Some(path) = &opt.html_file {
        let provider = StaticSessionProvider::from_file(path)
            .with_context(|| format!("Failed to load saved page {}", path.display()))?;
        return Ok(search_flights(request, &provider, config, stats).await);
    }

    match opt.backend {
        SessionBackend::Http => {
            let client = init_client(config).context("Failed to initialize HTTP client")?;
            let provider = HttpSessionProvider::new(client);
            Ok(search_flights(request, &provider, config, stats).await)
        }
        SessionBackend::Chromium => search_with_chromium(request, config, stats).await,
    }
}

#[cfg(feature = "chromium")]
async fn search_with_chromium(
    request: &SearchRequest,
    config: &Config,
    stats: &ExtractionStats,
) -> Result<std::result::Result<SearchReport, SearchError>> {
    let provider = flight_scan::ChromiumSessionProvider::new(config.request_timeout);
    Ok(search_flights(request, &provider, config, stats).await)
}

#[cfg(not(feature = "chromium"))]
async fn search_with_chromium(
    _request: &SearchRequest,
    _config: &Config,
    _stats: &ExtractionStats,
) -> Result<std::result::Result<SearchReport, SearchError>> {
    anyhow::bail!("the chromium backend is not available; rebuild with `--features chromium`")
}
