//! cm-advisor: prints the advisory report for a farm snapshot
//!
//! Usage: `cm-advisor <snapshot.json> [YYYY-MM-DD]`

use anyhow::Context;
use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use climate_monitor_backend::config::LoggingConfig;
use climate_monitor_backend::services::ReportingService;
use climate_monitor_backend::{AppError, AppResult, Config, FarmSnapshot};

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().context("loading configuration")?;

    init_tracing(&config.logging);
    tracing::info!("Environment: {}", config.environment);

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| {
            AppError::InvalidArgument("usage: cm-advisor <snapshot.json> [YYYY-MM-DD]".into())
        })?;
    let today = match args.next() {
        Some(raw) => parse_date(&raw)?,
        None => chrono::Utc::now().date_naive(),
    };

    let snapshot = FarmSnapshot::load(&path).map_err(|e| {
        tracing::error!("{} loading {}: {}", e.code(), path, e);
        e
    })?;

    let report = ReportingService::new(config).farm_report(&snapshot, today);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(AppError::from)?
    );

    Ok(())
}

/// Logs go to stderr so stdout carries only the report
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.clone().into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            logging
                .json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!logging.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::InvalidArgument(format!("report date {}: {}", raw, e)))
}
