//! Courtbot - squash court booking and reservation calendars
//!
//! Main entry point for the courtbot CLI.

mod cli;
mod cmd_book;
mod cmd_sync;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courtbot_config::{ConfigLoader, ConfigValidator, Settings, SiteConfig};
use courtbot_driver_cdp::{CdpDriver, LaunchConfig};
use courtbot_protocols::PageDriver;

use crate::cli::{Cli, Commands};
use crate::cmd_book::{build_request, exit_code, run_book, RequestOverrides};
use crate::cmd_sync::run_sync;

/// Process exit code, or an error that aborts the run.
type RunResult = Result<i32, Box<dyn std::error::Error>>;

/// Get the courtbot home directory (~/.courtbot).
fn courtbot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".courtbot")
}

/// Daily-rolling file writer under `log_dir`. Buffered lines are flushed
/// when the returned guard is dropped.
fn file_writer(log_dir: &Path) -> Result<(NonBlocking, WorkerGuard), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("courtbot")
        .filename_suffix("log")
        .max_log_files(30)
        .build(log_dir)?;

    Ok(tracing_appender::non_blocking(file_appender))
}

fn init_tracing() -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let (non_blocking, guard) = file_writer(&courtbot_dir().join("logs"))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let guard = init_tracing()?;

    let code = run(Cli::parse()).await?;
    if code != 0 {
        // process::exit skips destructors.
        drop(guard);
        std::process::exit(code);
    }
    Ok(())
}

async fn run(cli: Cli) -> RunResult {
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;

    let code = match cli.command {
        Commands::CheckConfig => check_config(&config),
        Commands::Book {
            request,
            date,
            opponent,
            live,
        } => {
            let request = build_request(
                request.as_deref(),
                RequestOverrides {
                    date,
                    opponent,
                    live,
                },
            )?;
            let settings = startup(&config)?;
            with_driver(&config, &settings, async |driver: &dyn PageDriver| -> RunResult {
                let outcome = run_book(driver, &config, &settings, &request).await;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                Ok(exit_code(&outcome))
            })
            .await?
        }
        Commands::SyncCalendar => {
            let settings = startup(&config)?;
            with_driver(&config, &settings, async |driver: &dyn PageDriver| -> RunResult {
                run_sync(driver, &config, &settings).await?;
                Ok(0)
            })
            .await?
        }
    };
    Ok(code)
}

/// Validate settings and config before anything touches the browser.
fn startup(config: &SiteConfig) -> Result<Settings, Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        for err in &result.errors {
            error!("{}: {}", err.path, err.message);
        }
        return Err(format!("{} configuration error(s)", result.errors.len()).into());
    }
    info!(
        "Starting courtbot v{} (headless={}, dry_run={})",
        env!("CARGO_PKG_VERSION"),
        settings.headless,
        settings.dry_run
    );
    Ok(settings)
}

/// Open a page, run `work` under the configured wall-clock limit, then close.
async fn with_driver<F>(
    config: &SiteConfig,
    settings: &Settings,
    work: F,
) -> RunResult
where
    F: AsyncFnOnce(&dyn PageDriver) -> RunResult,
{
    let driver = CdpDriver::launch(LaunchConfig {
        debug_port: config.browser.debug_port,
        profile_dir: config.browser.profile_dir.clone(),
        headless: settings.headless,
    })
    .await?;

    let limit = config.timing.run_timeout();
    let page: &dyn PageDriver = &driver;
    let result = tokio::time::timeout(limit, work(page)).await;

    if let Err(e) = driver.close().await {
        warn!("Failed to close browser: {}", e);
    }

    match result {
        Ok(inner) => inner,
        Err(_) => {
            error!("Run exceeded {}s, aborting", limit.as_secs());
            Ok(1)
        }
    }
}

fn check_config(config: &SiteConfig) -> i32 {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        println!("error: {}: {}", err.path, err.message);
    }
    if result.is_valid() {
        println!("Configuration OK");
        0
    } else {
        1
    }
}
