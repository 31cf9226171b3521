//! CLI definitions for courtbot.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Courtbot CLI.
#[derive(Parser)]
#[command(name = "courtbot")]
#[command(about = "Books preferred squash courts and republishes reservations as calendars")]
#[command(version)]
pub(crate) struct Cli {
    /// Site configuration file; built-in defaults when omitted
    #[arg(short, long, env = "COURTBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run one booking attempt and print the outcome as JSON
    Book {
        /// Booking request as a JSON file
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Book this date instead of the request's policy
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Opponent name, as listed under [booking.opponents]
        #[arg(long)]
        opponent: Option<String>,

        /// Issue the final confirmation (still subject to COURTBOT_DRY_RUN)
        #[arg(long)]
        live: bool,
    },

    /// Scrape upcoming reservations and publish every calendar variant
    SyncCalendar,

    /// Validate the site configuration
    CheckConfig,
}
